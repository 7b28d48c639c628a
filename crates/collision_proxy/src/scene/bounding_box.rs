//! Local-space bounding boxes

use crate::foundation::math::{Point3, Vec3};
use crate::physics::collision::box_corners;

/// The 8 corners enclosing an object's local geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Corner points in local space
    pub corners: [Point3; 8],
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::from_min_max(Vec3::zeros(), Vec3::zeros())
    }
}

impl BoundingBox {
    /// Create a bounding box from arbitrary corner points
    pub fn new(corners: [Point3; 8]) -> Self {
        Self { corners }
    }

    /// Create an axis-aligned box from min and max points
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            corners: box_corners(&min, &max),
        }
    }

    /// Create an axis-aligned box centered on the origin with the given extents
    pub fn from_size(size: Vec3) -> Self {
        Self::from_min_max(-size * 0.5, size * 0.5)
    }

    /// Arithmetic mean of the corners
    pub fn center(&self) -> Point3 {
        let sum = self
            .corners
            .iter()
            .fold(Vec3::zeros(), |acc, corner| acc + corner.coords);
        Point3::from(sum / 8.0)
    }

    /// Smallest coordinate on each axis
    pub fn min(&self) -> Vec3 {
        self.corners
            .iter()
            .fold(Vec3::repeat(f32::INFINITY), |acc, corner| acc.inf(&corner.coords))
    }

    /// Largest coordinate on each axis
    pub fn max(&self) -> Vec3 {
        self.corners
            .iter()
            .fold(Vec3::repeat(f32::NEG_INFINITY), |acc, corner| acc.sup(&corner.coords))
    }

    /// Full extents along each local axis
    pub fn extents(&self) -> Vec3 {
        self.max() - self.min()
    }

    /// Same box with every corner scaled component-wise
    pub fn scaled(&self, scale: &Vec3) -> Self {
        Self {
            corners: self
                .corners
                .map(|corner| Point3::from(corner.coords.component_mul(scale))),
        }
    }
}
