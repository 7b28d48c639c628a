//! Bounding-box to primitive sizing
//!
//! Turns an object's dimensions into the parameters of the requested
//! proxy shape, plus the rotation that aligns a Z-built cylinder with the
//! object's longest axis.

use crate::foundation::math::{utils, Quat, Vec3};
use super::shape::GeometryType;

/// Principal axis of an object's local frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Local X
    X,
    /// Local Y
    Y,
    /// Local Z
    Z,
}

impl Axis {
    /// Component index of this axis
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Axis holding the largest extent; earlier axes win ties
    pub fn longest(extents: &Vec3) -> Self {
        let mut longest = Self::X;
        for axis in [Self::Y, Self::Z] {
            if extents[axis.index()] > extents[longest.index()] {
                longest = axis;
            }
        }
        longest
    }

    /// Rotation that turns local Z onto this axis
    pub fn alignment(self) -> Quat {
        match self {
            Self::X => utils::quarter_turn_y(),
            Self::Y => utils::quarter_turn_x(),
            Self::Z => Quat::identity(),
        }
    }
}

/// Proxy parameters computed from an object's dimensions
#[derive(Debug, Clone, PartialEq)]
pub enum ProxySizing {
    /// Box with the source extents
    Box {
        /// Full extents
        size: Vec3,
    },
    /// Cylinder along the longest axis
    Cylinder {
        /// Cylinder radius
        radius: f32,
        /// Full length, equal to the longest extent
        height: f32,
        /// Axis the cylinder follows
        long_side: Axis,
    },
    /// Sphere over the longest extent
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Capsule along the longest axis, before the end caps are taken off
    Capsule {
        /// Cap and body radius
        radius: f32,
        /// Full length, equal to the longest extent
        height: f32,
        /// Axis the capsule follows
        long_side: Axis,
    },
    /// Geometry kind that cannot be generated yet
    Unsupported(GeometryType),
}

impl ProxySizing {
    /// Size a proxy of `kind` for an object with the given dimensions
    pub fn from_dimensions(kind: GeometryType, dimensions: &Vec3) -> Self {
        match kind {
            GeometryType::Box => Self::Box { size: *dimensions },
            GeometryType::Cylinder => {
                let (radius, height, long_side) = lengthwise(dimensions);
                Self::Cylinder { radius, height, long_side }
            }
            GeometryType::Capsule => {
                let (radius, height, long_side) = lengthwise(dimensions);
                Self::Capsule { radius, height, long_side }
            }
            GeometryType::Sphere => Self::Sphere {
                radius: dimensions.max() * 0.5,
            },
            GeometryType::Mesh => Self::Unsupported(kind),
        }
    }

    /// Rotation applied on top of the source orientation
    pub fn alignment(&self) -> Quat {
        match self {
            Self::Cylinder { long_side, .. } | Self::Capsule { long_side, .. } => {
                long_side.alignment()
            }
            _ => Quat::identity(),
        }
    }

    /// Geometry kind these parameters were computed for
    pub const fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Box { .. } => GeometryType::Box,
            Self::Cylinder { .. } => GeometryType::Cylinder,
            Self::Sphere { .. } => GeometryType::Sphere,
            Self::Capsule { .. } => GeometryType::Capsule,
            Self::Unsupported(kind) => *kind,
        }
    }
}

/// (radius, height, long side) for shapes that follow the longest axis
fn lengthwise(dimensions: &Vec3) -> (f32, f32, Axis) {
    let long_side = Axis::longest(dimensions);
    let height = dimensions[long_side.index()];
    let across = [Axis::X, Axis::Y, Axis::Z]
        .into_iter()
        .filter(|axis| *axis != long_side)
        .map(|axis| dimensions[axis.index()])
        .fold(0.0_f32, f32::max);
    // Flat or line-like objects fall back to a round cross-section
    let radius = if across > 0.0 { across * 0.5 } else { height * 0.5 };
    (radius, height, long_side)
}
