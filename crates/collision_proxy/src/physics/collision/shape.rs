//! Collision geometry kinds and shape payloads
//!
//! Shapes are stored in the owning object's local space. The object's
//! transform places them in the world.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Point3, Quat, Vec3};

/// Geometry kinds a collision proxy can be built as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    /// Axis-aligned box matching the source dimensions
    #[default]
    Box,
    /// Cylinder along the longest source axis
    Cylinder,
    /// Sphere enclosing the longest source extent
    Sphere,
    /// Cylinder capped by two spheres
    Capsule,
    /// Copy of the source mesh (not supported yet)
    Mesh,
}

impl GeometryType {
    /// Every geometry kind, in menu order
    pub const ALL: [Self; 5] = [Self::Box, Self::Cylinder, Self::Sphere, Self::Capsule, Self::Mesh];

    /// Name stored in the `geometryType` property
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Cylinder => "cylinder",
            Self::Sphere => "sphere",
            Self::Capsule => "capsule",
            Self::Mesh => "mesh",
        }
    }

    /// Human readable description
    pub const fn description(self) -> &'static str {
        match self {
            Self::Box => "Box",
            Self::Cylinder => "Cylinder",
            Self::Sphere => "Sphere",
            Self::Capsule => "Capsule",
            Self::Mesh => "Mesh",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known geometry kind
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown geometry type: {0}")]
pub struct GeometryTypeParseError(pub String);

impl FromStr for GeometryType {
    type Err = GeometryTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeometryTypeParseError(s.to_string()))
    }
}

/// Collision geometry attached to a scene object (MODEL SPACE)
///
/// Primitives are centered on the object's origin. Cylinders run along
/// local Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollisionGeometry {
    /// Box with full extents along X, Y and Z
    Box {
        /// Full extents
        size: Vec3,
    },
    /// Cylinder along local Z
    Cylinder {
        /// Cylinder radius
        radius: f32,
        /// Full length along Z
        height: f32,
    },
    /// Sphere
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Several primitives joined into one object
    Compound(Vec<GeometryPart>),
}

/// One primitive inside a joined object, relative to the object's origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPart {
    /// Offset from the object's origin
    pub offset: Vec3,
    /// Rotation relative to the object
    pub rotation: Quat,
    /// The part's own geometry
    pub geometry: CollisionGeometry,
}

impl GeometryPart {
    /// Part placed at `offset` without extra rotation
    pub fn at(offset: Vec3, geometry: CollisionGeometry) -> Self {
        Self {
            offset,
            rotation: Quat::identity(),
            geometry,
        }
    }
}

impl CollisionGeometry {
    /// Local-space bounds as (min, max)
    pub fn local_bounds(&self) -> (Vec3, Vec3) {
        match self {
            Self::Box { size } => (-*size * 0.5, *size * 0.5),
            Self::Cylinder { radius, height } => {
                let half = Vec3::new(*radius, *radius, *height * 0.5);
                (-half, half)
            }
            Self::Sphere { radius } => {
                let half = Vec3::repeat(*radius);
                (-half, half)
            }
            Self::Compound(parts) => {
                let mut min = Vec3::repeat(f32::INFINITY);
                let mut max = Vec3::repeat(f32::NEG_INFINITY);
                for part in parts {
                    let (part_min, part_max) = part.geometry.local_bounds();
                    for corner in box_corners(&part_min, &part_max) {
                        let placed = part.offset + part.rotation * corner.coords;
                        min = min.inf(&placed);
                        max = max.sup(&placed);
                    }
                }
                if parts.is_empty() {
                    (Vec3::zeros(), Vec3::zeros())
                } else {
                    (min, max)
                }
            }
        }
    }

    /// Bake a scale into the geometry
    ///
    /// Round shapes take the largest relevant factor so they stay round.
    /// Rotated compound parts receive the scale re-expressed in their own
    /// frame, which is exact only for axis-aligned parts.
    pub fn scaled(&self, scale: &Vec3) -> Self {
        let scale = utils::abs(scale);
        match self {
            Self::Box { size } => Self::Box {
                size: size.component_mul(&scale),
            },
            Self::Cylinder { radius, height } => Self::Cylinder {
                radius: radius * scale.x.max(scale.y),
                height: height * scale.z,
            },
            Self::Sphere { radius } => Self::Sphere {
                radius: radius * scale.max(),
            },
            Self::Compound(parts) => Self::Compound(
                parts
                    .iter()
                    .map(|part| GeometryPart {
                        offset: part.offset.component_mul(&scale),
                        rotation: part.rotation,
                        geometry: part
                            .geometry
                            .scaled(&utils::abs(&(part.rotation.inverse() * scale))),
                    })
                    .collect(),
            ),
        }
    }
}

/// The 8 corners of an axis-aligned box
pub fn box_corners(min: &Vec3, max: &Vec3) -> [Point3; 8] {
    [
        Point3::new(min.x, min.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(min.x, max.y, max.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(max.x, max.y, min.z),
    ]
}
