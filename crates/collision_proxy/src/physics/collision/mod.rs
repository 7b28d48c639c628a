//! Collision proxy geometry
//!
//! # Module Organization
//!
//! - [`shape`] - Geometry kinds and model-space collision shapes
//! - [`sizing`] - Bounding-box to primitive sizing
//!
//! # Key Types
//!
//! - [`GeometryType`] - Requested proxy kind (box, cylinder, sphere, capsule, mesh)
//! - [`CollisionGeometry`] - Model-space shape stored on a scene object
//! - [`ProxySizing`] - Shape parameters derived from object dimensions

pub mod shape;
pub mod sizing;

// Re-export commonly used types
pub use shape::{box_corners, CollisionGeometry, GeometryPart, GeometryType, GeometryTypeParseError};
pub use sizing::{Axis, ProxySizing};
