//! Physics module for collision geometry
//!
//! Provides the collision shape model, proxy sizing and the layer table
//! used to sort robot-model objects.

pub mod collision;
pub mod collision_layers;

pub use collision::{
    Axis,
    CollisionGeometry,
    GeometryPart,
    GeometryType,
    ProxySizing,
};
pub use collision_layers::SceneLayers;
