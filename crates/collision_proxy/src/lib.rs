//! # Collision Proxy
//!
//! Generates simplified collision geometry for the visual meshes of a robot
//! model.
//!
//! ## Features
//!
//! - **Explicit Scene Model**: Objects, parenting and selection in an owned [`scene::Scene`]
//! - **Proxy Shapes**: Box, cylinder, sphere and capsule sized from bounding boxes
//! - **Parent Binding**: Proxies hang under the same parent, bone included
//! - **Scene Files**: RON and TOML scene descriptions
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_proxy::prelude::*;
//!
//! let mut scene = Scene::new();
//! scene.add(
//!     SceneObject::new("visual_arm1", ObjectRole::Visual)
//!         .with_bound_box(BoundingBox::from_size(Vec3::new(0.1, 0.1, 0.4)))
//!         .selected(),
//! );
//!
//! let command = CreateCollisionObjects::new(GeometryType::Capsule);
//! assert_eq!(command.execute(&mut scene), OperatorResult::Finished);
//! assert!(scene.find_by_name("collision_arm1").is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod scene;
pub mod proxy;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ProxyConfig},
        foundation::math::{EulerXyz, Quat, Transform, Vec3},
        physics::{CollisionGeometry, GeometryType, ProxySizing, SceneLayers},
        proxy::{
            BuildReport, CollisionProxyBuilder, CreateCollisionObjects, OperatorResult,
            ProxyError,
        },
        scene::{
            BoundingBox, ObjectId, ObjectRole, ParentType, PropertyValue, Scene, SceneFile,
            SceneObject,
        },
    };
}
