//! Scene model
//!
//! An explicit, owned replacement for an authoring tool's live scene graph.
//! Objects are stored in a slotmap and refer to each other by [`ObjectId`],
//! so every operation takes the scene by reference and can be tested
//! without a host application.

pub mod bounding_box;
pub mod object;
pub mod scene_file;
pub mod scene_graph;

pub use bounding_box::BoundingBox;
pub use object::{ObjectRole, ParentType, PropertyValue, SceneObject};
pub use scene_file::{load_scene, save_scene, ObjectDescription, SceneFile, SceneFileError};
pub use scene_graph::{PrimitiveSpec, Scene};

slotmap::new_key_type! {
    /// Stable handle to an object in a [`Scene`]
    pub struct ObjectId;
}

/// Scene errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to a live object
    #[error("Unknown object: {0:?}")]
    UnknownObject(ObjectId),

    /// Bone parenting requested without naming the bone
    #[error("Object '{child}' is bone-parented but has no parent bone")]
    MissingParentBone {
        /// Child object name
        child: String,
    },

    /// The requested parent is the child itself or one of its descendants
    #[error("Parenting '{child}' to '{parent}' would create a cycle")]
    ParentCycle {
        /// Child object name
        child: String,
        /// Requested parent name
        parent: String,
    },

    /// A scene file names a parent that is not in the file
    #[error("Object '{child}' refers to unknown parent '{parent}'")]
    UnknownParentName {
        /// Child object name
        child: String,
        /// Missing parent name
        parent: String,
    },
}
