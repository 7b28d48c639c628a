//! Scene files
//!
//! A serde description of a scene with parents referenced by name. Read
//! and written as RON or TOML through the config file helpers.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{read_document, write_document, ConfigError};
use crate::foundation::math::{EulerXyz, Transform, Vec3};
use crate::physics::{CollisionGeometry, SceneLayers};
use super::bounding_box::BoundingBox;
use super::object::{ObjectRole, ParentType, PropertyValue, SceneObject};
use super::{ObjectId, Scene, SceneError};

const fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// One object as stored in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    /// Object name
    pub name: String,
    /// Classification tag
    #[serde(default)]
    pub role: ObjectRole,
    /// Layers; defaults to the role's layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<SceneLayers>,
    /// World position
    #[serde(default)]
    pub location: [f32; 3],
    /// World rotation as XYZ Euler angles in radians
    #[serde(default)]
    pub rotation_euler: [f32; 3],
    /// World scale
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Local bounding-box minimum
    #[serde(default)]
    pub bound_min: [f32; 3],
    /// Local bounding-box maximum
    #[serde(default)]
    pub bound_max: [f32; 3],
    /// Material slots
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<String>,
    /// Parent object name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Parent binding
    #[serde(default)]
    pub parent_type: ParentType,
    /// Parent bone name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_bone: Option<String>,
    /// Selection state
    #[serde(default)]
    pub selected: bool,
    /// Custom properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,
    /// Collision geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<CollisionGeometry>,
}

impl ObjectDescription {
    fn from_object(object: &SceneObject, parent: Option<String>) -> Self {
        let transform = &object.transform;
        Self {
            name: object.name.clone(),
            role: object.role,
            layers: Some(object.layers),
            location: transform.position.into(),
            rotation_euler: transform.euler().to_array(),
            scale: transform.scale.into(),
            bound_min: object.bound_box.min().into(),
            bound_max: object.bound_box.max().into(),
            materials: object.materials.clone(),
            parent,
            parent_type: object.parent_type,
            parent_bone: object.parent_bone.clone(),
            selected: object.selected,
            properties: object.properties.clone(),
            geometry: object.geometry.clone(),
        }
    }

    fn to_object(&self) -> SceneObject {
        let transform = Transform::new(
            Vec3::from(self.location),
            EulerXyz::from(self.rotation_euler).to_rotation(),
            Vec3::from(self.scale),
        );
        let mut object = SceneObject::new(self.name.clone(), self.role)
            .with_transform(transform)
            .with_bound_box(BoundingBox::from_min_max(
                Vec3::from(self.bound_min),
                Vec3::from(self.bound_max),
            ));
        if let Some(layers) = self.layers {
            object.layers = layers;
        }
        object.materials = self.materials.clone();
        object.parent_type = self.parent_type;
        object.parent_bone = self.parent_bone.clone();
        object.selected = self.selected;
        object.properties = self.properties.clone();
        // Stored bounds win over the ones derived from the geometry
        object.geometry = self.geometry.clone();
        object
    }
}

/// A scene as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Objects in scene order
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

/// Errors while loading or saving scene files
#[derive(thiserror::Error, Debug)]
pub enum SceneFileError {
    /// The file could not be read, parsed or written
    #[error(transparent)]
    File(#[from] ConfigError),

    /// The file content does not form a valid scene
    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl SceneFile {
    /// Read a scene file (`.ron` or `.toml`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_document(path.as_ref())
    }

    /// Write a scene file (`.ron` or `.toml`)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_document(path.as_ref(), self)
    }

    /// Describe a scene
    pub fn from_scene(scene: &Scene) -> Self {
        let objects = scene
            .iter()
            .map(|(_, object)| {
                let parent = object
                    .parent
                    .and_then(|parent| scene.get(parent))
                    .map(|parent| parent.name.clone());
                ObjectDescription::from_object(object, parent)
            })
            .collect();
        Self { objects }
    }

    /// Build the described scene
    ///
    /// Parent names resolve to the first object carrying that name.
    pub fn to_scene(&self) -> Result<Scene, SceneError> {
        let mut scene = Scene::new();
        let mut by_name: HashMap<&str, ObjectId> = HashMap::new();
        let mut ids = Vec::with_capacity(self.objects.len());
        for description in &self.objects {
            let id = scene.add(description.to_object());
            by_name.entry(description.name.as_str()).or_insert(id);
            ids.push(id);
        }

        for (description, &id) in self.objects.iter().zip(&ids) {
            let Some(parent_name) = &description.parent else {
                continue;
            };
            let parent = *by_name.get(parent_name.as_str()).ok_or_else(|| {
                SceneError::UnknownParentName {
                    child: description.name.clone(),
                    parent: parent_name.clone(),
                }
            })?;
            scene.set_parent(
                id,
                parent,
                description.parent_type,
                description.parent_bone.clone(),
            )?;
        }
        Ok(scene)
    }
}

/// Load a scene file straight into a [`Scene`]
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, SceneFileError> {
    Ok(SceneFile::load(path)?.to_scene()?)
}

/// Write a [`Scene`] to a scene file
pub fn save_scene(scene: &Scene, path: impl AsRef<Path>) -> Result<(), SceneFileError> {
    Ok(SceneFile::from_scene(scene).save(path)?)
}
