//! Scene objects of a robot model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Point3, Transform, Vec3};
use crate::physics::{CollisionGeometry, SceneLayers};
use super::bounding_box::BoundingBox;
use super::ObjectId;

/// Classification tag of a robot-model object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectRole {
    /// Link skeleton
    Link,
    /// Inertial marker
    Inertial,
    /// Rendered appearance of a link
    Visual,
    /// Simplified geometry for collision checks
    Collision,
    /// Sensor
    Sensor,
    /// Untagged object
    #[default]
    Other,
}

impl ObjectRole {
    /// Layer objects of this role are placed on
    pub const fn layers(self) -> SceneLayers {
        match self {
            Self::Link => SceneLayers::LINK,
            Self::Inertial => SceneLayers::INERTIAL,
            Self::Visual => SceneLayers::VISUAL,
            Self::Collision => SceneLayers::COLLISION,
            Self::Sensor => SceneLayers::SENSOR,
            Self::Other => SceneLayers::OTHER,
        }
    }
}

/// How a child is bound to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentType {
    /// Follows the parent object
    #[default]
    Object,
    /// Follows one bone of the parent armature
    Bone,
}

/// Custom property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Numeric property
    Float(f32),
    /// Text property
    Text(String),
}

impl PropertyValue {
    /// Numeric value, if this is one
    pub const fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Text value, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Float(_) => None,
        }
    }
}

/// An object in the scene
///
/// Transforms are stored in world space. Parent links are ids into the
/// owning [`Scene`](super::Scene).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Unique name within the scene
    pub name: String,
    /// Classification tag
    pub role: ObjectRole,
    /// Layers the object is shown on
    pub layers: SceneLayers,
    /// Local-space bounding box
    pub bound_box: BoundingBox,
    /// World transform
    pub transform: Transform,
    /// Material slot names, first slot first
    pub materials: Vec<String>,
    /// Parent object
    pub parent: Option<ObjectId>,
    /// Parent binding
    pub parent_type: ParentType,
    /// Parent bone for [`ParentType::Bone`]
    pub parent_bone: Option<String>,
    /// Selection state
    pub selected: bool,
    /// Collision shape, for generated proxies
    pub geometry: Option<CollisionGeometry>,
    /// Custom properties
    pub properties: BTreeMap<String, PropertyValue>,
}

impl SceneObject {
    /// Create an unparented object with an empty bounding box
    pub fn new(name: impl Into<String>, role: ObjectRole) -> Self {
        Self {
            name: name.into(),
            role,
            layers: role.layers(),
            bound_box: BoundingBox::default(),
            transform: Transform::identity(),
            materials: Vec::new(),
            parent: None,
            parent_type: ParentType::Object,
            parent_bone: None,
            selected: false,
            geometry: None,
            properties: BTreeMap::new(),
        }
    }

    /// Set the local bounding box
    #[must_use]
    pub fn with_bound_box(mut self, bound_box: BoundingBox) -> Self {
        self.bound_box = bound_box;
        self
    }

    /// Set the world transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Append a material slot
    #[must_use]
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.materials.push(material.into());
        self
    }

    /// Mark the object selected
    #[must_use]
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Attach collision geometry and fit the bounding box to it
    #[must_use]
    pub fn with_geometry(mut self, geometry: CollisionGeometry) -> Self {
        self.set_geometry(geometry);
        self
    }

    /// Replace the collision geometry and refit the bounding box
    pub fn set_geometry(&mut self, geometry: CollisionGeometry) {
        let (min, max) = geometry.local_bounds();
        self.bound_box = BoundingBox::from_min_max(min, max);
        self.geometry = Some(geometry);
    }

    /// Extents of the object in world units (bounding box times scale)
    pub fn dimensions(&self) -> Vec3 {
        self.bound_box
            .extents()
            .component_mul(&utils::abs(&self.transform.scale))
    }

    /// Bounding-box center in local space
    pub fn local_center(&self) -> Point3 {
        self.bound_box.center()
    }

    /// Name of the first material slot
    pub fn first_material(&self) -> Option<&str> {
        self.materials.first().map(String::as_str)
    }

    /// Set a custom property
    pub fn set_property(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.properties.insert(key.into(), value);
    }

    /// Numeric custom property
    pub fn float_property(&self, key: &str) -> Option<f32> {
        self.properties.get(key).and_then(PropertyValue::as_float)
    }

    /// Text custom property
    pub fn text_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(PropertyValue::as_text)
    }
}
