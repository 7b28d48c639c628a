//! Scene container and the editing operations proxies are built from
//!
//! Objects keep world transforms. Parenting only records the relation, so
//! a child keeps its world placement when it is parented or unparented.

use slotmap::SlotMap;

use crate::foundation::math::{Point3, Quat, Transform, Vec3};
use crate::physics::{CollisionGeometry, GeometryPart, SceneLayers};
use super::object::{ObjectRole, ParentType, SceneObject};
use super::{ObjectId, SceneError};

/// Parameters for [`Scene::create_primitive`]
#[derive(Debug, Clone)]
pub struct PrimitiveSpec {
    /// Requested name; made unique on insertion
    pub name: String,
    /// Shape of the primitive
    pub geometry: CollisionGeometry,
    /// Classification tag
    pub role: ObjectRole,
    /// Layers to place the primitive on
    pub layers: SceneLayers,
    /// Material for the first slot
    pub material: Option<String>,
    /// World position
    pub position: Vec3,
    /// World rotation
    pub rotation: Quat,
}

/// An owned scene of robot-model objects
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneObject>,
    /// Insertion order, for stable iteration
    order: Vec<ObjectId>,
    active: Option<ObjectId>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, renaming it if the name is taken
    pub fn add(&mut self, mut object: SceneObject) -> ObjectId {
        object.name = self.unique_name(&object.name);
        let id = self.objects.insert(object);
        self.order.push(id);
        id
    }

    /// Remove an object; its children lose their parent
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let object = self.objects.remove(id)?;
        self.order.retain(|other| *other != id);
        if self.active == Some(id) {
            self.active = None;
        }
        for child in self.objects.values_mut().filter(|o| o.parent == Some(id)) {
            child.parent = None;
            child.parent_type = ParentType::Object;
            child.parent_bone = None;
        }
        Some(object)
    }

    /// Look up an object
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Look up an object mutably
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// Look up an object, failing with [`SceneError::UnknownObject`]
    pub fn object(&self, id: ObjectId) -> Result<&SceneObject, SceneError> {
        self.objects.get(id).ok_or(SceneError::UnknownObject(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, SceneError> {
        self.objects.get_mut(id).ok_or(SceneError::UnknownObject(id))
    }

    /// Whether the id refers to a live object
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.order.iter().map(move |id| (*id, &self.objects[*id]))
    }

    /// First object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.iter().find(|(_, o)| o.name == name).map(|(id, _)| id)
    }

    /// Direct children of an object
    pub fn children(&self, parent: ObjectId) -> Vec<ObjectId> {
        self.iter()
            .filter(|(_, o)| o.parent == Some(parent))
            .map(|(id, _)| id)
            .collect()
    }

    /// `base`, or `base.NNN` with the first free counter
    pub fn unique_name(&self, base: &str) -> String {
        let taken = |name: &str| self.objects.values().any(|o| o.name == name);
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Currently selected objects, in insertion order
    pub fn selected(&self) -> Vec<ObjectId> {
        self.iter()
            .filter(|(_, o)| o.selected)
            .map(|(id, _)| id)
            .collect()
    }

    /// Active object
    pub const fn active(&self) -> Option<ObjectId> {
        self.active
    }

    /// Make an object active
    pub fn set_active(&mut self, id: Option<ObjectId>) {
        self.active = id.filter(|id| self.objects.contains_key(*id));
    }

    /// Deselect every object
    pub fn deselect_all(&mut self) {
        for object in self.objects.values_mut() {
            object.selected = false;
        }
    }

    /// Select `ids`, optionally clearing the previous selection first, and
    /// make `ids[active]` the active object
    pub fn select_objects(&mut self, ids: &[ObjectId], clear: bool, active: Option<usize>) {
        if clear {
            self.deselect_all();
        }
        for id in ids {
            if let Some(object) = self.objects.get_mut(*id) {
                object.selected = true;
            }
        }
        if let Some(index) = active {
            self.set_active(ids.get(index).copied());
        }
    }

    /// Create a primitive collision object at a world pose
    pub fn create_primitive(&mut self, spec: PrimitiveSpec) -> ObjectId {
        let mut object = SceneObject::new(spec.name, spec.role)
            .with_transform(Transform::from_position_rotation(spec.position, spec.rotation))
            .with_geometry(spec.geometry);
        object.layers = spec.layers;
        object.materials.extend(spec.material);
        self.add(object)
    }

    /// Merge the geometry of `others` into `target` and remove them
    ///
    /// The target keeps its transform. Joined parts are re-expressed in the
    /// target's local frame.
    pub fn join(&mut self, target: ObjectId, others: &[ObjectId]) -> Result<(), SceneError> {
        let target_transform = self.object(target)?.transform.clone();
        let mut parts = match self.object(target)?.geometry.clone() {
            Some(CollisionGeometry::Compound(parts)) => parts,
            Some(geometry) => vec![GeometryPart::at(Vec3::zeros(), geometry)],
            None => Vec::new(),
        };

        for &id in others.iter().filter(|id| **id != target) {
            let other = self.object(id)?;
            if let Some(geometry) = &other.geometry {
                let offset = target_transform
                    .inverse_transform_point(&Point3::from(other.transform.position))
                    .coords;
                let relative_scale = other.transform.scale.component_div(&target_transform.scale);
                parts.push(GeometryPart {
                    offset,
                    rotation: target_transform.rotation.inverse() * other.transform.rotation,
                    geometry: geometry.scaled(&relative_scale),
                });
            }
        }
        for &id in others.iter().filter(|id| **id != target) {
            self.remove(id);
        }

        let object = self.object_mut(target)?;
        if !parts.is_empty() {
            object.set_geometry(CollisionGeometry::Compound(parts));
        }
        Ok(())
    }

    /// Bake the object's scale into its geometry and bounding box
    pub fn apply_scale(&mut self, id: ObjectId) -> Result<(), SceneError> {
        let object = self.object_mut(id)?;
        let scale = object.transform.scale;
        if let Some(geometry) = object.geometry.take() {
            object.set_geometry(geometry.scaled(&scale));
        } else {
            object.bound_box = object.bound_box.scaled(&scale);
        }
        object.transform.scale = Vec3::new(1.0, 1.0, 1.0);
        Ok(())
    }

    /// Parent `child` to `parent` with the given binding, keeping the
    /// child's world transform
    pub fn set_parent(
        &mut self,
        child: ObjectId,
        parent: ObjectId,
        parent_type: ParentType,
        parent_bone: Option<String>,
    ) -> Result<(), SceneError> {
        let child_name = self.object(child)?.name.clone();
        let parent_name = self.object(parent)?.name.clone();

        if self.ancestors(parent).contains(&child) || child == parent {
            return Err(SceneError::ParentCycle {
                child: child_name,
                parent: parent_name,
            });
        }
        let parent_bone = parent_bone.filter(|bone| !bone.is_empty());
        if parent_type == ParentType::Bone && parent_bone.is_none() {
            return Err(SceneError::MissingParentBone { child: child_name });
        }

        let object = self.object_mut(child)?;
        object.parent = Some(parent);
        object.parent_type = parent_type;
        object.parent_bone = parent_bone;
        Ok(())
    }

    /// Detach an object from its parent, keeping its world transform
    pub fn clear_parent(&mut self, child: ObjectId) -> Result<(), SceneError> {
        let object = self.object_mut(child)?;
        object.parent = None;
        object.parent_type = ParentType::Object;
        object.parent_bone = None;
        Ok(())
    }

    /// Chain of parents from the direct parent up to the root
    pub fn ancestors(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(|o| o.parent);
        while let Some(parent) = current {
            if chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self.get(parent).and_then(|o| o.parent);
        }
        chain
    }

    /// Transform of an object relative to its parent
    pub fn local_transform(&self, id: ObjectId) -> Result<Transform, SceneError> {
        let object = self.object(id)?;
        match object.parent.and_then(|parent| self.get(parent)) {
            Some(parent) => Ok(parent.transform.inverse().combine(&object.transform)),
            None => Ok(object.transform.clone()),
        }
    }
}
