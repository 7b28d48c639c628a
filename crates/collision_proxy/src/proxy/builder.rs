//! Collision proxy builder
//!
//! For every selected visual object the builder sizes a primitive from the
//! object's bounding box, places it at the box center in world space and
//! hangs it under the visual's parent with the same binding.

use log::{debug, info, warn};

use crate::config::ProxyConfig;
use crate::foundation::math::{EulerXyz, Quat, Vec3};
use crate::physics::{CollisionGeometry, GeometryType, ProxySizing, SceneLayers};
use crate::scene::{
    ObjectId, ObjectRole, PrimitiveSpec, PropertyValue, Scene, SceneError, SceneObject,
};
use super::naming::{collision_name, material_name};

/// Property holding the geometry kind of a collision object
pub const GEOMETRY_TYPE_PROPERTY: &str = "geometryType";
/// Capsule property holding the length of the cylinder part
pub const HEIGHT_PROPERTY: &str = "height";
/// Capsule property holding the radius
pub const RADIUS_PROPERTY: &str = "radius";

/// Proxy builder errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// No visual object was selected
    #[error("Not enough bodies selected.")]
    NotEnoughInputs,

    /// The scene rejected an edit
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Where and how one proxy will be created
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyPlan {
    /// Name of the new object
    pub name: String,
    /// Material for the new object, `None` when the source has none
    pub material: Option<String>,
    /// Bounding-box center in world space
    pub center: Vec3,
    /// Source orientation composed with the shape alignment
    pub orientation: Quat,
    /// Shape parameters
    pub sizing: ProxySizing,
}

impl ProxyPlan {
    /// Orientation as XYZ Euler angles
    pub fn rotation_euler(&self) -> EulerXyz {
        EulerXyz::from_rotation(&self.orientation)
    }
}

/// One generated proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyRecord {
    /// Visual object the proxy was built for
    pub source: ObjectId,
    /// The new collision object
    pub proxy: ObjectId,
}

/// Outcome of one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Geometry kind that was requested
    pub geometry_type: GeometryType,
    /// Proxies created, in source order
    pub created: Vec<ProxyRecord>,
    /// Sources skipped because the kind cannot be generated yet
    pub unsupported: Vec<ObjectId>,
}

impl BuildReport {
    fn new(geometry_type: GeometryType) -> Self {
        Self {
            geometry_type,
            created: Vec::new(),
            unsupported: Vec::new(),
        }
    }
}

/// Builds collision proxies for the selected visual objects of a scene
#[derive(Debug, Clone, Default)]
pub struct CollisionProxyBuilder {
    config: ProxyConfig,
}

impl CollisionProxyBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom settings
    pub const fn with_config(config: ProxyConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub const fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Build one proxy of `geometry_type` per selected visual object
    ///
    /// The whole selection is cleared first. Sources are processed one by
    /// one; a scene error stops the batch and leaves earlier proxies in
    /// place.
    pub fn build(
        &self,
        scene: &mut Scene,
        geometry_type: GeometryType,
    ) -> Result<BuildReport, ProxyError> {
        let visuals: Vec<ObjectId> = scene
            .selected()
            .into_iter()
            .filter(|id| scene.get(*id).is_some_and(|o| o.role == ObjectRole::Visual))
            .collect();
        scene.deselect_all();

        if visuals.is_empty() {
            return Err(ProxyError::NotEnoughInputs);
        }

        let mut report = BuildReport::new(geometry_type);
        for source in visuals {
            match self.build_proxy(scene, source, geometry_type)? {
                Some(proxy) => report.created.push(ProxyRecord { source, proxy }),
                None => report.unsupported.push(source),
            }
        }
        Ok(report)
    }

    /// Work out name, pose and size of the proxy for one source
    pub fn plan(&self, source: &SceneObject, geometry_type: GeometryType) -> ProxyPlan {
        let material = material_name(source, &self.config);
        let sizing = ProxySizing::from_dimensions(geometry_type, &source.dimensions());
        let transform = &source.transform;
        // Scale is left out here; dimensions already carry it
        let center = transform.position + transform.rotation * source.local_center().coords;
        // Objects moved off their bounding-box center get no rotation beyond
        // the alignment turn
        let orientation = transform.rotation * sizing.alignment();

        ProxyPlan {
            name: collision_name(&source.name, &self.config),
            material: (material != self.config.missing_material).then_some(material),
            center,
            orientation,
            sizing,
        }
    }

    fn build_proxy(
        &self,
        scene: &mut Scene,
        source: ObjectId,
        geometry_type: GeometryType,
    ) -> Result<Option<ObjectId>, ProxyError> {
        let source_object = scene.object(source)?;
        let plan = self.plan(source_object, geometry_type);
        let source_name = source_object.name.clone();
        let parent_binding = source_object.parent.map(|parent| {
            (
                parent,
                source_object.parent_type,
                source_object.parent_bone.clone(),
            )
        });
        debug!(
            "Sizing {} proxy for '{}': {:?}, center {:?}, rotation {:?}",
            geometry_type,
            source_name,
            plan.sizing,
            plan.center,
            plan.rotation_euler()
        );

        let proxy = match plan.sizing {
            ProxySizing::Box { size } => {
                self.create(scene, &plan, &plan.name, CollisionGeometry::Box { size }, plan.center)
            }
            ProxySizing::Cylinder { radius, height, .. } => self.create(
                scene,
                &plan,
                &plan.name,
                CollisionGeometry::Cylinder { radius, height },
                plan.center,
            ),
            ProxySizing::Sphere { radius } => {
                self.create(scene, &plan, &plan.name, CollisionGeometry::Sphere { radius }, plan.center)
            }
            ProxySizing::Capsule { radius, height, .. } => {
                self.create_capsule(scene, &plan, radius, height)?
            }
            ProxySizing::Unsupported(kind) => {
                warn!(
                    "Skipping '{}': {} collision objects are not supported yet",
                    source_name, kind
                );
                return Ok(None);
            }
        };

        let object = scene.get_mut(proxy).ok_or(SceneError::UnknownObject(proxy))?;
        object.set_property(
            GEOMETRY_TYPE_PROPERTY,
            PropertyValue::Text(geometry_type.as_str().to_string()),
        );
        let proxy_name = object.name.clone();
        scene.select_objects(&[proxy], true, Some(0));

        if let Some((parent, parent_type, parent_bone)) = parent_binding {
            scene.apply_scale(proxy)?;
            scene.select_objects(&[parent], false, Some(0));
            scene.set_parent(proxy, parent, parent_type, parent_bone)?;
        }

        info!(
            "Created {} collision object '{}' for '{}'",
            geometry_type, proxy_name, source_name
        );
        Ok(Some(proxy))
    }

    fn create(
        &self,
        scene: &mut Scene,
        plan: &ProxyPlan,
        name: &str,
        geometry: CollisionGeometry,
        position: Vec3,
    ) -> ObjectId {
        scene.create_primitive(PrimitiveSpec {
            name: name.to_string(),
            geometry,
            role: ObjectRole::Collision,
            layers: SceneLayers::COLLISION,
            material: plan.material.clone(),
            position,
            rotation: plan.orientation,
        })
    }

    /// Cylinder plus two end spheres, joined into the cylinder object
    fn create_capsule(
        &self,
        scene: &mut Scene,
        plan: &ProxyPlan,
        radius: f32,
        full_height: f32,
    ) -> Result<ObjectId, ProxyError> {
        let height = (full_height - 2.0 * radius).max(self.config.min_capsule_height);
        let shift = plan.orientation * Vec3::new(0.0, 0.0, height * 0.5);

        let body = self.create(
            scene,
            plan,
            &plan.name,
            CollisionGeometry::Cylinder { radius, height },
            plan.center,
        );
        let top = self.create(scene, plan, "tmpsph1", CollisionGeometry::Sphere { radius }, plan.center + shift);
        let bottom = self.create(scene, plan, "tmpsph2", CollisionGeometry::Sphere { radius }, plan.center - shift);

        scene.select_objects(&[body, top, bottom], true, Some(0));
        scene.join(body, &[top, bottom])?;

        let object = scene.get_mut(body).ok_or(SceneError::UnknownObject(body))?;
        object.set_property(HEIGHT_PROPERTY, PropertyValue::Float(height));
        object.set_property(RADIUS_PROPERTY, PropertyValue::Float(radius));
        Ok(body)
    }
}
