//! Collision proxy generation
//!
//! [`CollisionProxyBuilder`] does the work; [`CreateCollisionObjects`] wraps
//! it as an editor command that reports failures and answers with
//! [`OperatorResult::Finished`] or [`OperatorResult::Cancelled`].

pub mod builder;
pub mod naming;

#[cfg(test)]
mod tests;

pub use builder::{
    BuildReport, CollisionProxyBuilder, ProxyError, ProxyPlan, ProxyRecord,
    GEOMETRY_TYPE_PROPERTY, HEIGHT_PROPERTY, RADIUS_PROPERTY,
};
pub use naming::{collision_name, material_name};

use log::{error, info};

use crate::config::ProxyConfig;
use crate::physics::GeometryType;
use crate::scene::Scene;

/// How a command invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorResult {
    /// The command ran to completion
    Finished,
    /// The command stopped without completing
    Cancelled,
}

/// Command: create collision objects for all selected visual objects
#[derive(Debug, Clone, Default)]
pub struct CreateCollisionObjects {
    /// Geometry kind to generate
    pub geometry_type: GeometryType,
    builder: CollisionProxyBuilder,
}

impl CreateCollisionObjects {
    /// Command identifier
    pub const ID: &'static str = "object.create_collision_objects";

    /// Command label
    pub const LABEL: &'static str = "Create collision objects for all selected Links";

    /// Create the command for one geometry kind
    pub fn new(geometry_type: GeometryType) -> Self {
        Self {
            geometry_type,
            builder: CollisionProxyBuilder::new(),
        }
    }

    /// Use custom builder settings
    #[must_use]
    pub fn with_config(mut self, config: ProxyConfig) -> Self {
        self.builder = CollisionProxyBuilder::with_config(config);
        self
    }

    /// Run the command and return the detailed report
    pub fn run(&self, scene: &mut Scene) -> Result<BuildReport, ProxyError> {
        self.builder.build(scene, self.geometry_type)
    }

    /// Run the command, logging any failure
    pub fn execute(&self, scene: &mut Scene) -> OperatorResult {
        match self.run(scene) {
            Ok(report) => {
                info!(
                    "{}: {} created, {} unsupported",
                    Self::ID,
                    report.created.len(),
                    report.unsupported.len()
                );
                OperatorResult::Finished
            }
            Err(ProxyError::NotEnoughInputs) => {
                error!("CreateCollisions Error: {}", ProxyError::NotEnoughInputs);
                OperatorResult::Cancelled
            }
            Err(err) => {
                error!("{} failed: {}", Self::ID, err);
                OperatorResult::Cancelled
            }
        }
    }
}
