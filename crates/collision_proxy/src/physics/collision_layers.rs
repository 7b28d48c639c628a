//! Layer table for robot-model scenes
//!
//! Every object class of a robot model lives on its own layer so that
//! visuals, collision proxies and the link skeleton can be shown or hidden
//! independently.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Scene layers an object is placed on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SceneLayers: u32 {
        /// Link skeleton (armatures, joints)
        const LINK = 1 << 0;
        /// Inertial markers
        const INERTIAL = 1 << 1;
        /// Rendered visual meshes
        const VISUAL = 1 << 2;
        /// Collision proxies
        const COLLISION = 1 << 3;
        /// Sensors
        const SENSOR = 1 << 4;
        /// Anything else
        const OTHER = 1 << 5;
    }
}

impl Default for SceneLayers {
    fn default() -> Self {
        Self::OTHER
    }
}

impl SceneLayers {
    /// Whether two layer sets share at least one layer
    pub const fn overlaps(self, other: Self) -> bool {
        self.intersects(other)
    }

    /// Helper to create a mask from multiple layers
    pub fn mask(layers: &[Self]) -> Self {
        layers.iter().fold(Self::empty(), |acc, &layer| acc | layer)
    }
}
