//! Names and materials for generated collision objects

use crate::config::ProxyConfig;
use crate::scene::SceneObject;

/// Swap a leading visual token for the collision token
///
/// `visual_arm1` becomes `collision_arm1`. Names that do not start with the
/// visual token are kept as they are.
pub fn collision_name(visual_name: &str, config: &ProxyConfig) -> String {
    let separator = config.name_separator.as_str();
    let mut parts: Vec<&str> = visual_name.split(separator).collect();
    if parts.first() == Some(&config.visual_prefix.as_str()) {
        parts[0] = config.collision_prefix.as_str();
    }
    parts.join(separator)
}

/// Name of the source's first material, or the configured sentinel
pub fn material_name(source: &SceneObject, config: &ProxyConfig) -> String {
    source
        .first_material()
        .unwrap_or(config.missing_material.as_str())
        .to_string()
}
