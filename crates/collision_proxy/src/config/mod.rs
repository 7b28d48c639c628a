//! Configuration system
//!
//! Configuration and scene files are read as TOML or RON, chosen by file
//! extension.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl FileFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a document in this format
    pub fn parse<T: for<'de> Deserialize<'de>>(self, contents: &str) -> Result<T, ConfigError> {
        match self {
            Self::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Self::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render a value as a document in this format
    pub fn render<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        match self {
            Self::Toml => {
                toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

/// Read and parse a TOML or RON file
pub fn read_document<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let format = FileFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)?;
    format.parse(&contents)
}

/// Serialize a value and write it as a TOML or RON file
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let contents = FileFormat::from_path(path)?.render(value)?;
    std::fs::write(path, contents).map_err(ConfigError::Io)
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_document(path.as_ref())
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_document(path.as_ref(), self)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Settings for collision proxy generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Leading name token that marks a visual object
    pub visual_prefix: String,

    /// Token that replaces the visual prefix on generated objects
    pub collision_prefix: String,

    /// Separator between name tokens
    pub name_separator: String,

    /// Material name used when the source has no material slot
    pub missing_material: String,

    /// Lower bound for the cylinder part of a capsule
    pub min_capsule_height: f32,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            visual_prefix: "visual".to_string(),
            collision_prefix: "collision".to_string(),
            name_separator: "_".to_string(),
            missing_material: "None".to_string(),
            min_capsule_height: 0.001,
        }
    }
}

impl Config for ProxyConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a/b.toml")).unwrap(), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new("scene.ron")).unwrap(), FileFormat::Ron);
        assert!(matches!(
            FileFormat::from_path(Path::new("scene.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: ProxyConfig = FileFormat::Toml
            .parse("collision_prefix = \"coll\"\nmin_capsule_height = 0.01\n")
            .unwrap();
        assert_eq!(config.collision_prefix, "coll");
        assert_eq!(config.visual_prefix, "visual");
        assert!((config.min_capsule_height - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ron_config_parses() {
        let config: ProxyConfig = FileFormat::Ron
            .parse("(missing_material: \"default_mat\")")
            .unwrap();
        assert_eq!(config.missing_material, "default_mat");
        assert_eq!(config.name_separator, "_");
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("proxy_config_{}.toml", std::process::id()));
        let config = ProxyConfig {
            visual_prefix: "vis".to_string(),
            ..ProxyConfig::default()
        };
        config.save_to_file(&path).unwrap();
        let loaded = ProxyConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
