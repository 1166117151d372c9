//! Schema configuration loaded from TOML.
//!
//! ```toml
//! [prefixes]
//! project = "projectSoftwareType"
//! settings = "settingsSoftwareType"
//!
//! [[software-type]]
//! name = "javaApplication"
//! model-type = "JavaApplication"
//! plugin = "org.example.java-application"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use decl_components::{SoftwareTypeImplementation, StaticSoftwareTypeRegistry};
use decl_core::{DataTypeRef, PluginId, SchemaBuildError};

/// Accessor-id prefixes for the two evaluation phases.
///
/// The prefixes keep the settings and project accessors apart when both
/// phases bind the same software type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorPrefixes {
    pub project: String,
    pub settings: String,
}

impl Default for AccessorPrefixes {
    fn default() -> Self {
        Self {
            project: "projectSoftwareType".to_string(),
            settings: "settingsSoftwareType".to_string(),
        }
    }
}

/// One software type entry of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SoftwareTypeEntry {
    pub name: String,
    pub model_type: String,
    pub plugin: String,
}

impl SoftwareTypeEntry {
    pub fn to_implementation(&self) -> SoftwareTypeImplementation {
        SoftwareTypeImplementation::new(
            self.name.clone(),
            DataTypeRef::named(self.model_type.as_str()),
            PluginId::new(self.plugin.clone()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SchemaConfig {
    pub prefixes: AccessorPrefixes,
    #[serde(rename = "software-type", skip_serializing_if = "Vec::is_empty")]
    pub software_types: Vec<SoftwareTypeEntry>,
}

impl SchemaConfig {
    /// Parse and validate a configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the prefixes. Software type entries are checked when the
    /// registry is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefixes = &self.prefixes;
        for (phase, prefix) in [("project", &prefixes.project), ("settings", &prefixes.settings)] {
            if prefix.is_empty() {
                return Err(ConfigError::EmptyPrefix(phase));
            }
            if prefix.contains(decl_core::AccessorId::SEPARATOR) {
                return Err(ConfigError::InvalidPrefix(prefix.clone()));
            }
        }
        if prefixes.project == prefixes.settings {
            return Err(ConfigError::ConflictingPrefixes(prefixes.project.clone()));
        }
        Ok(())
    }

    /// Build the software type registry described by the entries.
    pub fn registry(&self) -> Result<StaticSoftwareTypeRegistry, ConfigError> {
        StaticSoftwareTypeRegistry::from_implementations(
            self.software_types.iter().map(SoftwareTypeEntry::to_implementation),
        )
        .map_err(ConfigError::InvalidSoftwareTypes)
    }
}

/// Errors raised while loading a [`SchemaConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("accessor prefix for the {0} phase is empty")]
    EmptyPrefix(&'static str),

    #[error("accessor prefix '{0}' must not contain ':'")]
    InvalidPrefix(String),

    #[error("project and settings phases share the accessor prefix '{0}'")]
    ConflictingPrefixes(String),

    #[error("invalid software types: {}", crate::context::format_errors(.0))]
    InvalidSoftwareTypes(Vec<SchemaBuildError>),
}
