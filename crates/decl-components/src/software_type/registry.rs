//! Software-type registry collaborator.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use decl_core::{DataTypeRef, PluginId, SchemaBuildError};

/// A registered software type: a name usable in build files, the public
/// model type configured under it, and the plugin that implements it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareTypeImplementation {
    /// Name of the software type, also the function and extension name.
    pub software_type: String,
    /// Public type of the configured model object.
    pub model_public_type: DataTypeRef,
    /// Plugin applied when the software type is referenced.
    pub plugin_id: PluginId,
}

impl SoftwareTypeImplementation {
    pub fn new(
        software_type: impl Into<String>,
        model_public_type: DataTypeRef,
        plugin_id: PluginId,
    ) -> Self {
        Self {
            software_type: software_type.into(),
            model_public_type,
            plugin_id,
        }
    }
}

/// Source of the registered software types.
pub trait SoftwareTypeRegistry: Send + Sync {
    /// All implementations, in registration order.
    fn implementations(&self) -> Vec<Arc<SoftwareTypeImplementation>>;
}

/// A registry populated up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSoftwareTypeRegistry {
    implementations: Vec<Arc<SoftwareTypeImplementation>>,
    names: FxHashSet<String>,
}

impl StaticSoftwareTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation.
    ///
    /// # Errors
    ///
    /// `DuplicateSoftwareType` if the name is already registered.
    pub fn register(
        &mut self,
        implementation: SoftwareTypeImplementation,
    ) -> Result<(), SchemaBuildError> {
        if !self.names.insert(implementation.software_type.clone()) {
            return Err(SchemaBuildError::DuplicateSoftwareType {
                name: implementation.software_type,
            });
        }
        self.implementations.push(Arc::new(implementation));
        Ok(())
    }

    /// Build a registry from a list, reporting every duplicate name.
    pub fn from_implementations(
        implementations: impl IntoIterator<Item = SoftwareTypeImplementation>,
    ) -> Result<Self, Vec<SchemaBuildError>> {
        let mut registry = Self::new();
        let errors: Vec<_> = implementations
            .into_iter()
            .filter_map(|i| registry.register(i).err())
            .collect();
        if errors.is_empty() {
            Ok(registry)
        } else {
            Err(errors)
        }
    }

    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }
}

impl SoftwareTypeRegistry for StaticSoftwareTypeRegistry {
    fn implementations(&self) -> Vec<Arc<SoftwareTypeImplementation>> {
        self.implementations.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn java_application() -> SoftwareTypeImplementation {
        SoftwareTypeImplementation::new(
            "javaApplication",
            DataTypeRef::named("JavaApplication"),
            PluginId::from("java-application"),
        )
    }

    #[test]
    fn registration_order_is_kept() {
        let registry = StaticSoftwareTypeRegistry::from_implementations([
            java_application(),
            SoftwareTypeImplementation::new(
                "kotlinLibrary",
                DataTypeRef::named("KotlinLibrary"),
                PluginId::from("kotlin-library"),
            ),
        ])
        .unwrap();
        let names: Vec<_> = registry
            .implementations()
            .iter()
            .map(|i| i.software_type.clone())
            .collect();
        assert_eq!(names, vec!["javaApplication", "kotlinLibrary"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let errors =
            StaticSoftwareTypeRegistry::from_implementations([java_application(), java_application()])
                .unwrap_err();
        assert_eq!(
            errors,
            vec![SchemaBuildError::DuplicateSoftwareType {
                name: "javaApplication".to_string()
            }]
        );
    }
}
