//! Standard component lists for the settings and project phases.
//!
//! Settings files declare software type conventions; project files reference
//! software types and activate them. Both phases can declare dependencies
//! through collector properties.

use std::sync::Arc;

use decl_components::{
    DependencyConfigurationsComponent, SoftwareTypeComponent, SoftwareTypeRegistry,
};
use decl_core::DataTypeRef;
use decl_registry::EvaluationSchemaComponent;

use crate::SchemaConfig;

/// Top-level receiver of settings files.
pub const SETTINGS_TYPE: &str = "Settings";
/// Top-level receiver of project files.
pub const PROJECT_TYPE: &str = "Project";

pub fn settings_type() -> DataTypeRef {
    DataTypeRef::named(SETTINGS_TYPE)
}

pub fn project_type() -> DataTypeRef {
    DataTypeRef::named(PROJECT_TYPE)
}

/// Conventions for every software type, plus dependency collectors.
pub fn settings_components(
    config: &SchemaConfig,
    registry: &dyn SoftwareTypeRegistry,
) -> Vec<Arc<dyn EvaluationSchemaComponent>> {
    vec![
        Arc::new(SoftwareTypeComponent::convention(
            settings_type(),
            &config.prefixes.settings,
            registry,
        )),
        Arc::new(DependencyConfigurationsComponent::new()),
    ]
}

/// Activating software types, plus dependency collectors.
pub fn project_components(
    config: &SchemaConfig,
    registry: &dyn SoftwareTypeRegistry,
) -> Vec<Arc<dyn EvaluationSchemaComponent>> {
    vec![
        Arc::new(SoftwareTypeComponent::project(
            project_type(),
            &config.prefixes.project,
            registry,
        )),
        Arc::new(DependencyConfigurationsComponent::new()),
    ]
}
