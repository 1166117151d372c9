//! Ready-made component for dependency collectors.

use std::sync::Arc;

use decl_core::{DataParameter, DataTypeRef, ParameterSemantics};
use decl_registry::{EvaluationSchemaComponent, FunctionExtractor, RuntimeFunctionResolver};

use crate::DependencyCollectorBinding;

/// Adds `name(dependency: String)` and `name(dependency: ProjectDependency)`
/// to every type with a dependency-collector property, and resolves them at
/// runtime.
///
/// One [`DependencyCollectorBinding`] serves as both the function extractor
/// and the runtime resolver, so both facets see the same parameters.
#[derive(Debug, Clone)]
pub struct DependencyConfigurationsComponent {
    binding: Arc<DependencyCollectorBinding>,
}

impl DependencyConfigurationsComponent {
    pub fn new() -> Self {
        let coordinate = Arc::new(DataParameter::new(
            "dependency",
            DataTypeRef::string(),
            false,
            ParameterSemantics::Unknown,
        ));
        let project = Arc::new(DataParameter::new(
            "dependency",
            DataTypeRef::project_dependency(),
            false,
            ParameterSemantics::Unknown,
        ));
        Self {
            binding: Arc::new(DependencyCollectorBinding::new(coordinate, project)),
        }
    }

    pub fn binding(&self) -> &Arc<DependencyCollectorBinding> {
        &self.binding
    }
}

impl Default for DependencyConfigurationsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationSchemaComponent for DependencyConfigurationsComponent {
    fn name(&self) -> &str {
        "dependency-configurations"
    }

    fn function_extractors(&self) -> Vec<Arc<dyn FunctionExtractor>> {
        let extractor: Arc<dyn FunctionExtractor> = self.binding.clone();
        vec![extractor]
    }

    fn runtime_function_resolvers(&self) -> Vec<Arc<dyn RuntimeFunctionResolver>> {
        let resolver: Arc<dyn RuntimeFunctionResolver> = self.binding.clone();
        vec![resolver]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_binding_serves_both_facets() {
        let component = DependencyConfigurationsComponent::new();
        let extractor = &component.function_extractors()[0];
        let resolver = &component.runtime_function_resolvers()[0];
        assert!(std::ptr::addr_eq(Arc::as_ptr(extractor), Arc::as_ptr(resolver)));
        assert!(component.type_discovery().is_empty());
        assert!(component.runtime_custom_accessors().is_empty());
    }

    #[test]
    fn shared_parameters() {
        let component = DependencyConfigurationsComponent::default();
        let binding = component.binding();
        assert_eq!(binding.coordinate_param().name, "dependency");
        assert_eq!(binding.coordinate_param().type_ref, DataTypeRef::string());
        assert_eq!(binding.project_param().type_ref, DataTypeRef::project_dependency());
        assert!(!binding.project_param().is_vararg);
    }
}
