//! Component facets contributed to schema composition.
//!
//! A component is a bundle of up to four independent facets. Each facet list
//! defaults to empty, so a component only implements what it contributes:
//!
//! | facet | used at | purpose |
//! |---|---|---|
//! | [`TypeDiscovery`] | build | extra types to visit from a type |
//! | [`FunctionExtractor`] | build | member functions and constructors per type |
//! | [`RuntimeFunctionResolver`] | evaluation | executable binding for a schema function |
//! | [`RuntimeCustomAccessors`] | evaluation | object behind a custom accessor id |

use std::fmt;
use std::sync::Arc;

use decl_core::{
    AccessorId, BindingError, DataConstructor, DataTypeRef, HostRef, RuntimeFunction,
    SchemaMemberFunction,
};

use crate::PreIndex;

/// Hints extra types to include in the schema when a type is visited.
pub trait TypeDiscovery: Send + Sync {
    fn types_to_visit(&self, ty: &DataTypeRef) -> Vec<DataTypeRef>;

    /// Types that must be visited even when the top level does not reach
    /// them, such as the type a component extends.
    fn root_types(&self) -> Vec<DataTypeRef> {
        Vec::new()
    }
}

/// Contributes member functions and constructors for a visited type.
pub trait FunctionExtractor: Send + Sync {
    fn member_functions(&self, ty: &DataTypeRef, pre_index: &PreIndex)
    -> Vec<SchemaMemberFunction>;

    fn constructors(&self, _ty: &DataTypeRef, _pre_index: &PreIndex) -> Vec<DataConstructor> {
        Vec::new()
    }
}

/// Outcome of asking a resolver for a runtime binding.
///
/// `Unresolved` is not an error: the next contributor is asked.
#[derive(Debug, Clone)]
pub enum Resolution {
    Resolved(RuntimeFunction),
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn into_function(self) -> Option<RuntimeFunction> {
        match self {
            Resolution::Resolved(function) => Some(function),
            Resolution::Unresolved => None,
        }
    }
}

/// Maps a schema function back to an executable binding.
///
/// Resolution is keyed by receiver type, function name and declared
/// parameter types, so overloads that differ only by parameter type resolve
/// to different bindings. The pre-index is the one the extractors saw.
pub trait RuntimeFunctionResolver: Send + Sync {
    fn resolve(
        &self,
        receiver_type: &DataTypeRef,
        name: &str,
        param_types: &[DataTypeRef],
        pre_index: &PreIndex,
    ) -> Resolution;
}

/// Materializes the objects behind custom configure accessors.
pub trait RuntimeCustomAccessors: Send + Sync {
    /// Produce the object for `accessor_id` on `receiver`.
    ///
    /// `Ok(None)` means this provider does not know the id.
    fn object_from_custom_accessor(
        &self,
        receiver: &HostRef,
        accessor_id: &AccessorId,
    ) -> Result<Option<HostRef>, BindingError>;

    /// Ids this provider answers for. Used to detect providers that claim
    /// the same id.
    fn accessor_ids(&self) -> Vec<AccessorId> {
        Vec::new()
    }
}

/// A schema component: up to four facets folded into the composed schema.
///
/// Facets are returned as shared handles. Implementations build them once
/// and hand out clones, so repeated calls are free of side effects and return
/// pointer-equal contributions.
pub trait EvaluationSchemaComponent: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn type_discovery(&self) -> Vec<Arc<dyn TypeDiscovery>> {
        Vec::new()
    }

    fn function_extractors(&self) -> Vec<Arc<dyn FunctionExtractor>> {
        Vec::new()
    }

    fn runtime_function_resolvers(&self) -> Vec<Arc<dyn RuntimeFunctionResolver>> {
        Vec::new()
    }

    fn runtime_custom_accessors(&self) -> Vec<Arc<dyn RuntimeCustomAccessors>> {
        Vec::new()
    }
}

/// Discovery that adds a fixed set of types when one specific type is visited.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedTypeDiscovery {
    from: DataTypeRef,
    types: Vec<DataTypeRef>,
}

impl FixedTypeDiscovery {
    pub fn new(from: DataTypeRef, types: Vec<DataTypeRef>) -> Self {
        Self { from, types }
    }

    pub fn from_type(&self) -> &DataTypeRef {
        &self.from
    }
}

impl TypeDiscovery for FixedTypeDiscovery {
    fn types_to_visit(&self, ty: &DataTypeRef) -> Vec<DataTypeRef> {
        if *ty == self.from {
            self.types.clone()
        } else {
            Vec::new()
        }
    }

    fn root_types(&self) -> Vec<DataTypeRef> {
        vec![self.from.clone()]
    }
}

impl fmt::Debug for FixedTypeDiscovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedTypeDiscovery")
            .field("from", &self.from)
            .field("types", &self.types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decl_core::RuntimeValue;

    struct Empty;

    impl EvaluationSchemaComponent for Empty {}

    #[test]
    fn default_facets_are_empty() {
        let component = Empty;
        assert!(component.type_discovery().is_empty());
        assert!(component.function_extractors().is_empty());
        assert!(component.runtime_function_resolvers().is_empty());
        assert!(component.runtime_custom_accessors().is_empty());
        assert!(component.name().ends_with("Empty"));
    }

    #[test]
    fn fixed_discovery_only_for_source_type() {
        let discovery = FixedTypeDiscovery::new(
            DataTypeRef::named("Project"),
            vec![DataTypeRef::named("JavaApplication")],
        );
        assert_eq!(
            discovery.types_to_visit(&DataTypeRef::named("Project")),
            vec![DataTypeRef::named("JavaApplication")]
        );
        assert!(discovery.types_to_visit(&DataTypeRef::named("Settings")).is_empty());
        assert_eq!(discovery.root_types(), vec![DataTypeRef::named("Project")]);
    }

    #[test]
    fn resolution_into_function() {
        let resolved = Resolution::Resolved(RuntimeFunction::new("f", |_, _| Ok(RuntimeValue::Unit)));
        assert!(resolved.is_resolved());
        assert_eq!(resolved.into_function().map(|f| f.label().to_string()), Some("f".to_string()));
        assert!(Resolution::Unresolved.into_function().is_none());
    }
}
