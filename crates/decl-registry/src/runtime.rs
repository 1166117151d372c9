//! Runtime resolution table.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use decl_core::{
    AccessorId, BindingError, ConfigureAccessor, HostRef, RuntimeFunction, RuntimeValue,
    SchemaMemberFunction,
};

use crate::{PreIndex, Resolution, RuntimeCustomAccessors, RuntimeFunctionResolver};

/// Ordered runtime contributors collected from every component.
///
/// Each lookup asks contributors in component order and the first answer
/// wins. The table holds no mutable state and can be shared across threads.
#[derive(Clone)]
pub struct RuntimeResolution {
    function_resolvers: Vec<Arc<dyn RuntimeFunctionResolver>>,
    custom_accessors: Vec<Arc<dyn RuntimeCustomAccessors>>,
    pre_index: Arc<PreIndex>,
}

impl RuntimeResolution {
    pub(crate) fn new(
        function_resolvers: Vec<Arc<dyn RuntimeFunctionResolver>>,
        custom_accessors: Vec<Arc<dyn RuntimeCustomAccessors>>,
        pre_index: Arc<PreIndex>,
    ) -> Self {
        Self {
            function_resolvers,
            custom_accessors,
            pre_index,
        }
    }

    /// Find the runtime binding of a schema function.
    ///
    /// # Errors
    ///
    /// `UnresolvedFunction` if no resolver recognises the function.
    pub fn resolve_function(
        &self,
        function: &SchemaMemberFunction,
    ) -> Result<RuntimeFunction, BindingError> {
        let param_types: Vec<_> = function.parameter_types().cloned().collect();
        for resolver in &self.function_resolvers {
            if let Resolution::Resolved(runtime) = resolver.resolve(
                &function.receiver,
                &function.name,
                &param_types,
                &self.pre_index,
            ) {
                trace!(function = %function, binding = runtime.label(), "resolved runtime function");
                return Ok(runtime);
            }
        }
        Err(BindingError::UnresolvedFunction {
            signature: function.signature(),
        })
    }

    /// Produce the object behind a custom accessor.
    ///
    /// `Ok(None)` means no provider knows the id, which is legal for
    /// accessors declared without runtime behavior.
    pub fn custom_accessor_object(
        &self,
        receiver: &HostRef,
        accessor_id: &AccessorId,
    ) -> Result<Option<HostRef>, BindingError> {
        for provider in &self.custom_accessors {
            if let Some(object) = provider.object_from_custom_accessor(receiver, accessor_id)? {
                trace!(%accessor_id, object = object.type_name(), "custom accessor produced object");
                return Ok(Some(object));
            }
        }
        Ok(None)
    }

    /// Reach the object configured by an access-and-configure function.
    ///
    /// Returns `Ok(None)` for functions with other semantics, for property
    /// accessors the receiver does not expose, and for unknown custom ids.
    pub fn configured_object(
        &self,
        receiver: &HostRef,
        function: &SchemaMemberFunction,
    ) -> Result<Option<HostRef>, BindingError> {
        match function.semantics.configure_accessor() {
            Some(ConfigureAccessor::Custom { accessor_id, .. }) => {
                self.custom_accessor_object(receiver, accessor_id)
            }
            Some(ConfigureAccessor::Property { name }) => Ok(receiver.property(name)),
            None => Ok(None),
        }
    }

    /// Resolve and call a function in one step.
    pub fn invoke(
        &self,
        receiver: &HostRef,
        function: &SchemaMemberFunction,
        args: &[RuntimeValue],
    ) -> Result<RuntimeValue, BindingError> {
        self.resolve_function(function)?.call(receiver, args)
    }

    pub fn function_resolver_count(&self) -> usize {
        self.function_resolvers.len()
    }

    pub fn custom_accessor_count(&self) -> usize {
        self.custom_accessors.len()
    }

    /// The base-schema index resolvers are consulted with.
    pub fn pre_index(&self) -> &PreIndex {
        &self.pre_index
    }
}

impl fmt::Debug for RuntimeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeResolution")
            .field("function_resolvers", &self.function_resolvers.len())
            .field("custom_accessors", &self.custom_accessors.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decl_core::{DataTypeRef, FunctionSemantics, HostObject};
    use std::any::Any;

    #[derive(Debug)]
    struct Node(&'static str);

    impl HostObject for Node {
        fn type_name(&self) -> &str {
            self.0
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct NamedResolver(&'static str);

    impl RuntimeFunctionResolver for NamedResolver {
        fn resolve(
            &self,
            _receiver_type: &DataTypeRef,
            name: &str,
            _param_types: &[DataTypeRef],
            _pre_index: &PreIndex,
        ) -> Resolution {
            if name == self.0 {
                let label = self.0;
                Resolution::Resolved(RuntimeFunction::new(label, move |_, _| {
                    Ok(RuntimeValue::String(label.to_string()))
                }))
            } else {
                Resolution::Unresolved
            }
        }
    }

    struct FixedAccessor {
        id: AccessorId,
        object: HostRef,
    }

    impl RuntimeCustomAccessors for FixedAccessor {
        fn object_from_custom_accessor(
            &self,
            _receiver: &HostRef,
            accessor_id: &AccessorId,
        ) -> Result<Option<HostRef>, BindingError> {
            Ok((*accessor_id == self.id).then(|| Arc::clone(&self.object)))
        }
    }

    fn builder_fn(name: &str) -> SchemaMemberFunction {
        SchemaMemberFunction::new(
            DataTypeRef::named("Project"),
            name,
            Vec::new(),
            false,
            FunctionSemantics::Builder,
        )
    }

    fn table() -> RuntimeResolution {
        let first: HostRef = Arc::new(Node("First"));
        let second: HostRef = Arc::new(Node("Second"));
        let resolvers: Vec<Arc<dyn RuntimeFunctionResolver>> =
            vec![Arc::new(NamedResolver("a")), Arc::new(NamedResolver("b"))];
        let accessors: Vec<Arc<dyn RuntimeCustomAccessors>> = vec![
            Arc::new(FixedAccessor {
                id: AccessorId::from("x:one"),
                object: first,
            }),
            Arc::new(FixedAccessor {
                id: AccessorId::from("x:one"),
                object: second,
            }),
        ];
        RuntimeResolution::new(resolvers, accessors, Arc::new(PreIndex::default()))
    }

    #[test]
    fn functions_resolve_through_first_matching_resolver() {
        let table = table();
        let receiver: HostRef = Arc::new(Node("Project"));
        let result = table.invoke(&receiver, &builder_fn("b"), &[]).unwrap();
        assert_eq!(result.as_str(), Some("b"));

        let err = table.resolve_function(&builder_fn("c")).unwrap_err();
        assert_eq!(
            err,
            BindingError::UnresolvedFunction {
                signature: "Project.c()".to_string()
            }
        );
    }

    #[test]
    fn first_accessor_provider_wins() {
        let table = table();
        let receiver: HostRef = Arc::new(Node("Project"));
        let object = table
            .custom_accessor_object(&receiver, &AccessorId::from("x:one"))
            .unwrap()
            .unwrap();
        assert_eq!(object.type_name(), "First");
        assert!(
            table
                .custom_accessor_object(&receiver, &AccessorId::from("x:two"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn configured_object_for_non_configuring_function() {
        let table = table();
        let receiver: HostRef = Arc::new(Node("Project"));
        assert!(table.configured_object(&receiver, &builder_fn("a")).unwrap().is_none());
        assert_eq!(table.function_resolver_count(), 2);
        assert_eq!(table.custom_accessor_count(), 2);
    }
}
