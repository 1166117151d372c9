use std::fmt;
use std::sync::Arc;

use decl_core::{
    AccessAndConfigureReturnType, AccessorId, BindingError, ConfigureAccessor,
    ConfigureBlockRequirement, DataTypeRef, FunctionSemantics, HostRef, PluginId,
    SchemaMemberFunction,
};

use super::SoftwareTypeImplementation;

/// Produces the configured object for a receiver. `Ok(None)` when the
/// activation has no object to hand back.
pub type ExtensionProvider =
    dyn Fn(&HostRef) -> Result<Option<HostRef>, BindingError> + Send + Sync;

/// One software type prepared for a specific extend-target and prefix.
#[derive(Clone)]
pub(crate) struct SoftwareTypeInfo {
    implementation: Arc<SoftwareTypeImplementation>,
    pub(crate) accessor_id: AccessorId,
    pub(crate) schema_function: SchemaMemberFunction,
    pub(crate) extension_provider: Arc<ExtensionProvider>,
}

impl SoftwareTypeInfo {
    pub(crate) fn new(
        implementation: Arc<SoftwareTypeImplementation>,
        extend_type: &DataTypeRef,
        accessor_prefix: &str,
        extension_provider: Arc<ExtensionProvider>,
    ) -> Self {
        let accessor_id = AccessorId::new(accessor_prefix, &implementation.software_type);
        let schema_function = SchemaMemberFunction::new(
            extend_type.clone(),
            implementation.software_type.clone(),
            Vec::new(),
            true,
            FunctionSemantics::AccessAndConfigure {
                accessor: ConfigureAccessor::custom(
                    implementation.model_public_type.clone(),
                    accessor_id.clone(),
                ),
                return_type: AccessAndConfigureReturnType::Unit,
                block_requirement: ConfigureBlockRequirement::Required,
            },
        );
        Self {
            implementation,
            accessor_id,
            schema_function,
            extension_provider,
        }
    }

    pub(crate) fn software_type(&self) -> &str {
        &self.implementation.software_type
    }

    pub(crate) fn model_public_type(&self) -> &DataTypeRef {
        &self.implementation.model_public_type
    }

    pub(crate) fn plugin_id(&self) -> &PluginId {
        &self.implementation.plugin_id
    }
}

impl fmt::Debug for SoftwareTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwareTypeInfo")
            .field("software_type", &self.software_type())
            .field("accessor_id", &self.accessor_id)
            .finish_non_exhaustive()
    }
}
