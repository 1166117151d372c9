//! Software-type binding.
//!
//! For every registered software type, [`SoftwareTypeComponent`] adds one
//! zero-argument, block-required function to an extend-target type, named
//! after the software type. Calling it configures the software type's model
//! object, reached through a custom accessor with id `prefix:softwareType`.
//!
//! Two variants share the same schema surface:
//!
//! - [`SoftwareTypeComponent::project`] activates the software type when the
//!   accessor is used: it applies the implementing plugin to the receiver and
//!   hands back the extension registered under the software type name.
//! - [`SoftwareTypeComponent::convention`] only declares the vocabulary. It
//!   contributes no runtime accessors, so its ids stay unresolved and nothing
//!   happens to the receiver.

mod info;
mod registry;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use decl_core::{AccessorId, BindingError, DataTypeRef, HostRef, SchemaMemberFunction};
use decl_registry::{
    EvaluationSchemaComponent, FixedTypeDiscovery, FunctionExtractor, PreIndex,
    RuntimeCustomAccessors, TypeDiscovery,
};

use info::SoftwareTypeInfo;

pub use info::ExtensionProvider;
pub use registry::{SoftwareTypeImplementation, SoftwareTypeRegistry, StaticSoftwareTypeRegistry};

/// Decides what referencing a software type does to a receiver.
pub type ActivationPolicy = dyn Fn(&HostRef, &SoftwareTypeImplementation) -> Result<Option<HostRef>, BindingError>
    + Send
    + Sync;

/// Schema component binding registered software types to an extend-target type.
pub struct SoftwareTypeComponent {
    extend_type: DataTypeRef,
    discovery: Arc<FixedTypeDiscovery>,
    functions: Arc<SoftwareTypeFunctions>,
    accessors: Option<Arc<SoftwareTypeAccessors>>,
}

impl SoftwareTypeComponent {
    /// Software types referenced from a project build file. Referencing one
    /// applies its plugin and configures its extension.
    pub fn project(
        extend_type: DataTypeRef,
        accessor_prefix: &str,
        registry: &dyn SoftwareTypeRegistry,
    ) -> Self {
        Self::with_activation(
            extend_type,
            accessor_prefix,
            registry,
            Arc::new(apply_plugin_and_get_extension),
        )
    }

    /// Software types configured as conventions. Nothing is activated and no
    /// runtime accessors are contributed.
    pub fn convention(
        extend_type: DataTypeRef,
        accessor_prefix: &str,
        registry: &dyn SoftwareTypeRegistry,
    ) -> Self {
        let mut component =
            Self::with_activation(extend_type, accessor_prefix, registry, Arc::new(no_activation));
        component.accessors = None;
        component
    }

    /// Build a component with a custom activation policy.
    pub fn with_activation(
        extend_type: DataTypeRef,
        accessor_prefix: &str,
        registry: &dyn SoftwareTypeRegistry,
        policy: Arc<ActivationPolicy>,
    ) -> Self {
        let infos: Arc<[SoftwareTypeInfo]> = registry
            .implementations()
            .into_iter()
            .map(|implementation| {
                let policy = Arc::clone(&policy);
                let bound = Arc::clone(&implementation);
                let provider: Arc<ExtensionProvider> =
                    Arc::new(move |receiver: &HostRef| policy(receiver, &bound));
                SoftwareTypeInfo::new(implementation, &extend_type, accessor_prefix, provider)
            })
            .collect();

        let discovery = Arc::new(FixedTypeDiscovery::new(
            extend_type.clone(),
            infos.iter().map(|i| i.model_public_type().clone()).collect(),
        ));
        let functions = Arc::new(SoftwareTypeFunctions {
            extend_type: extend_type.clone(),
            infos: Arc::clone(&infos),
        });
        let accessors = Arc::new(SoftwareTypeAccessors::new(&infos));

        Self {
            extend_type,
            discovery,
            functions,
            accessors: Some(accessors),
        }
    }

    /// The type the software-type functions are added to.
    pub fn extend_type(&self) -> &DataTypeRef {
        &self.extend_type
    }

    /// Names of the bound software types, in registry order.
    pub fn software_types(&self) -> Vec<&str> {
        self.functions.infos.iter().map(|i| i.software_type()).collect()
    }
}

impl EvaluationSchemaComponent for SoftwareTypeComponent {
    fn name(&self) -> &str {
        if self.accessors.is_some() {
            "software-types"
        } else {
            "software-type-conventions"
        }
    }

    fn type_discovery(&self) -> Vec<Arc<dyn TypeDiscovery>> {
        let discovery: Arc<dyn TypeDiscovery> = self.discovery.clone();
        vec![discovery]
    }

    fn function_extractors(&self) -> Vec<Arc<dyn FunctionExtractor>> {
        let extractor: Arc<dyn FunctionExtractor> = self.functions.clone();
        vec![extractor]
    }

    fn runtime_custom_accessors(&self) -> Vec<Arc<dyn RuntimeCustomAccessors>> {
        self.accessors
            .iter()
            .map(|a| Arc::clone(a) as Arc<dyn RuntimeCustomAccessors>)
            .collect()
    }
}

fn no_activation(
    _receiver: &HostRef,
    _implementation: &SoftwareTypeImplementation,
) -> Result<Option<HostRef>, BindingError> {
    Ok(None)
}

/// Applies the software type's plugin and returns its extension.
fn apply_plugin_and_get_extension(
    receiver: &HostRef,
    implementation: &SoftwareTypeImplementation,
) -> Result<Option<HostRef>, BindingError> {
    let target = receiver
        .as_plugin_target()
        .ok_or_else(|| BindingError::UnexpectedReceiver {
            expected: "a plugin target".to_string(),
            actual: receiver.type_name().to_string(),
        })?;

    target.apply_plugin(&implementation.plugin_id)?;
    target
        .extension(&implementation.software_type)
        .map(Some)
        .ok_or_else(|| BindingError::MissingExtension {
            name: implementation.software_type.clone(),
            receiver: receiver.type_name().to_string(),
        })
}

struct SoftwareTypeFunctions {
    extend_type: DataTypeRef,
    infos: Arc<[SoftwareTypeInfo]>,
}

impl FunctionExtractor for SoftwareTypeFunctions {
    fn member_functions(&self, ty: &DataTypeRef, _pre_index: &PreIndex) -> Vec<SchemaMemberFunction> {
        if *ty == self.extend_type {
            self.infos.iter().map(|i| i.schema_function.clone()).collect()
        } else {
            Vec::new()
        }
    }
}

/// Accessor id -> software type, for runtime activation.
struct SoftwareTypeAccessors {
    by_id: FxHashMap<AccessorId, SoftwareTypeInfo>,
    ids: Vec<AccessorId>,
}

impl SoftwareTypeAccessors {
    fn new(infos: &[SoftwareTypeInfo]) -> Self {
        Self {
            by_id: infos
                .iter()
                .map(|i| (i.accessor_id.clone(), i.clone()))
                .collect(),
            ids: infos.iter().map(|i| i.accessor_id.clone()).collect(),
        }
    }
}

impl RuntimeCustomAccessors for SoftwareTypeAccessors {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn object_from_custom_accessor(
        &self,
        receiver: &HostRef,
        accessor_id: &AccessorId,
    ) -> Result<Option<HostRef>, BindingError> {
        let Some(info) = self.by_id.get(accessor_id) else {
            return Ok(None);
        };
        debug!(
            software_type = info.software_type(),
            plugin = %info.plugin_id(),
            receiver = receiver.type_name(),
            "activating software type"
        );
        (info.extension_provider)(receiver)
    }

    fn accessor_ids(&self) -> Vec<AccessorId> {
        self.ids.clone()
    }
}
