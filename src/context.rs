//! Schema context: install components, then seal.
//!
//! A `SchemaContext` collects schema components over a base schema. Sealing
//! composes them once into an immutable [`EvaluationSchema`] and
//! [`RuntimeResolution`], shared behind `Arc` with every evaluation that
//! follows.
//!
//! # Example
//!
//! ```
//! use decl::{SchemaConfig, SchemaContext};
//! use decl::phases::project_type;
//! use decl::decl_components::StaticSoftwareTypeRegistry;
//! use decl::decl_registry::{BaseSchema, DataClass};
//!
//! let base = BaseSchema::new().with_class(DataClass::new(project_type()));
//! let config = SchemaConfig::default();
//! let registry = StaticSoftwareTypeRegistry::new();
//!
//! let mut ctx = SchemaContext::for_project(base, &config, &registry).unwrap();
//! ctx.seal().unwrap();
//! assert!(ctx.is_sealed());
//! assert_eq!(ctx.schema().unwrap().top_level_receiver(), &project_type());
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use decl_components::SoftwareTypeRegistry;
use decl_core::{DataTypeRef, SchemaBuildError};
use decl_registry::{
    BaseSchema, EvaluationSchema, EvaluationSchemaComponent, RuntimeResolution, SchemaBuilder,
};

use crate::phases;
use crate::{ConfigError, SchemaConfig};

/// Sealed products of a context.
#[derive(Debug, Clone)]
struct Sealed {
    schema: Arc<EvaluationSchema>,
    runtime: Arc<RuntimeResolution>,
}

/// Owns the components of one evaluation phase until they are sealed.
pub struct SchemaContext {
    top_level: DataTypeRef,
    /// Builder for the schema (consumed on seal)
    builder: Option<SchemaBuilder>,
    /// Sealed schema and runtime table (available after seal)
    sealed: Option<Sealed>,
}

impl SchemaContext {
    /// Create an empty context over a base schema.
    pub fn new(base: BaseSchema, top_level: DataTypeRef) -> Self {
        Self {
            top_level,
            builder: Some(SchemaBuilder::new(base)),
            sealed: None,
        }
    }

    /// A settings-phase context with the standard components installed.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Config` if the config's prefixes are invalid.
    pub fn for_settings(
        base: BaseSchema,
        config: &SchemaConfig,
        registry: &dyn SoftwareTypeRegistry,
    ) -> Result<Self, ContextError> {
        config.validate()?;
        Ok(Self::with_components(
            base,
            phases::settings_type(),
            phases::settings_components(config, registry),
        ))
    }

    /// A project-phase context with the standard components installed.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Config` if the config's prefixes are invalid.
    pub fn for_project(
        base: BaseSchema,
        config: &SchemaConfig,
        registry: &dyn SoftwareTypeRegistry,
    ) -> Result<Self, ContextError> {
        config.validate()?;
        Ok(Self::with_components(
            base,
            phases::project_type(),
            phases::project_components(config, registry),
        ))
    }

    /// A project-phase context whose software types come from the config.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Config` if the config's prefixes are invalid
    /// or its software types conflict.
    pub fn for_project_from_config(
        base: BaseSchema,
        config: &SchemaConfig,
    ) -> Result<Self, ContextError> {
        let registry = config.registry()?;
        Self::for_project(base, config, &registry)
    }

    fn with_components(
        base: BaseSchema,
        top_level: DataTypeRef,
        components: Vec<Arc<dyn EvaluationSchemaComponent>>,
    ) -> Self {
        let mut builder = SchemaBuilder::new(base);
        for component in components {
            builder.add_component(component);
        }
        Self {
            top_level,
            builder: Some(builder),
            sealed: None,
        }
    }

    /// Install a component.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::AlreadySealed` if the context has already been sealed.
    pub fn install(
        &mut self,
        component: Arc<dyn EvaluationSchemaComponent>,
    ) -> Result<(), ContextError> {
        if self.sealed.is_some() {
            return Err(ContextError::AlreadySealed);
        }
        let builder = self.builder.as_mut().ok_or(ContextError::AlreadySealed)?;
        debug!(component = component.name(), "installing schema component");
        builder.add_component(component);
        Ok(())
    }

    /// Compose the installed components.
    ///
    /// Calling `seal()` again after success is a no-op. A failed seal keeps
    /// the context open so the conflicting component set can be inspected.
    ///
    /// # Errors
    ///
    /// Returns every conflict found by composition.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn seal(&mut self) -> Result<(), ContextError> {
        if self.sealed.is_some() {
            return Ok(());
        }
        let builder = self.builder.as_ref().ok_or(ContextError::AlreadySealed)?;
        let composed = builder
            .build(&self.top_level)
            .map_err(ContextError::SchemaBuildFailed)?;

        info!(
            top_level = %self.top_level,
            functions = composed.schema.function_count(),
            "schema sealed"
        );
        self.builder = None;
        self.sealed = Some(Sealed {
            schema: Arc::new(composed.schema),
            runtime: Arc::new(composed.runtime),
        });
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.is_some()
    }

    pub fn top_level(&self) -> &DataTypeRef {
        &self.top_level
    }

    /// Number of installed components (zero after sealing).
    pub fn component_count(&self) -> usize {
        self.builder.as_ref().map_or(0, SchemaBuilder::component_count)
    }

    /// The composed schema (available after sealing).
    pub fn schema(&self) -> Option<&Arc<EvaluationSchema>> {
        self.sealed.as_ref().map(|s| &s.schema)
    }

    /// The runtime resolution table (available after sealing).
    pub fn runtime(&self) -> Option<&Arc<RuntimeResolution>> {
        self.sealed.as_ref().map(|s| &s.runtime)
    }

    /// Both sealed products.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::NotSealed` if `seal()` has not succeeded yet.
    pub fn sealed(&self) -> Result<(Arc<EvaluationSchema>, Arc<RuntimeResolution>), ContextError> {
        self.sealed
            .as_ref()
            .map(|s| (Arc::clone(&s.schema), Arc::clone(&s.runtime)))
            .ok_or(ContextError::NotSealed)
    }
}

/// Errors that can occur during context operations.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Context is already sealed - cannot install components
    #[error("context is already sealed - cannot install components after seal()")]
    AlreadySealed,

    /// Context is not sealed - must call seal() first
    #[error("context is not sealed - call seal() first")]
    NotSealed,

    /// Composition found conflicts
    #[error("failed to build schema: {}", format_errors(.0))]
    SchemaBuildFailed(Vec<SchemaBuildError>),

    /// Configuration was rejected
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ContextError {
    /// The composition conflicts, if this is a build failure.
    pub fn build_errors(&self) -> &[SchemaBuildError] {
        match self {
            ContextError::SchemaBuildFailed(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}

pub(crate) fn format_errors(errors: &[SchemaBuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
