//! Schema extension and runtime binding for a declarative configuration
//! language.
//!
//! Components contribute vocabulary (member functions, constructors, custom
//! accessors) to a schema, each paired with a runtime binding that acts on the
//! host object graph when a declarative document is evaluated.
//!
//! - [`decl_core`] - data model, host interfaces, errors
//! - [`decl_registry`] - composition into an [`EvaluationSchema`] and a
//!   [`RuntimeResolution`]
//! - [`decl_components`] - software-type and dependency-collector components
//!
//! This crate adds the [`SchemaContext`] lifecycle, [`SchemaConfig`], the
//! standard per-phase component lists and logging setup.

mod config;
mod context;
pub mod logging;
pub mod phases;

pub use config::{AccessorPrefixes, ConfigError, SchemaConfig, SoftwareTypeEntry};
pub use context::{ContextError, SchemaContext};

pub use decl_components;
pub use decl_core;
pub use decl_registry;

pub use decl_core::{BindingError, DeclError, SchemaBuildError, ValidationError};
pub use decl_registry::{EvaluationSchema, RuntimeResolution};
