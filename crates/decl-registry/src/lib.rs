//! Schema composition for the declarative schema extension framework.
//!
//! This crate turns a [`BaseSchema`] and an ordered list of
//! [`EvaluationSchemaComponent`]s into an immutable [`EvaluationSchema`] and a
//! [`RuntimeResolution`] table.
//!
//! # Example
//!
//! ```
//! use decl_core::DataTypeRef;
//! use decl_registry::{BaseSchema, DataClass, SchemaBuilder};
//!
//! let base = BaseSchema::new().with_class(DataClass::new(DataTypeRef::named("Project")));
//! let composed = SchemaBuilder::new(base)
//!     .build(&DataTypeRef::named("Project"))
//!     .expect("empty composition has no conflicts");
//!
//! assert_eq!(composed.schema.top_level_receiver().name(), "Project");
//! assert_eq!(composed.runtime.function_resolver_count(), 0);
//! ```

mod base_schema;
mod builder;
mod component;
mod runtime;
mod schema;

pub use base_schema::{BaseSchema, DataClass, DataProperty, PreIndex};
pub use builder::{ComposedSchema, SchemaBuilder};
pub use component::{
    EvaluationSchemaComponent, FixedTypeDiscovery, FunctionExtractor, Resolution,
    RuntimeCustomAccessors, RuntimeFunctionResolver, TypeDiscovery,
};
pub use runtime::RuntimeResolution;
pub use schema::EvaluationSchema;
