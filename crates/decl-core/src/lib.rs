//! Core data model for the declarative schema extension framework.
//!
//! This crate holds the types shared by every other crate in the workspace:
//!
//! - **Identity** - [`TypeHash`], [`DataTypeRef`], [`AccessorId`]
//! - **Schema elements** - [`DataParameter`], [`SchemaMemberFunction`],
//!   [`DataConstructor`] and their semantics
//! - **Host interfaces** - [`HostObject`], [`PluginTarget`],
//!   [`DependencyCollector`]
//! - **Runtime** - [`RuntimeValue`], [`RuntimeFunction`]
//! - **Errors** - [`SchemaBuildError`], [`ValidationError`], [`BindingError`]

mod accessor_id;
mod data_type;
mod error;
mod function;
mod host;
mod parameter;
mod runtime_fn;
mod type_hash;

pub use accessor_id::AccessorId;
pub use data_type::{DataTypeRef, TypeCapabilities, well_known};
pub use error::{BindingError, DeclError, HostError, SchemaBuildError, ValidationError};
pub use function::{
    AccessAndConfigureReturnType, ConfigureAccessor, ConfigureBlockRequirement, DataConstructor,
    FunctionSemantics, SchemaMemberFunction,
};
pub use host::{
    DependencyCollector, DependencyDeclaration, DependencyKind, HostObject, HostRef, PluginId,
    PluginTarget, same_object,
};
pub use parameter::{DataParameter, ParameterSemantics};
pub use runtime_fn::{RuntimeCallable, RuntimeFunction, RuntimeValue};
pub use type_hash::{TypeHash, hash_constants};
