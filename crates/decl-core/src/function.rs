//! Schema member functions, constructors and their semantics.
//!
//! This module provides the schema-level description of callable vocabulary:
//!
//! - [`SchemaMemberFunction`] - a function callable on a receiver type
//! - [`DataConstructor`] - a constructor producing a schema type
//! - [`FunctionSemantics`] - what evaluating a call means
//! - [`ConfigureAccessor`] - how an access-and-configure call reaches its object
//!
//! Function identity is `(receiver, name, parameter types)` and is captured
//! eagerly as a [`TypeHash`] when the function is created.

use std::fmt;
use std::sync::Arc;

use crate::{AccessorId, DataParameter, DataTypeRef, TypeHash};

/// Whether a call must, may, or must not carry a configuring block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigureBlockRequirement {
    NotAllowed,
    Optional,
    Required,
}

impl ConfigureBlockRequirement {
    /// Check if a block may be supplied.
    pub fn allows_block(self) -> bool {
        !matches!(self, ConfigureBlockRequirement::NotAllowed)
    }

    /// Check if a block must be supplied.
    pub fn requires_block(self) -> bool {
        matches!(self, ConfigureBlockRequirement::Required)
    }
}

/// Value produced by an access-and-configure call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessAndConfigureReturnType {
    /// The call evaluates to unit.
    Unit,
    /// The call evaluates to the configured object.
    ConfiguredObject,
}

/// How an access-and-configure call reaches the object it configures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigureAccessor {
    /// A property of the receiver.
    Property {
        /// Property name.
        name: String,
    },
    /// A custom accessor, resolved at runtime by id.
    ///
    /// The id has no structural relation to any host symbol.
    Custom {
        /// Type of the object the accessor produces.
        object_type: DataTypeRef,
        /// Join key with the runtime provider.
        accessor_id: AccessorId,
    },
}

impl ConfigureAccessor {
    /// Create a custom accessor.
    pub fn custom(object_type: DataTypeRef, accessor_id: AccessorId) -> Self {
        ConfigureAccessor::Custom {
            object_type,
            accessor_id,
        }
    }

    /// The accessor id, for custom accessors.
    pub fn custom_accessor_id(&self) -> Option<&AccessorId> {
        match self {
            ConfigureAccessor::Custom { accessor_id, .. } => Some(accessor_id),
            ConfigureAccessor::Property { .. } => None,
        }
    }
}

/// What evaluating a call to a schema function means.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionSemantics {
    /// Reach an existing object through an accessor and configure it.
    AccessAndConfigure {
        accessor: ConfigureAccessor,
        return_type: AccessAndConfigureReturnType,
        block_requirement: ConfigureBlockRequirement,
    },
    /// Add a new element of `object_type` to the receiver, optionally configuring it.
    AddAndConfigure {
        object_type: DataTypeRef,
        block_requirement: ConfigureBlockRequirement,
    },
    /// Compute a value without side effects.
    Pure { return_type: DataTypeRef },
    /// Set a value on the receiver and return the receiver.
    Builder,
}

impl FunctionSemantics {
    /// Block requirement of the call. Pure and builder calls take no block.
    pub fn block_requirement(&self) -> ConfigureBlockRequirement {
        match self {
            FunctionSemantics::AccessAndConfigure {
                block_requirement, ..
            }
            | FunctionSemantics::AddAndConfigure {
                block_requirement, ..
            } => *block_requirement,
            FunctionSemantics::Pure { .. } | FunctionSemantics::Builder => {
                ConfigureBlockRequirement::NotAllowed
            }
        }
    }

    /// The configure accessor, for access-and-configure semantics.
    pub fn configure_accessor(&self) -> Option<&ConfigureAccessor> {
        match self {
            FunctionSemantics::AccessAndConfigure { accessor, .. } => Some(accessor),
            _ => None,
        }
    }

    pub fn is_access_and_configure(&self) -> bool {
        matches!(self, FunctionSemantics::AccessAndConfigure { .. })
    }

    pub fn is_add_and_configure(&self) -> bool {
        matches!(self, FunctionSemantics::AddAndConfigure { .. })
    }
}

/// A function callable on a receiver type in a declarative document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMemberFunction {
    /// Receiver type.
    pub receiver: DataTypeRef,
    /// Function name.
    pub name: String,
    /// Ordered parameters.
    pub parameters: Vec<Arc<DataParameter>>,
    /// Only callable directly on the receiver, not through an implicit outer scope.
    pub is_direct_access_only: bool,
    /// Evaluation semantics.
    pub semantics: FunctionSemantics,
    func_hash: TypeHash,
}

impl SchemaMemberFunction {
    /// Create a new member function. The identity hash is computed here.
    pub fn new(
        receiver: DataTypeRef,
        name: impl Into<String>,
        parameters: Vec<Arc<DataParameter>>,
        is_direct_access_only: bool,
        semantics: FunctionSemantics,
    ) -> Self {
        let name = name.into();
        let param_hashes: Vec<TypeHash> =
            parameters.iter().map(|p| p.type_ref.type_hash()).collect();
        let func_hash =
            TypeHash::from_member_function(receiver.type_hash(), &name, &param_hashes);
        Self {
            receiver,
            name,
            parameters,
            is_direct_access_only,
            semantics,
            func_hash,
        }
    }

    /// Identity hash of `(receiver, name, parameter types)`.
    #[inline]
    pub fn func_hash(&self) -> TypeHash {
        self.func_hash
    }

    /// Declared parameter types, in order.
    pub fn parameter_types(&self) -> impl Iterator<Item = &DataTypeRef> {
        self.parameters.iter().map(|p| &p.type_ref)
    }

    /// Human-readable signature, e.g. `Dependencies.implementation(String)`.
    pub fn signature(&self) -> String {
        format!(
            "{}.{}",
            self.receiver,
            format_call(&self.name, &self.parameters)
        )
    }

    /// Check if a call with the given declared argument types matches this function.
    ///
    /// Matching is by declared type only; a trailing vararg parameter accepts
    /// zero or more arguments of its type.
    pub fn accepts(&self, arg_types: &[DataTypeRef]) -> bool {
        params_accept(&self.parameters, arg_types)
    }
}

impl fmt::Display for SchemaMemberFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

/// A constructor for a schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConstructor {
    /// Type being constructed.
    pub data_class: DataTypeRef,
    /// Ordered parameters.
    pub parameters: Vec<Arc<DataParameter>>,
    ctor_hash: TypeHash,
}

impl DataConstructor {
    pub fn new(data_class: DataTypeRef, parameters: Vec<Arc<DataParameter>>) -> Self {
        let param_hashes: Vec<TypeHash> =
            parameters.iter().map(|p| p.type_ref.type_hash()).collect();
        let ctor_hash = TypeHash::from_constructor(data_class.type_hash(), &param_hashes);
        Self {
            data_class,
            parameters,
            ctor_hash,
        }
    }

    #[inline]
    pub fn ctor_hash(&self) -> TypeHash {
        self.ctor_hash
    }

    pub fn signature(&self) -> String {
        format_call(self.data_class.name(), &self.parameters)
    }

    pub fn accepts(&self, arg_types: &[DataTypeRef]) -> bool {
        params_accept(&self.parameters, arg_types)
    }
}

fn format_call(name: &str, parameters: &[Arc<DataParameter>]) -> String {
    let params: Vec<String> = parameters
        .iter()
        .map(|p| {
            if p.is_vararg {
                format!("{}...", p.type_ref)
            } else {
                p.type_ref.to_string()
            }
        })
        .collect();
    format!("{}({})", name, params.join(", "))
}

fn params_accept(parameters: &[Arc<DataParameter>], arg_types: &[DataTypeRef]) -> bool {
    match parameters.split_last() {
        Some((last, fixed)) if last.is_vararg => {
            arg_types.len() >= fixed.len()
                && fixed
                    .iter()
                    .zip(arg_types)
                    .all(|(p, arg)| p.type_ref == *arg)
                && arg_types[fixed.len()..]
                    .iter()
                    .all(|arg| *arg == last.type_ref)
        }
        _ => {
            parameters.len() == arg_types.len()
                && parameters
                    .iter()
                    .zip(arg_types)
                    .all(|(p, arg)| p.type_ref == *arg)
        }
    }
}
