//! Function parameter descriptors.

use crate::DataTypeRef;

/// How the evaluator should treat the value passed for a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParameterSemantics {
    /// No special handling.
    #[default]
    Unknown,
    /// The argument is stored into the named property of the result.
    StoreValueInProperty {
        /// Property receiving the value.
        property: String,
    },
    /// The argument identifies the object (e.g. a name key).
    IdentityKey,
}

/// A parameter of a schema function or constructor.
///
/// Descriptors are immutable and meant to be shared behind `Arc` so that
/// every overload synthesized for one logical parameter holds the same
/// instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataParameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub type_ref: DataTypeRef,
    /// Accepts zero or more arguments of `type_ref`. Only valid as the last parameter.
    pub is_vararg: bool,
    /// Evaluation semantics.
    pub semantics: ParameterSemantics,
}

impl DataParameter {
    pub fn new(
        name: impl Into<String>,
        type_ref: DataTypeRef,
        is_vararg: bool,
        semantics: ParameterSemantics,
    ) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_vararg,
            semantics,
        }
    }

    /// A plain, non-vararg parameter with unknown semantics.
    pub fn simple(name: impl Into<String>, type_ref: DataTypeRef) -> Self {
        Self::new(name, type_ref, false, ParameterSemantics::Unknown)
    }
}
