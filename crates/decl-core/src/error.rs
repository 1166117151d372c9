//! Error types for schema composition, call validation and runtime binding.
//!
//! ## Error Hierarchy
//!
//! ```text
//! DeclError (top-level wrapper)
//! ├── SchemaBuildError - Conflicts found while composing components
//! ├── ValidationError  - Calls rejected against the schema before execution
//! └── BindingError     - Runtime binding contract violations
//!     └── HostError    - Failures reported by host collaborators
//! ```
//!
//! A resolution miss is not an error: resolvers signal it with `None` or
//! `Resolution::Unresolved` so the next contributor can be asked.

use thiserror::Error;

use crate::AccessorId;

// ============================================================================
// Schema Build Errors
// ============================================================================

/// Conflicts detected while composing a schema.
///
/// Composition reports every conflict it finds, so these usually travel as a
/// `Vec<SchemaBuildError>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaBuildError {
    /// Two member functions share receiver, name and parameter types.
    #[error("duplicate function: {signature} is contributed more than once")]
    DuplicateFunction {
        /// Receiver type name.
        receiver: String,
        /// Function name.
        name: String,
        /// Full signature of the conflicting function.
        signature: String,
    },

    /// Two constructors share type and parameter types.
    #[error("duplicate constructor: {signature} is contributed more than once")]
    DuplicateConstructor {
        /// Full signature of the conflicting constructor.
        signature: String,
    },

    /// Two schema declarations or runtime providers use the same accessor id.
    #[error("duplicate custom accessor id '{id}' ({origin})")]
    DuplicateAccessorId {
        /// The conflicting id.
        id: AccessorId,
        /// Where the second occurrence was found.
        origin: &'static str,
    },

    /// A software type name is registered twice.
    #[error("duplicate software type '{name}'")]
    DuplicateSoftwareType {
        /// The software type name.
        name: String,
    },

    /// The schema root is not part of the base schema.
    #[error("unknown type: {0}")]
    UnknownType(String),
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Calls rejected against the schema, before any runtime resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The receiver has no function with this name.
    #[error("unknown function '{name}' on {receiver}")]
    UnknownFunction {
        /// Receiver type name.
        receiver: String,
        /// Function name.
        name: String,
    },

    /// Functions with this name exist but none accepts the argument types.
    #[error("no overload of {receiver}.{name} accepts ({})", arg_types.join(", "))]
    NoMatchingOverload {
        /// Receiver type name.
        receiver: String,
        /// Function name.
        name: String,
        /// Declared argument types of the call.
        arg_types: Vec<String>,
    },

    /// More than one overload accepts the argument types.
    #[error("ambiguous call to {receiver}.{name}: {} candidates", candidates.len())]
    AmbiguousOverload {
        /// Receiver type name.
        receiver: String,
        /// Function name.
        name: String,
        /// Signatures of all matching overloads.
        candidates: Vec<String>,
    },
}

// ============================================================================
// Host Errors
// ============================================================================

/// A failure reported by a host collaborator (plugin manager, extension
/// container, dependency handler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host error: {message}")]
pub struct HostError {
    /// Description from the host.
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Binding Errors
// ============================================================================

/// Runtime binding failures.
///
/// Apart from `Host`, these indicate that the caller broke the binding
/// contract (for example, used an accessor on a receiver the schema never
/// declared it for). They terminate the current evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// An activation policy was invoked on a receiver of the wrong kind.
    #[error("unexpected receiver, expected {expected}, got {actual}")]
    UnexpectedReceiver {
        /// What the binding requires.
        expected: String,
        /// What it was given.
        actual: String,
    },

    /// The host did not register the extension the binding expects.
    #[error("extension '{name}' not found on {receiver}")]
    MissingExtension {
        /// Extension name.
        name: String,
        /// Receiver description.
        receiver: String,
    },

    /// The receiver has no such property.
    #[error("property '{name}' not found on {receiver}")]
    MissingProperty {
        /// Property name.
        name: String,
        /// Receiver description.
        receiver: String,
    },

    /// The property value does not collect dependencies.
    #[error("property '{property}' of {receiver} is not a dependency collector")]
    NotACollector {
        /// Property name.
        property: String,
        /// Receiver description.
        receiver: String,
    },

    /// An argument value does not match the resolved overload.
    #[error("argument mismatch for {function}: expected {expected}, got {actual}")]
    ArgumentMismatch {
        /// Function signature.
        function: String,
        /// Expected argument kind.
        expected: String,
        /// Actual argument kind.
        actual: String,
    },

    /// No runtime resolver handles this schema function.
    #[error("no runtime binding for {signature}")]
    UnresolvedFunction {
        /// Function signature.
        signature: String,
    },

    /// No runtime provider produced an object for this accessor.
    #[error("no runtime object for accessor '{accessor}'")]
    UnresolvedAccessor {
        /// Accessor description.
        accessor: String,
    },

    /// The host collaborator failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// The unified error type for all schema and binding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclError {
    /// A schema build error.
    #[error(transparent)]
    SchemaBuild(#[from] SchemaBuildError),

    /// A validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A binding error.
    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl DeclError {
    pub fn is_schema_build(&self) -> bool {
        matches!(self, DeclError::SchemaBuild(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DeclError::Validation(_))
    }

    pub fn is_binding(&self) -> bool {
        matches!(self, DeclError::Binding(_))
    }
}
