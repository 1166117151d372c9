//! Runtime values and type-erased runtime functions.

use std::fmt;
use std::sync::Arc;

use crate::{BindingError, HostRef};

/// A value passed to or returned from a runtime function.
#[derive(Debug, Clone)]
pub enum RuntimeValue {
    Unit,
    Bool(bool),
    Int(i64),
    String(String),
    /// A host object (e.g. a project reference or a configured sub-object).
    Object(HostRef),
}

impl RuntimeValue {
    /// Get a human-readable name for this value's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuntimeValue::Unit => "unit",
            RuntimeValue::Bool(_) => "bool",
            RuntimeValue::Int(_) => "int",
            RuntimeValue::String(_) => "string",
            RuntimeValue::Object(_) => "object",
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, RuntimeValue::Unit)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuntimeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HostRef> {
        match self {
            RuntimeValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<&str> for RuntimeValue {
    fn from(s: &str) -> Self {
        RuntimeValue::String(s.to_string())
    }
}

impl From<String> for RuntimeValue {
    fn from(s: String) -> Self {
        RuntimeValue::String(s)
    }
}

impl From<HostRef> for RuntimeValue {
    fn from(obj: HostRef) -> Self {
        RuntimeValue::Object(obj)
    }
}

/// Signature of a runtime binding: receiver plus already evaluated arguments.
pub type RuntimeCallable =
    dyn Fn(&HostRef, &[RuntimeValue]) -> Result<RuntimeValue, BindingError> + Send + Sync;

/// Type-erased runtime function returned by function resolvers.
///
/// The callable is shared behind `Arc`, so cloning is cheap and resolved
/// functions can be cached by the evaluator.
#[derive(Clone)]
pub struct RuntimeFunction {
    label: Arc<str>,
    inner: Arc<RuntimeCallable>,
}

impl RuntimeFunction {
    /// Wrap a callable. `label` is used in diagnostics only.
    pub fn new<F>(label: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&HostRef, &[RuntimeValue]) -> Result<RuntimeValue, BindingError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            inner: Arc::new(f),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn call(&self, receiver: &HostRef, args: &[RuntimeValue]) -> Result<RuntimeValue, BindingError> {
        (self.inner)(receiver, args)
    }
}

impl fmt::Debug for RuntimeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeFunction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
