//! Interfaces to the live host object graph.
//!
//! Runtime bindings never inspect host objects reflectively. A host object
//! exposes the capabilities a binding needs through explicit accessor
//! methods on [`HostObject`]; anything it does not expose is treated as
//! absent.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use std::sync::Arc;
//! use decl_core::{HostObject, HostRef};
//!
//! #[derive(Debug)]
//! struct Extension;
//!
//! impl HostObject for Extension {
//!     fn type_name(&self) -> &str {
//!         "Extension"
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let ext: HostRef = Arc::new(Extension);
//! assert!(ext.as_plugin_target().is_none());
//! assert!(ext.as_any().downcast_ref::<Extension>().is_some());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::HostError;

/// Shared handle to a live host object.
pub type HostRef = Arc<dyn HostObject>;

/// A live object in the host object graph.
///
/// Implementations must be safe to share across threads; any mutation they
/// perform in response to capability calls is their own to synchronize.
pub trait HostObject: Any + Send + Sync + fmt::Debug {
    /// Name used in diagnostics.
    fn type_name(&self) -> &str;

    /// Access to the concrete object, for hosts that downcast their own types.
    fn as_any(&self) -> &dyn Any;

    /// Plugin application and extension lookup, if this object supports them.
    fn as_plugin_target(&self) -> Option<&dyn PluginTarget> {
        None
    }

    /// Dependency collection, if this object collects dependency declarations.
    fn as_dependency_collector(&self) -> Option<&dyn DependencyCollector> {
        None
    }

    /// Read a property by name.
    fn property(&self, _name: &str) -> Option<HostRef> {
        None
    }
}

/// Check whether two handles point at the same host object.
pub fn same_object(a: &HostRef, b: &HostRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Identifier of a host plugin that implements a software type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginId(String);

impl PluginId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Host surface used by software-type activation.
pub trait PluginTarget: Send + Sync {
    /// Apply a plugin to this object.
    ///
    /// Hosts are expected to treat a repeated application of the same plugin
    /// as a no-op, or to reject it with an error.
    fn apply_plugin(&self, plugin: &PluginId) -> Result<(), HostError>;

    /// Look up an extension object registered under `name`.
    fn extension(&self, name: &str) -> Option<HostRef>;
}

/// Kind of a dependency declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// `group:artifact:version` style coordinate string.
    Coordinate,
    /// Reference to another project.
    Project,
}

/// A dependency declared through a collector function.
#[derive(Debug, Clone)]
pub enum DependencyDeclaration {
    /// A coordinate string such as `group:artifact:1.0`.
    Coordinate(String),
    /// A project reference object.
    Project(HostRef),
}

impl DependencyDeclaration {
    pub fn kind(&self) -> DependencyKind {
        match self {
            DependencyDeclaration::Coordinate(_) => DependencyKind::Coordinate,
            DependencyDeclaration::Project(_) => DependencyKind::Project,
        }
    }

    /// The coordinate string, for coordinate declarations.
    pub fn coordinate(&self) -> Option<&str> {
        match self {
            DependencyDeclaration::Coordinate(notation) => Some(notation),
            DependencyDeclaration::Project(_) => None,
        }
    }

    /// The project reference, for project declarations.
    pub fn project(&self) -> Option<&HostRef> {
        match self {
            DependencyDeclaration::Project(project) => Some(project),
            DependencyDeclaration::Coordinate(_) => None,
        }
    }
}

/// Host surface used by dependency-collector functions.
///
/// Adding is fire-and-forget from the binding's point of view; resolution of
/// the recorded declarations belongs to the host.
pub trait DependencyCollector: Send + Sync {
    fn add(&self, dependency: DependencyDeclaration);
}
