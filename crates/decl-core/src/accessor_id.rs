//! Custom accessor identifiers.
//!
//! An accessor id is the only join key between a schema-level custom
//! configure declaration and the runtime provider that materializes it. The
//! format is `prefix:name`; the prefix keeps ids from different evaluation
//! phases apart when they share a software type name.

use std::fmt;

/// Identifier of a custom configure accessor, formatted as `prefix:name`.
///
/// ```
/// use decl_core::AccessorId;
///
/// let id = AccessorId::new("projectSoftwareType", "javaApplication");
/// assert_eq!(id.as_str(), "projectSoftwareType:javaApplication");
/// assert_eq!(id.prefix(), Some("projectSoftwareType"));
/// assert_eq!(id.local_name(), "javaApplication");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccessorId(String);

impl AccessorId {
    /// Separator between prefix and name.
    pub const SEPARATOR: char = ':';

    /// Build an id from a namespace prefix and a local name.
    pub fn new(prefix: &str, name: &str) -> Self {
        Self(format!("{prefix}{}{name}", Self::SEPARATOR))
    }

    /// Wrap an already formatted id.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The full id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace prefix, if the id has one.
    pub fn prefix(&self) -> Option<&str> {
        self.0.split_once(Self::SEPARATOR).map(|(prefix, _)| prefix)
    }

    /// The part after the prefix (the whole id when there is no prefix).
    pub fn local_name(&self) -> &str {
        self.0
            .split_once(Self::SEPARATOR)
            .map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl fmt::Display for AccessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccessorId {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}
