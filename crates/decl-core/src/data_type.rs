//! Schema type references and type capabilities.
//!
//! A [`DataTypeRef`] names a type in the schema without requiring the host
//! type to be loaded. It carries its [`TypeHash`] so references can be used
//! directly as map keys and in function identities.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::TypeHash;

/// Names of the well-known schema types.
pub mod well_known {
    /// Coordinate strings and other text.
    pub const STRING: &str = "String";
    /// 32-bit integers.
    pub const INT: &str = "Int";
    /// 64-bit integers.
    pub const LONG: &str = "Long";
    /// Booleans.
    pub const BOOLEAN: &str = "Boolean";
    /// The unit/void type.
    pub const UNIT: &str = "Unit";
    /// A reference to another project, used as a dependency notation.
    pub const PROJECT_DEPENDENCY: &str = "ProjectDependency";
}

/// An opaque reference to a type in the schema.
///
/// Equality and hashing go through the type name; the cached hash is derived
/// from it and is only there to avoid recomputation.
///
/// ```
/// use decl_core::{DataTypeRef, TypeHash};
///
/// let project = DataTypeRef::named("Project");
/// assert_eq!(project.name(), "Project");
/// assert_eq!(project.type_hash(), TypeHash::from_name("Project"));
/// assert_eq!(DataTypeRef::string(), DataTypeRef::named("String"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DataTypeRef {
    name: Arc<str>,
    hash: TypeHash,
}

impl DataTypeRef {
    /// Create a reference to the type with the given name.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let hash = TypeHash::from_name(&name);
        Self { name, hash }
    }

    /// The type's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type's identity hash.
    #[inline]
    pub fn type_hash(&self) -> TypeHash {
        self.hash
    }

    pub fn string() -> Self {
        Self::named(well_known::STRING)
    }

    pub fn int() -> Self {
        Self::named(well_known::INT)
    }

    pub fn long() -> Self {
        Self::named(well_known::LONG)
    }

    pub fn boolean() -> Self {
        Self::named(well_known::BOOLEAN)
    }

    pub fn unit() -> Self {
        Self::named(well_known::UNIT)
    }

    /// The project-reference type accepted by dependency collectors.
    pub fn project_dependency() -> Self {
        Self::named(well_known::PROJECT_DEPENDENCY)
    }
}

impl fmt::Debug for DataTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataTypeRef({})", self.name)
    }
}

impl fmt::Display for DataTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for DataTypeRef {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for DataTypeRef {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

bitflags! {
    /// Capabilities a schema type declares explicitly.
    ///
    /// Function extractors key off these flags instead of inspecting host
    /// types, so a type only gets synthesized vocabulary when it opts in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeCapabilities: u32 {
        /// Values of this type collect dependency declarations.
        const DEPENDENCY_COLLECTOR = 1 << 0;
    }
}
