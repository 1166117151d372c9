//! Deterministic hash-based identity for schema elements.
//!
//! [`TypeHash`] is a 64-bit hash that identifies schema types, member functions
//! and constructors. Hashes are computed from names and signatures, so:
//!
//! - Two components that synthesize the same function produce the same hash
//! - Identity does not depend on registration order
//! - Overloads differing only by parameter type get distinct hashes
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that a type named
//! `foo` and a member function named `foo` never collide.
//!
//! # Examples
//!
//! ```
//! use decl_core::TypeHash;
//!
//! let project = TypeHash::from_name("Project");
//! let string = TypeHash::from_name("String");
//! let int = TypeHash::from_name("Int");
//!
//! let by_string = TypeHash::from_member_function(project, "implementation", &[string]);
//! let by_int = TypeHash::from_member_function(project, "implementation", &[int]);
//! assert_ne!(by_string, by_int);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Multiplier chaining one parameter into the running hash.
    pub const SEP: u64 = 0x6c62_272e_07bb_014f;

    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x51d2_a7c3_0e4f_9b18;

    /// Domain marker for member function hashes.
    pub const MEMBER_FUNCTION: u64 = 0x2b9e_6f01_d4a3_c875;

    /// Domain marker for constructor hashes.
    pub const CONSTRUCTOR: u64 = 0xe03c_5a97_18f2_6d4b;

    /// Seed for per-position parameter markers, so parameter order matters.
    pub const PARAM_SEED: u64 = 0x8f14_3bd6_72ac_e590;
}

/// A deterministic 64-bit hash identifying a schema type, member function, or constructor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a type name.
    ///
    /// ```
    /// use decl_core::TypeHash;
    ///
    /// assert_eq!(TypeHash::from_name("Project"), TypeHash::from_name("Project"));
    /// ```
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a member function hash from receiver type, name and parameter type hashes.
    ///
    /// This is the identity used for the function uniqueness check: the same
    /// name on a different receiver, or with different parameter types, is a
    /// different function.
    #[inline]
    pub fn from_member_function(receiver: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        let hash = hash_constants::MEMBER_FUNCTION ^ receiver.0 ^ xxh64(name.as_bytes(), 0);
        TypeHash(mix_params(hash, param_hashes))
    }

    /// Create a constructor hash from the constructed type and parameter type hashes.
    #[inline]
    pub fn from_constructor(owner: TypeHash, param_hashes: &[TypeHash]) -> Self {
        TypeHash(mix_params(hash_constants::CONSTRUCTOR ^ owner.0, param_hashes))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

#[inline]
fn mix_params(mut hash: u64, param_hashes: &[TypeHash]) -> u64 {
    for (i, param) in param_hashes.iter().enumerate() {
        let marker = xxh64(&(i as u64).to_le_bytes(), hash_constants::PARAM_SEED);
        hash = hash.wrapping_mul(hash_constants::SEP).wrapping_add(marker ^ param.0);
    }
    hash
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_hash_determinism() {
        assert_eq!(TypeHash::from_name("Project"), TypeHash::from_name("Project"));
        assert_eq!(TypeHash::from_name("Settings"), TypeHash::from_name("Settings"));
    }

    #[test]
    fn type_hash_uniqueness() {
        let project = TypeHash::from_name("Project");
        let settings = TypeHash::from_name("Settings");
        let string = TypeHash::from_name("String");

        assert_ne!(project, settings);
        assert_ne!(project, string);
        assert_ne!(settings, string);
    }

    #[test]
    fn member_function_overload_distinction() {
        let deps = TypeHash::from_name("Dependencies");
        let string = TypeHash::from_name("String");
        let project_dep = TypeHash::from_name("ProjectDependency");

        let by_string = TypeHash::from_member_function(deps, "implementation", &[string]);
        let by_project = TypeHash::from_member_function(deps, "implementation", &[project_dep]);
        let no_args = TypeHash::from_member_function(deps, "implementation", &[]);

        assert_ne!(by_string, by_project);
        assert_ne!(by_string, no_args);
        assert_ne!(by_project, no_args);
    }

    #[test]
    fn member_function_hash_includes_receiver() {
        let project = TypeHash::from_name("Project");
        let settings = TypeHash::from_name("Settings");

        // Same software type function on two phases' receivers
        let on_project = TypeHash::from_member_function(project, "javaApplication", &[]);
        let on_settings = TypeHash::from_member_function(settings, "javaApplication", &[]);
        assert_ne!(on_project, on_settings);
    }

    #[test]
    fn parameter_order_matters() {
        let owner = TypeHash::from_name("Owner");
        let a = TypeHash::from_name("A");
        let b = TypeHash::from_name("B");

        let ab = TypeHash::from_member_function(owner, "f", &[a, b]);
        let ba = TypeHash::from_member_function(owner, "f", &[b, a]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn constructor_vs_member_function() {
        let owner = TypeHash::from_name("Owner");
        let string = TypeHash::from_name("String");

        let ctor = TypeHash::from_constructor(owner, &[string]);
        let func = TypeHash::from_member_function(owner, "", &[string]);
        assert_ne!(ctor, func);
    }

    #[test]
    fn empty_hash() {
        assert!(TypeHash::EMPTY.is_empty());
        assert!(!TypeHash::from_name("Project").is_empty());
    }

    #[test]
    fn hash_display_and_debug() {
        let hash = TypeHash::from_name("Project");
        assert!(format!("{}", hash).starts_with("0x"));
        assert!(format!("{:?}", hash).starts_with("TypeHash(0x"));
    }

    #[test]
    fn many_parameters_supported() {
        let owner = TypeHash::from_name("Owner");
        let string = TypeHash::from_name("String");
        let params: Vec<TypeHash> = (0..40).map(|_| string).collect();

        let func = TypeHash::from_member_function(owner, "many", &params);
        assert!(!func.is_empty());
    }
}
