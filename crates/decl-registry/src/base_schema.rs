//! The base schema produced by host type discovery.
//!
//! Discovery of host types is done outside this crate. Its result is handed
//! over as a [`BaseSchema`]: a set of [`DataClass`] entries with properties,
//! explicitly declared [`TypeCapabilities`], and any functions or
//! constructors the discovery already found. Components extend it; they never
//! reach back into the host.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use decl_core::{
    DataConstructor, DataTypeRef, SchemaMemberFunction, TypeCapabilities, TypeHash,
};

/// A property of a schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataProperty {
    /// Property name.
    pub name: String,
    /// Declared type of the property value.
    pub type_ref: DataTypeRef,
    /// Whether the property can only be read.
    pub is_read_only: bool,
}

impl DataProperty {
    pub fn new(name: impl Into<String>, type_ref: DataTypeRef, is_read_only: bool) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_read_only,
        }
    }

    /// A read-only property, the usual shape for nested configuration objects.
    pub fn read_only(name: impl Into<String>, type_ref: DataTypeRef) -> Self {
        Self::new(name, type_ref, true)
    }
}

/// A type in the schema with its members.
///
/// Built with chained calls:
///
/// ```
/// use decl_core::{DataTypeRef, TypeCapabilities};
/// use decl_registry::{DataClass, DataProperty};
///
/// let deps = DataClass::new(DataTypeRef::named("DependencyCollector"))
///     .capabilities(TypeCapabilities::DEPENDENCY_COLLECTOR);
/// let project = DataClass::new(DataTypeRef::named("Project"))
///     .property(DataProperty::read_only("implementation", deps.type_ref.clone()));
///
/// assert_eq!(project.properties.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataClass {
    /// The type this entry describes.
    pub type_ref: DataTypeRef,
    /// Properties in declaration order.
    pub properties: Vec<DataProperty>,
    /// Member functions in contribution order.
    pub member_functions: Vec<SchemaMemberFunction>,
    /// Constructors in contribution order.
    pub constructors: Vec<DataConstructor>,
    /// Declared capabilities.
    pub capabilities: TypeCapabilities,
}

impl DataClass {
    /// Create an empty class for a type.
    pub fn new(type_ref: DataTypeRef) -> Self {
        Self {
            type_ref,
            properties: Vec::new(),
            member_functions: Vec::new(),
            constructors: Vec::new(),
            capabilities: TypeCapabilities::empty(),
        }
    }

    pub fn property(mut self, property: DataProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn function(mut self, function: SchemaMemberFunction) -> Self {
        self.member_functions.push(function);
        self
    }

    pub fn constructor(mut self, constructor: DataConstructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn capabilities(mut self, capabilities: TypeCapabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    /// Find a property by name.
    pub fn find_property(&self, name: &str) -> Option<&DataProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Iterate member functions with the given name.
    pub fn functions_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a SchemaMemberFunction> {
        self.member_functions.iter().filter(move |f| f.name == name)
    }

    pub fn type_hash(&self) -> TypeHash {
        self.type_ref.type_hash()
    }
}

/// The pre-extension schema handed over by host type discovery.
#[derive(Debug, Clone, Default)]
pub struct BaseSchema {
    classes: FxHashMap<TypeHash, DataClass>,
    /// Registration order, kept so iteration is deterministic.
    order: Vec<TypeHash>,
}

impl BaseSchema {
    /// Create an empty base schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. A later class for the same type replaces the earlier one.
    pub fn register_class(&mut self, class: DataClass) {
        let hash = class.type_hash();
        if self.classes.insert(hash, class).is_none() {
            self.order.push(hash);
        }
    }

    /// Builder-style variant of [`register_class`](Self::register_class).
    pub fn with_class(mut self, class: DataClass) -> Self {
        self.register_class(class);
        self
    }

    pub fn get(&self, type_ref: &DataTypeRef) -> Option<&DataClass> {
        self.classes.get(&type_ref.type_hash())
    }

    pub fn contains(&self, type_ref: &DataTypeRef) -> bool {
        self.classes.contains_key(&type_ref.type_hash())
    }

    /// Iterate classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &DataClass> {
        self.order.iter().filter_map(|hash| self.classes.get(hash))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Build the lookup index handed to function extractors and resolvers.
    pub fn pre_index(&self) -> PreIndex {
        let mut index = PreIndex::default();
        for class in self.classes() {
            index.capabilities.insert(class.type_hash(), class.capabilities);
            index
                .properties
                .insert(class.type_hash(), Arc::from(class.properties.clone()));
        }
        index
    }
}

/// Index over the base schema, built once per composition.
///
/// Function extractors use it to look at property types and capabilities
/// without re-walking the base schema, and runtime resolvers receive the same
/// index to recognise the functions they synthesized.
#[derive(Debug, Clone, Default)]
pub struct PreIndex {
    properties: FxHashMap<TypeHash, Arc<[DataProperty]>>,
    capabilities: FxHashMap<TypeHash, TypeCapabilities>,
}

impl PreIndex {
    /// Properties declared on a type (empty for unknown types).
    pub fn properties(&self, type_ref: &DataTypeRef) -> &[DataProperty] {
        self.properties
            .get(&type_ref.type_hash())
            .map(|props| &props[..])
            .unwrap_or(&[])
    }

    /// Find a property on a type by name.
    pub fn property(&self, type_ref: &DataTypeRef, name: &str) -> Option<&DataProperty> {
        self.properties(type_ref).iter().find(|p| p.name == name)
    }

    /// Capabilities declared by a type (empty for unknown types).
    pub fn capabilities(&self, type_ref: &DataTypeRef) -> TypeCapabilities {
        self.capabilities
            .get(&type_ref.type_hash())
            .copied()
            .unwrap_or_default()
    }

    pub fn has_capability(&self, type_ref: &DataTypeRef, capability: TypeCapabilities) -> bool {
        self.capabilities(type_ref).contains(capability)
    }

    /// Properties of a type whose declared type has `capability`.
    pub fn properties_with_capability<'a>(
        &'a self,
        type_ref: &DataTypeRef,
        capability: TypeCapabilities,
    ) -> impl Iterator<Item = &'a DataProperty> + use<'a> {
        self.properties(type_ref)
            .iter()
            .filter(move |p| self.has_capability(&p.type_ref, capability))
    }
}
