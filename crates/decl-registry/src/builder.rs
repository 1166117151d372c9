//! Schema composition.
//!
//! [`SchemaBuilder`] folds the facets of an ordered component list into one
//! [`EvaluationSchema`] and one [`RuntimeResolution`]:
//!
//! 1. Walk types breadth-first from the top-level receiver. Successors of a
//!    type are the types of its base-schema properties that the base schema
//!    knows, then the hints of every type-discovery facet. Root types that a
//!    discovery facet names and the walk did not reach start further walks,
//!    in component order.
//! 2. For each visited type, take its base-schema members and append what
//!    every function extractor contributes, in component order.
//! 3. Check function identity, constructor identity and accessor ids once
//!    over the whole result, collecting every conflict.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use decl_core::{AccessorId, DataTypeRef, SchemaBuildError, TypeHash};

use crate::{
    BaseSchema, DataClass, EvaluationSchema, EvaluationSchemaComponent, FunctionExtractor,
    PreIndex, RuntimeCustomAccessors, RuntimeFunctionResolver, RuntimeResolution, TypeDiscovery,
};

/// Result of a successful composition.
#[derive(Debug, Clone)]
pub struct ComposedSchema {
    pub schema: EvaluationSchema,
    pub runtime: RuntimeResolution,
}

/// Collects components and composes them over a base schema.
pub struct SchemaBuilder {
    base: BaseSchema,
    components: Vec<Arc<dyn EvaluationSchemaComponent>>,
}

impl SchemaBuilder {
    pub fn new(base: BaseSchema) -> Self {
        Self {
            base,
            components: Vec::new(),
        }
    }

    /// Append a component. Order matters for contribution order and runtime
    /// lookup priority.
    pub fn add_component(&mut self, component: Arc<dyn EvaluationSchemaComponent>) -> &mut Self {
        self.components.push(component);
        self
    }

    /// Builder-style variant of [`add_component`](Self::add_component).
    pub fn with_component(mut self, component: Arc<dyn EvaluationSchemaComponent>) -> Self {
        self.components.push(component);
        self
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Compose the schema rooted at `top_level`.
    ///
    /// The builder is not consumed; building twice from the same inputs
    /// yields equal schemas.
    ///
    /// # Errors
    ///
    /// Returns every conflict found: duplicate function or constructor
    /// identities, duplicate accessor ids, or an unknown top-level type.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build(&self, top_level: &DataTypeRef) -> Result<ComposedSchema, Vec<SchemaBuildError>> {
        if !self.base.contains(top_level) {
            return Err(vec![SchemaBuildError::UnknownType(top_level.name().to_string())]);
        }

        let discovery: Vec<Arc<dyn TypeDiscovery>> = self
            .components
            .iter()
            .flat_map(|c| c.type_discovery())
            .collect();
        let extractors: Vec<Arc<dyn FunctionExtractor>> = self
            .components
            .iter()
            .flat_map(|c| c.function_extractors())
            .collect();
        let resolvers: Vec<Arc<dyn RuntimeFunctionResolver>> = self
            .components
            .iter()
            .flat_map(|c| c.runtime_function_resolvers())
            .collect();
        let accessors: Vec<Arc<dyn RuntimeCustomAccessors>> = self
            .components
            .iter()
            .flat_map(|c| c.runtime_custom_accessors())
            .collect();

        debug!(
            components = self.components.len(),
            discovery = discovery.len(),
            extractors = extractors.len(),
            resolvers = resolvers.len(),
            accessors = accessors.len(),
            top_level = %top_level,
            "composing schema"
        );

        let pre_index = self.base.pre_index();
        let visited = self.visit_types(top_level, &discovery);
        let classes: Vec<DataClass> = visited
            .into_iter()
            .map(|ty| self.compose_class(ty, &extractors, &pre_index))
            .collect();

        let mut errors = Vec::new();
        check_function_identity(&classes, &mut errors);
        check_constructor_identity(&classes, &mut errors);
        check_accessor_ids(&classes, &accessors, &mut errors);

        if !errors.is_empty() {
            for error in &errors {
                warn!(%error, "schema conflict");
            }
            return Err(errors);
        }

        let schema = EvaluationSchema::new(top_level.clone(), classes);
        debug!(
            classes = schema.classes().len(),
            functions = schema.function_count(),
            "schema composed"
        );
        let runtime = RuntimeResolution::new(resolvers, accessors, Arc::new(pre_index));
        Ok(ComposedSchema { schema, runtime })
    }

    /// Breadth-first walk from the top level, then from every unreached
    /// discovery root, in deterministic order.
    fn visit_types(
        &self,
        top_level: &DataTypeRef,
        discovery: &[Arc<dyn TypeDiscovery>],
    ) -> Vec<DataTypeRef> {
        let mut seen: FxHashSet<TypeHash> = FxHashSet::default();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        let roots = discovery.iter().flat_map(|d| d.root_types());
        for root in std::iter::once(top_level.clone()).chain(roots) {
            if !seen.insert(root.type_hash()) {
                continue;
            }
            if root != *top_level {
                debug!(%root, %top_level, "visiting discovery root unreachable from top level");
            }
            queue.push_back(root);

            while let Some(ty) = queue.pop_front() {
                let from_properties = self
                    .base
                    .get(&ty)
                    .into_iter()
                    .flat_map(|class| class.properties.iter())
                    .map(|p| p.type_ref.clone())
                    .filter(|t| self.base.contains(t));
                let hinted = discovery.iter().flat_map(|d| d.types_to_visit(&ty));

                for next in from_properties.chain(hinted).collect::<Vec<_>>() {
                    if seen.insert(next.type_hash()) {
                        queue.push_back(next);
                    }
                }
                order.push(ty);
            }
        }
        order
    }

    fn compose_class(
        &self,
        ty: DataTypeRef,
        extractors: &[Arc<dyn FunctionExtractor>],
        pre_index: &PreIndex,
    ) -> DataClass {
        let mut class = match self.base.get(&ty) {
            Some(class) => class.clone(),
            None => {
                debug!(%ty, "discovered type not in base schema, adding empty class");
                DataClass::new(ty.clone())
            }
        };
        for extractor in extractors {
            class
                .member_functions
                .extend(extractor.member_functions(&ty, pre_index));
            class
                .constructors
                .extend(extractor.constructors(&ty, pre_index));
        }
        class
    }
}

fn check_function_identity(classes: &[DataClass], errors: &mut Vec<SchemaBuildError>) {
    let mut seen: FxHashSet<TypeHash> = FxHashSet::default();
    for function in classes.iter().flat_map(|c| c.member_functions.iter()) {
        if !seen.insert(function.func_hash()) {
            errors.push(SchemaBuildError::DuplicateFunction {
                receiver: function.receiver.name().to_string(),
                name: function.name.clone(),
                signature: function.signature(),
            });
        }
    }
}

fn check_constructor_identity(classes: &[DataClass], errors: &mut Vec<SchemaBuildError>) {
    let mut seen: FxHashSet<TypeHash> = FxHashSet::default();
    for constructor in classes.iter().flat_map(|c| c.constructors.iter()) {
        if !seen.insert(constructor.ctor_hash()) {
            errors.push(SchemaBuildError::DuplicateConstructor {
                signature: constructor.signature(),
            });
        }
    }
}

fn check_accessor_ids(
    classes: &[DataClass],
    providers: &[Arc<dyn RuntimeCustomAccessors>],
    errors: &mut Vec<SchemaBuildError>,
) {
    let mut declared: FxHashSet<&AccessorId> = FxHashSet::default();
    let schema_ids = classes
        .iter()
        .flat_map(|c| c.member_functions.iter())
        .filter_map(|f| f.semantics.configure_accessor())
        .filter_map(|a| a.custom_accessor_id());
    for id in schema_ids {
        if !declared.insert(id) {
            errors.push(SchemaBuildError::DuplicateAccessorId {
                id: id.clone(),
                origin: "schema function",
            });
        }
    }

    let mut provided: FxHashSet<AccessorId> = FxHashSet::default();
    for id in providers.iter().flat_map(|p| p.accessor_ids()) {
        if !provided.insert(id.clone()) {
            errors.push(SchemaBuildError::DuplicateAccessorId {
                id,
                origin: "runtime provider",
            });
        }
    }
}
