//! The immutable composed schema.

use rustc_hash::FxHashMap;

use decl_core::{
    AccessorId, DataConstructor, DataTypeRef, SchemaMemberFunction, TypeHash, ValidationError,
};

use crate::DataClass;

/// The schema a declarative document is validated against.
///
/// Produced by [`SchemaBuilder::build`](crate::SchemaBuilder::build) and never
/// mutated afterwards. Classes keep the order in which composition visited
/// them, so two schemas built from identical inputs compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSchema {
    top_level: DataTypeRef,
    classes: Vec<DataClass>,
    class_index: FxHashMap<TypeHash, usize>,
    /// func_hash -> (class index, function index)
    function_index: FxHashMap<TypeHash, (usize, usize)>,
    custom_accessor_ids: Vec<AccessorId>,
}

impl EvaluationSchema {
    pub(crate) fn new(top_level: DataTypeRef, classes: Vec<DataClass>) -> Self {
        let mut class_index = FxHashMap::default();
        let mut function_index = FxHashMap::default();
        let mut custom_accessor_ids = Vec::new();

        for (ci, class) in classes.iter().enumerate() {
            class_index.insert(class.type_hash(), ci);
            for (fi, function) in class.member_functions.iter().enumerate() {
                function_index.entry(function.func_hash()).or_insert((ci, fi));
                if let Some(id) = function
                    .semantics
                    .configure_accessor()
                    .and_then(|a| a.custom_accessor_id())
                {
                    custom_accessor_ids.push(id.clone());
                }
            }
        }

        Self {
            top_level,
            classes,
            class_index,
            function_index,
            custom_accessor_ids,
        }
    }

    /// The receiver type of top-level statements.
    pub fn top_level_receiver(&self) -> &DataTypeRef {
        &self.top_level
    }

    pub fn data_class(&self, ty: &DataTypeRef) -> Option<&DataClass> {
        self.class_index
            .get(&ty.type_hash())
            .map(|&index| &self.classes[index])
    }

    /// All classes in visiting order.
    pub fn classes(&self) -> &[DataClass] {
        &self.classes
    }

    /// Member functions of a type (empty for unknown types).
    pub fn member_functions(&self, ty: &DataTypeRef) -> &[SchemaMemberFunction] {
        self.data_class(ty)
            .map(|class| class.member_functions.as_slice())
            .unwrap_or_default()
    }

    pub fn constructors(&self, ty: &DataTypeRef) -> &[DataConstructor] {
        self.data_class(ty)
            .map(|class| class.constructors.as_slice())
            .unwrap_or_default()
    }

    /// Look up a function by identity hash.
    pub fn find_function(&self, func_hash: TypeHash) -> Option<&SchemaMemberFunction> {
        self.function_index
            .get(&func_hash)
            .map(|&(ci, fi)| &self.classes[ci].member_functions[fi])
    }

    /// All functions with `name` on `ty`, in contribution order.
    pub fn overloads<'a>(&'a self, ty: &DataTypeRef, name: &str) -> Vec<&'a SchemaMemberFunction> {
        self.member_functions(ty)
            .iter()
            .filter(|f| f.name == name)
            .collect()
    }

    /// Pick the single overload of `ty.name` that accepts `arg_types`.
    ///
    /// # Errors
    ///
    /// - `UnknownFunction` if `ty` has no function called `name`
    /// - `NoMatchingOverload` if none accepts the argument types
    /// - `AmbiguousOverload` if more than one does
    pub fn resolve_call(
        &self,
        ty: &DataTypeRef,
        name: &str,
        arg_types: &[DataTypeRef],
    ) -> Result<&SchemaMemberFunction, ValidationError> {
        let overloads = self.overloads(ty, name);
        if overloads.is_empty() {
            return Err(ValidationError::UnknownFunction {
                receiver: ty.name().to_string(),
                name: name.to_string(),
            });
        }

        let matching: Vec<_> = overloads
            .into_iter()
            .filter(|f| f.accepts(arg_types))
            .collect();

        match matching.as_slice() {
            [single] => Ok(*single),
            [] => Err(ValidationError::NoMatchingOverload {
                receiver: ty.name().to_string(),
                name: name.to_string(),
                arg_types: arg_types.iter().map(|t| t.name().to_string()).collect(),
            }),
            candidates => Err(ValidationError::AmbiguousOverload {
                receiver: ty.name().to_string(),
                name: name.to_string(),
                candidates: candidates.iter().map(|f| f.signature()).collect(),
            }),
        }
    }

    /// Ids of every custom accessor declared by a schema function.
    pub fn custom_accessor_ids(&self) -> &[AccessorId] {
        &self.custom_accessor_ids
    }

    pub fn function_count(&self) -> usize {
        self.classes.iter().map(|c| c.member_functions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decl_core::{
        AccessAndConfigureReturnType, ConfigureAccessor, ConfigureBlockRequirement, DataParameter,
        FunctionSemantics,
    };
    use std::sync::Arc;

    fn deps() -> DataTypeRef {
        DataTypeRef::named("Dependencies")
    }

    fn add(name: &str, param: DataTypeRef) -> SchemaMemberFunction {
        SchemaMemberFunction::new(
            deps(),
            name,
            vec![Arc::new(DataParameter::simple("dependency", param.clone()))],
            true,
            FunctionSemantics::AddAndConfigure {
                object_type: param,
                block_requirement: ConfigureBlockRequirement::Optional,
            },
        )
    }

    fn schema() -> EvaluationSchema {
        let configure = SchemaMemberFunction::new(
            DataTypeRef::named("Project"),
            "javaApplication",
            Vec::new(),
            true,
            FunctionSemantics::AccessAndConfigure {
                accessor: ConfigureAccessor::custom(
                    DataTypeRef::named("JavaApplication"),
                    AccessorId::new("proj", "javaApplication"),
                ),
                return_type: AccessAndConfigureReturnType::Unit,
                block_requirement: ConfigureBlockRequirement::Required,
            },
        );
        EvaluationSchema::new(
            DataTypeRef::named("Project"),
            vec![
                DataClass::new(DataTypeRef::named("Project")).function(configure),
                DataClass::new(deps())
                    .function(add("implementation", DataTypeRef::string()))
                    .function(add("implementation", DataTypeRef::project_dependency())),
            ],
        )
    }

    #[test]
    fn resolve_call_by_declared_type() {
        let schema = schema();
        let by_string = schema
            .resolve_call(&deps(), "implementation", &[DataTypeRef::string()])
            .unwrap();
        let by_project = schema
            .resolve_call(&deps(), "implementation", &[DataTypeRef::project_dependency()])
            .unwrap();
        assert_ne!(by_string.func_hash(), by_project.func_hash());
    }

    #[test]
    fn resolve_call_errors() {
        let schema = schema();
        assert!(matches!(
            schema.resolve_call(&deps(), "implementation", &[DataTypeRef::int()]),
            Err(ValidationError::NoMatchingOverload { .. })
        ));
        assert!(matches!(
            schema.resolve_call(&deps(), "api", &[DataTypeRef::string()]),
            Err(ValidationError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn ambiguous_overloads_are_reported() {
        let mut vararg = DataParameter::simple("values", DataTypeRef::string());
        vararg.is_vararg = true;
        let f = SchemaMemberFunction::new(
            deps(),
            "implementation",
            vec![Arc::new(vararg)],
            true,
            FunctionSemantics::Builder,
        );
        let schema = EvaluationSchema::new(
            deps(),
            vec![
                DataClass::new(deps())
                    .function(add("implementation", DataTypeRef::string()))
                    .function(f),
            ],
        );
        let err = schema
            .resolve_call(&deps(), "implementation", &[DataTypeRef::string()])
            .unwrap_err();
        match err {
            ValidationError::AmbiguousOverload { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lookups() {
        let schema = schema();
        assert_eq!(schema.top_level_receiver().name(), "Project");
        assert_eq!(schema.function_count(), 3);
        assert_eq!(schema.overloads(&deps(), "implementation").len(), 2);
        assert!(schema.member_functions(&DataTypeRef::named("Unknown")).is_empty());
        assert!(schema.constructors(&deps()).is_empty());

        let f = &schema.member_functions(&deps())[0];
        assert_eq!(schema.find_function(f.func_hash()), Some(f));
        assert_eq!(
            schema.custom_accessor_ids(),
            &[AccessorId::new("proj", "javaApplication")]
        );
    }
}
