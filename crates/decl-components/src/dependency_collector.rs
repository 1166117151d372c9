//! Dependency-collector binding.
//!
//! Any property whose declared type has the
//! [`DEPENDENCY_COLLECTOR`](TypeCapabilities::DEPENDENCY_COLLECTOR) capability
//! gets two member functions named after the property:
//!
//! ```text
//! implementation(dependency: String)            // "group:artifact:version"
//! implementation(dependency: ProjectDependency) // project reference
//! ```
//!
//! At runtime the overload is picked by declared parameter type, and the
//! binding appends the argument to the collector held by the property. The
//! calls produce no object, so they take no configuring block.

use std::sync::Arc;

use tracing::trace;

use decl_core::{
    BindingError, ConfigureBlockRequirement, DataParameter, DataTypeRef, DependencyDeclaration,
    DependencyKind, FunctionSemantics, RuntimeFunction, RuntimeValue,
    SchemaMemberFunction, TypeCapabilities,
};
use decl_registry::{FunctionExtractor, PreIndex, Resolution, RuntimeFunctionResolver};

/// Function extractor and runtime resolver for dependency collectors.
///
/// Both overloads of every collector function share the two parameter
/// descriptors given at construction.
#[derive(Debug, Clone)]
pub struct DependencyCollectorBinding {
    coordinate_param: Arc<DataParameter>,
    project_param: Arc<DataParameter>,
}

impl DependencyCollectorBinding {
    pub fn new(coordinate_param: Arc<DataParameter>, project_param: Arc<DataParameter>) -> Self {
        Self {
            coordinate_param,
            project_param,
        }
    }

    pub fn coordinate_param(&self) -> &Arc<DataParameter> {
        &self.coordinate_param
    }

    pub fn project_param(&self) -> &Arc<DataParameter> {
        &self.project_param
    }

    fn collector_function(
        &self,
        receiver: &DataTypeRef,
        property: &str,
        param: &Arc<DataParameter>,
    ) -> SchemaMemberFunction {
        SchemaMemberFunction::new(
            receiver.clone(),
            property,
            vec![Arc::clone(param)],
            true,
            FunctionSemantics::AddAndConfigure {
                object_type: param.type_ref.clone(),
                block_requirement: ConfigureBlockRequirement::NotAllowed,
            },
        )
    }

    fn kind_for(&self, param_types: &[DataTypeRef]) -> Option<DependencyKind> {
        match param_types {
            [ty] if *ty == self.coordinate_param.type_ref => Some(DependencyKind::Coordinate),
            [ty] if *ty == self.project_param.type_ref => Some(DependencyKind::Project),
            _ => None,
        }
    }
}

impl FunctionExtractor for DependencyCollectorBinding {
    fn member_functions(&self, ty: &DataTypeRef, pre_index: &PreIndex) -> Vec<SchemaMemberFunction> {
        pre_index
            .properties_with_capability(ty, TypeCapabilities::DEPENDENCY_COLLECTOR)
            .flat_map(|property| {
                [
                    self.collector_function(ty, &property.name, &self.coordinate_param),
                    self.collector_function(ty, &property.name, &self.project_param),
                ]
            })
            .collect()
    }
}

impl RuntimeFunctionResolver for DependencyCollectorBinding {
    fn resolve(
        &self,
        receiver_type: &DataTypeRef,
        name: &str,
        param_types: &[DataTypeRef],
        pre_index: &PreIndex,
    ) -> Resolution {
        let is_collector = pre_index.property(receiver_type, name).is_some_and(|property| {
            pre_index.has_capability(&property.type_ref, TypeCapabilities::DEPENDENCY_COLLECTOR)
        });
        if !is_collector {
            return Resolution::Unresolved;
        }
        let Some(kind) = self.kind_for(param_types) else {
            return Resolution::Unresolved;
        };

        trace!(receiver = %receiver_type, name, ?kind, "resolved dependency collector function");
        let label = format!("{receiver_type}.{name}({})", param_types[0]);
        Resolution::Resolved(add_dependency(name.to_string(), kind, label))
    }
}

fn add_dependency(property: String, kind: DependencyKind, label: String) -> RuntimeFunction {
    let signature = label.clone();
    RuntimeFunction::new(label, move |receiver, args| {
        let holder = receiver
            .property(&property)
            .ok_or_else(|| BindingError::MissingProperty {
                name: property.clone(),
                receiver: receiver.type_name().to_string(),
            })?;
        let collector =
            holder
                .as_dependency_collector()
                .ok_or_else(|| BindingError::NotACollector {
                    property: property.clone(),
                    receiver: receiver.type_name().to_string(),
                })?;

        let declaration = match (kind, args) {
            (DependencyKind::Coordinate, [RuntimeValue::String(notation)]) => {
                DependencyDeclaration::Coordinate(notation.clone())
            }
            (DependencyKind::Project, [RuntimeValue::Object(project)]) => {
                DependencyDeclaration::Project(Arc::clone(project))
            }
            _ => {
                return Err(BindingError::ArgumentMismatch {
                    function: signature.clone(),
                    expected: expected_argument(kind).to_string(),
                    actual: describe_arguments(args),
                });
            }
        };
        collector.add(declaration);
        Ok(RuntimeValue::Unit)
    })
}

fn expected_argument(kind: DependencyKind) -> &'static str {
    match kind {
        DependencyKind::Coordinate => "string",
        DependencyKind::Project => "object",
    }
}

fn describe_arguments(args: &[RuntimeValue]) -> String {
    match args {
        [single] => single.kind_name().to_string(),
        _ => format!("{} arguments", args.len()),
    }
}
