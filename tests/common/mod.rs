//! Test host: an in-memory project model with plugins, extensions and
//! dependency collectors.

#![allow(dead_code)]

use std::any::Any;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use decl::decl_components::{SoftwareTypeImplementation, StaticSoftwareTypeRegistry};
use decl::decl_core::{
    DataTypeRef, DependencyCollector, DependencyDeclaration, HostError, HostObject, HostRef,
    PluginId, PluginTarget, TypeCapabilities,
};
use decl::decl_registry::{BaseSchema, DataClass, DataProperty};
use decl::phases::{PROJECT_TYPE, SETTINGS_TYPE};

/// Load a file from `tests/fixtures`.
pub fn load_fixture(filename: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

// =============================================================================
// Base schema
// =============================================================================

pub fn dependencies_type() -> DataTypeRef {
    DataTypeRef::named("Dependencies")
}

pub fn collector_type() -> DataTypeRef {
    DataTypeRef::named("DependencyCollector")
}

/// Project and Settings, each with a `dependencies` block holding two
/// collectors and one plain property.
pub fn base_schema() -> BaseSchema {
    let dependencies = DataProperty::read_only("dependencies", dependencies_type());
    BaseSchema::new()
        .with_class(DataClass::new(DataTypeRef::named(PROJECT_TYPE)).property(dependencies.clone()))
        .with_class(DataClass::new(DataTypeRef::named(SETTINGS_TYPE)).property(dependencies))
        .with_class(
            DataClass::new(dependencies_type())
                .property(DataProperty::read_only("implementation", collector_type()))
                .property(DataProperty::read_only("api", collector_type()))
                .property(DataProperty::new("description", DataTypeRef::string(), false)),
        )
        .with_class(
            DataClass::new(collector_type()).capabilities(TypeCapabilities::DEPENDENCY_COLLECTOR),
        )
}

pub fn java_application() -> SoftwareTypeImplementation {
    SoftwareTypeImplementation::new(
        "javaApplication",
        DataTypeRef::named("JavaApplication"),
        PluginId::from("java-application"),
    )
}

pub fn kotlin_library() -> SoftwareTypeImplementation {
    SoftwareTypeImplementation::new(
        "kotlinLibrary",
        DataTypeRef::named("KotlinLibrary"),
        PluginId::from("kotlin-library"),
    )
}

pub fn registry() -> StaticSoftwareTypeRegistry {
    StaticSoftwareTypeRegistry::from_implementations([java_application(), kotlin_library()])
        .expect("distinct software types")
}

// =============================================================================
// Host objects
// =============================================================================

/// An extension object registered by a plugin.
#[derive(Debug)]
pub struct TestExtension {
    pub name: String,
}

impl HostObject for TestExtension {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Records every declaration added to it.
#[derive(Debug, Default)]
pub struct TestCollector {
    pub declarations: Mutex<Vec<DependencyDeclaration>>,
}

impl TestCollector {
    pub fn coordinates(&self) -> Vec<String> {
        self.declarations
            .lock()
            .unwrap()
            .iter()
            .filter_map(|d| d.coordinate().map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.declarations.lock().unwrap().len()
    }
}

impl HostObject for TestCollector {
    fn type_name(&self) -> &str {
        "DependencyCollector"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_dependency_collector(&self) -> Option<&dyn DependencyCollector> {
        Some(self)
    }
}

impl DependencyCollector for TestCollector {
    fn add(&self, dependency: DependencyDeclaration) {
        self.declarations.lock().unwrap().push(dependency);
    }
}

#[derive(Debug, Default)]
pub struct TestDependencies {
    pub implementation: Arc<TestCollector>,
    pub api: Arc<TestCollector>,
}

impl HostObject for TestDependencies {
    fn type_name(&self) -> &str {
        "Dependencies"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn property(&self, name: &str) -> Option<HostRef> {
        match name {
            "implementation" => Some(self.implementation.clone() as HostRef),
            "api" => Some(self.api.clone() as HostRef),
            _ => None,
        }
    }
}

/// A project that registers an extension named after the software type
/// when its plugin is applied. Applying a plugin twice is a no-op.
#[derive(Debug)]
pub struct TestProject {
    pub path: String,
    plugins: FxHashMap<PluginId, String>,
    applied: Mutex<Vec<PluginId>>,
    applications: AtomicUsize,
    extensions: Mutex<FxHashMap<String, HostRef>>,
    pub dependencies: Arc<TestDependencies>,
}

impl TestProject {
    /// A project that knows the plugins of the given software types.
    pub fn new(path: &str, software_types: &[SoftwareTypeImplementation]) -> Arc<Self> {
        Arc::new(Self {
            path: path.to_string(),
            plugins: software_types
                .iter()
                .map(|s| (s.plugin_id.clone(), s.software_type.clone()))
                .collect(),
            applied: Mutex::new(Vec::new()),
            applications: AtomicUsize::new(0),
            extensions: Mutex::new(FxHashMap::default()),
            dependencies: Arc::default(),
        })
    }

    pub fn applied_plugins(&self) -> Vec<PluginId> {
        self.applied.lock().unwrap().clone()
    }

    /// Plugin applications that changed the project.
    pub fn application_count(&self) -> usize {
        self.applications.load(Ordering::SeqCst)
    }
}

impl HostObject for TestProject {
    fn type_name(&self) -> &str {
        "Project"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_plugin_target(&self) -> Option<&dyn PluginTarget> {
        Some(self)
    }

    fn property(&self, name: &str) -> Option<HostRef> {
        (name == "dependencies").then(|| self.dependencies.clone() as HostRef)
    }
}

impl PluginTarget for TestProject {
    fn apply_plugin(&self, plugin: &PluginId) -> Result<(), HostError> {
        let extension = self
            .plugins
            .get(plugin)
            .ok_or_else(|| HostError::new(format!("plugin '{plugin}' not found")))?;

        let mut applied = self.applied.lock().unwrap();
        if applied.contains(plugin) {
            return Ok(());
        }
        applied.push(plugin.clone());
        self.applications.fetch_add(1, Ordering::SeqCst);
        self.extensions.lock().unwrap().insert(
            extension.clone(),
            Arc::new(TestExtension {
                name: extension.clone(),
            }),
        );
        Ok(())
    }

    fn extension(&self, name: &str) -> Option<HostRef> {
        self.extensions.lock().unwrap().get(name).cloned()
    }
}

/// Settings receiver: no plugin support.
#[derive(Debug, Default)]
pub struct TestSettings {
    pub dependencies: Arc<TestDependencies>,
}

impl HostObject for TestSettings {
    fn type_name(&self) -> &str {
        "Settings"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn property(&self, name: &str) -> Option<HostRef> {
        (name == "dependencies").then(|| self.dependencies.clone() as HostRef)
    }
}
