//! Schema components shipped with the framework.
//!
//! - [`SoftwareTypeComponent`] - one configuring function per registered
//!   software type, in a plugin-activating and a convention variant
//! - [`DependencyCollectorBinding`] - `implementation(...)`-style overloads
//!   for dependency-collector properties
//! - [`DependencyConfigurationsComponent`] - the binding packaged as a
//!   component with its shared parameters

mod dependency_collector;
mod dependency_configurations;
pub mod software_type;

pub use dependency_collector::DependencyCollectorBinding;
pub use dependency_configurations::DependencyConfigurationsComponent;
pub use software_type::{
    ActivationPolicy, SoftwareTypeComponent, SoftwareTypeImplementation, SoftwareTypeRegistry,
    StaticSoftwareTypeRegistry,
};
