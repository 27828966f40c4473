//! Adapter that lets modules written for a foreign, annotation-driven
//! dependency-injection system configure a host container.
//!
//! Each candidate module is validated (module marker, no sub-modules, no
//! unsupported directives) and its provider methods are translated into
//! binding specs. Problems are collected over the whole pass and reported
//! together.

pub mod config;
pub mod container;
pub mod descriptor;
pub mod errors;
pub mod modules;

pub use config::{AdapterConfig, AdapterConfigTrait, ConfigError, ConfigSource};
pub use container::{
    BindingRegistry, BindingSpec, Configuration, ConfigurationSink, Producer, Provenance,
};
pub use descriptor::{
    BindingKey, Dependencies, DescribeModule, Directive, DirectiveKind, Key, MethodDescriptor,
    Provided, TypeDescriptor, TypeKey,
};
pub use errors::{
    AdapterError, ConfigurationError, ConfigurationErrors, ErrorSink, ErrorSource, ProvisionError,
};
pub use modules::{ModuleAdapter, ModuleCandidate, ModuleValidator, ProviderMethodTranslator};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get adapter version
pub fn version() -> &'static str {
    VERSION
}
