//! Host-side contract: what the adapter hands to the container, and an
//! in-memory registry that accepts it.

pub mod binding;
pub mod registry;
pub mod sink;

pub use binding::{BindingSpec, ModuleInstance, Producer, Provenance};
pub use registry::{BindingRegistry, Configuration};
pub use sink::ConfigurationSink;
