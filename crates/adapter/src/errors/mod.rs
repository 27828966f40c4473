pub mod core;
pub mod sink;

pub use self::core::{AdapterError, ConfigurationErrors, ProvisionError};
pub use sink::{ConfigurationError, ErrorSink, ErrorSource};
