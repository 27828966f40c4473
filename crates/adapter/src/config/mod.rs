pub mod adapter_config;
pub mod sources;
pub mod validation;

pub use adapter_config::*;
pub use sources::*;
pub use validation::*;
