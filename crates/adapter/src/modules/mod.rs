pub mod adapter;
pub mod candidate;
pub mod translator;
pub mod validator;

pub use adapter::ModuleAdapter;
pub use candidate::{ModuleAnnotationInfo, ModuleCandidate};
pub use translator::{ProviderMethodTranslator, Translation};
pub use validator::{ModuleValidator, Validation};
