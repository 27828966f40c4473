use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::errors::sink::ConfigurationError;

/// Top-level error type for the module adapter
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationErrors),

    #[error("Provision error: {0}")]
    Provision(#[from] ProvisionError),

    #[error("Adapter configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AdapterError {
    /// Check if the error comes from a failed configuration pass
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if the error was raised while invoking a provider
    pub fn is_provision(&self) -> bool {
        matches!(self, Self::Provision(_))
    }

    /// Errors of the failed pass, if this is a configuration failure
    pub fn configuration_errors(&self) -> Option<&[ConfigurationError]> {
        match self {
            Self::Configuration(errors) => Some(errors.errors()),
            _ => None,
        }
    }
}

/// Error raised when the host invokes a translated provider
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{method} is an instance method, but its module was supplied as a type; pass a module instance instead")]
    MissingInstance { method: String },

    #[error("{method} was invoked on a module instance that is not a {expected}")]
    InstanceMismatch { method: String, expected: String },

    #[error("{method} has no implementation")]
    NoImplementation { method: String },

    #[error("{method} expected a value for dependency #{index} ({key}), but none was supplied")]
    MissingDependency {
        method: String,
        index: usize,
        key: String,
    },

    #[error("{method} expected dependency #{index} to be a {expected}")]
    DependencyTypeMismatch {
        method: String,
        index: usize,
        expected: String,
    },

    #[error("{method} failed: {source}")]
    Failed {
        method: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProvisionError {
    /// Create a missing instance error
    pub fn missing_instance(method: impl Into<String>) -> Self {
        Self::MissingInstance {
            method: method.into(),
        }
    }

    /// Wrap an error raised by a provider body
    pub fn failed(
        method: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Failed {
            method: method.into(),
            source: source.into(),
        }
    }

    /// Check if the error is a missing module instance
    pub fn is_missing_instance(&self) -> bool {
        matches!(self, Self::MissingInstance { .. })
    }
}

/// Every configuration error collected during one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationErrors {
    errors: Vec<ConfigurationError>,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    count: usize,
    errors: &'a [ConfigurationError],
}

impl ConfigurationErrors {
    pub fn new(errors: Vec<ConfigurationError>) -> Self {
        Self { errors }
    }

    /// Errors in the order they were recorded
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ConfigurationError> {
        self.errors
    }

    /// Render the errors as a JSON diagnostic report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&ErrorReport {
            count: self.errors.len(),
            errors: &self.errors,
        })
    }
}

impl std::fmt::Display for ConfigurationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Module configuration failed, see the following errors:")?;
        for (index, error) in self.errors.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}) {}", index + 1, error.message)?;
            writeln!(f, "  at {}", error.source)?;
        }
        writeln!(f)?;
        match self.errors.len() {
            1 => write!(f, "1 error"),
            n => write!(f, "{} errors", n),
        }
    }
}

impl std::error::Error for ConfigurationErrors {}
