use std::fmt;

use serde::Serialize;

use crate::descriptor::TypeKey;

/// Element a configuration error points back to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    /// A module type
    Module(TypeKey),
    /// A method, rendered as `Type.method(params)`
    Method(String),
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSource::Module(type_key) => write!(f, "{}", type_key),
            ErrorSource::Method(method) => f.write_str(method),
        }
    }
}

/// A problem found while configuring, attributed to its offending element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationError {
    pub message: String,
    pub source: ErrorSource,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>, source: ErrorSource) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.source)
    }
}

/// Append-only collector of configuration errors for one pass
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Vec<ConfigurationError>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one error
    pub fn push(&mut self, error: ConfigurationError) {
        tracing::warn!("Configuration error: {}", error);
        self.errors.push(error);
    }

    /// Record every error of a step, keeping their order
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ConfigurationError>) {
        for error in errors {
            self.push(error);
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors recorded so far, in insertion order
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }

    /// Hand the collected errors over at the end of the pass
    pub fn drain(self) -> Vec<ConfigurationError> {
        self.errors
    }
}
