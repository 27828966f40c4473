use thiserror::Error;

/// Adapter configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired { field: String, hint: String },

    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create a missing required field error
    pub fn missing_required(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
            hint: hint.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Trait for validating configuration values
pub trait ConfigValidator<T: ?Sized> {
    fn validate(&self, field: &str, value: &T) -> Result<(), ConfigError>;
}

/// Checks a fully qualified directive name such as `dagger.Provides`
#[derive(Debug, Default)]
pub struct DirectiveNameValidator {
    /// Namespace the name must live in, if any
    pub namespace: Option<String>,
}

impl DirectiveNameValidator {
    pub fn within(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
        }
    }
}

impl ConfigValidator<str> for DirectiveNameValidator {
    fn validate(&self, field: &str, value: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::missing_required(
                field,
                "Directive names must not be empty",
            ));
        }

        if value.chars().any(char::is_whitespace) || value.ends_with('.') {
            return Err(ConfigError::invalid_value(
                field,
                value,
                "a qualified name such as `dagger.Provides`",
            ));
        }

        if let Some(namespace) = &self.namespace {
            if !value.starts_with(namespace.as_str()) {
                return Err(ConfigError::invalid_value(
                    field,
                    value,
                    format!("a directive inside the `{}` namespace", namespace),
                ));
            }
        }

        Ok(())
    }
}

/// Checks the foreign namespace prefix
#[derive(Debug, Default)]
pub struct NamespaceValidator;

impl ConfigValidator<str> for NamespaceValidator {
    fn validate(&self, field: &str, value: &str) -> Result<(), ConfigError> {
        if value.is_empty() {
            return Err(ConfigError::missing_required(
                field,
                "Set the package prefix of the foreign directives, e.g. `dagger.`",
            ));
        }

        if !value.ends_with('.') || value.len() < 2 || value.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid_value(
                field,
                value,
                "a package prefix ending in `.`, e.g. `dagger.`",
            ));
        }

        Ok(())
    }
}
