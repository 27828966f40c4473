use std::collections::HashMap;
use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::config::{
    ConfigError, ConfigSource, ConfigValidator, DirectiveNameValidator, NamespaceValidator,
};

pub const DEFAULT_FOREIGN_NAMESPACE: &str = "dagger.";
pub const DEFAULT_MODULE_DIRECTIVE: &str = "dagger.Module";
pub const DEFAULT_PROVIDES_DIRECTIVE: &str = "dagger.Provides";
pub const DEFAULT_INTO_SET_DIRECTIVE: &str = "dagger.multibindings.IntoSet";

const ENV_PREFIX: &str = "MODULE_ADAPTER_";

/// Loading and validation contract for adapter configuration
pub trait AdapterConfigTrait: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Names the adapter uses to recognise foreign directives
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Prefix shared by every directive of the foreign system
    pub foreign_namespace: String,
    /// Marker a type needs to be accepted as a module
    pub module_directive: String,
    /// Plain provider directive
    pub provides_directive: String,
    /// Set-element contributor directive
    pub into_set_directive: String,
    /// Directives whose value qualifies a binding key
    pub qualifier_directives: Vec<String>,
    /// Directives recorded as the binding's scope
    pub scope_directives: Vec<String>,
    /// Translate only the most-derived declaration of an overridden provider
    /// instead of reporting the override
    pub allow_provider_overrides: bool,
    #[serde(skip)]
    origin: Option<String>,
    /// Fields whose value was read from the environment
    #[serde(skip)]
    env_fields: Vec<&'static str>,
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self {
            foreign_namespace: DEFAULT_FOREIGN_NAMESPACE.to_string(),
            module_directive: DEFAULT_MODULE_DIRECTIVE.to_string(),
            provides_directive: DEFAULT_PROVIDES_DIRECTIVE.to_string(),
            into_set_directive: DEFAULT_INTO_SET_DIRECTIVE.to_string(),
            qualifier_directives: vec![
                "javax.inject.Named".to_string(),
                "jakarta.inject.Named".to_string(),
            ],
            scope_directives: vec![
                "javax.inject.Singleton".to_string(),
                "jakarta.inject.Singleton".to_string(),
            ],
            allow_provider_overrides: false,
            origin: None,
            env_fields: Vec::new(),
        }
    }

    /// Parse a YAML document; missing fields keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.origin = Some("<inline yaml>".to_string());
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&contents)?;
        config.origin = Some(path.display().to_string());
        config.validate()?;
        Ok(config)
    }

    fn env_var(field: &str) -> String {
        format!("{}{}", ENV_PREFIX, field.to_uppercase())
    }

    fn read_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Read `field` from the environment, remembering that it came from there
    fn env_value(&mut self, field: &'static str) -> Option<String> {
        let value = env::var(Self::env_var(field)).ok()?;
        self.env_fields.push(field);
        Some(value)
    }

    fn source_of(&self, field: &str, is_default: bool, default: &str) -> ConfigSource {
        if self.env_fields.iter().any(|read| *read == field) {
            ConfigSource::EnvVar(Self::env_var(field))
        } else if is_default {
            ConfigSource::Default(default.to_string())
        } else {
            match &self.origin {
                Some(origin) => ConfigSource::File(origin.clone()),
                None => ConfigSource::Programmatic,
            }
        }
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterConfigTrait for AdapterConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Some(namespace) = config.env_value("foreign_namespace") {
            config.foreign_namespace = namespace;
        }

        if let Some(name) = config.env_value("module_directive") {
            config.module_directive = name;
        }

        if let Some(name) = config.env_value("provides_directive") {
            config.provides_directive = name;
        }

        if let Some(name) = config.env_value("into_set_directive") {
            config.into_set_directive = name;
        }

        if let Some(names) = config.env_value("qualifier_directives") {
            config.qualifier_directives = Self::read_list(&names);
        }

        if let Some(names) = config.env_value("scope_directives") {
            config.scope_directives = Self::read_list(&names);
        }

        if let Some(flag) = config.env_value("allow_provider_overrides") {
            config.allow_provider_overrides =
                flag.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "allow_provider_overrides".to_string(),
                    value: flag,
                    expected: "true or false".to_string(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        NamespaceValidator.validate("foreign_namespace", &self.foreign_namespace)?;

        let foreign = DirectiveNameValidator::within(self.foreign_namespace.clone());
        foreign.validate("module_directive", &self.module_directive)?;
        foreign.validate("provides_directive", &self.provides_directive)?;
        foreign.validate("into_set_directive", &self.into_set_directive)?;

        if self.provides_directive == self.into_set_directive {
            return Err(ConfigError::invalid_value(
                "into_set_directive",
                &self.into_set_directive,
                "a directive different from provides_directive",
            ));
        }

        let any = DirectiveNameValidator::default();
        for name in &self.qualifier_directives {
            any.validate("qualifier_directives", name)?;
        }
        for name in &self.scope_directives {
            any.validate("scope_directives", name)?;
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let defaults = Self::new();
        let mut sources = HashMap::new();

        sources.insert(
            "foreign_namespace".to_string(),
            self.source_of(
                "foreign_namespace",
                self.foreign_namespace == defaults.foreign_namespace,
                DEFAULT_FOREIGN_NAMESPACE,
            ),
        );
        sources.insert(
            "module_directive".to_string(),
            self.source_of(
                "module_directive",
                self.module_directive == defaults.module_directive,
                DEFAULT_MODULE_DIRECTIVE,
            ),
        );
        sources.insert(
            "provides_directive".to_string(),
            self.source_of(
                "provides_directive",
                self.provides_directive == defaults.provides_directive,
                DEFAULT_PROVIDES_DIRECTIVE,
            ),
        );
        sources.insert(
            "into_set_directive".to_string(),
            self.source_of(
                "into_set_directive",
                self.into_set_directive == defaults.into_set_directive,
                DEFAULT_INTO_SET_DIRECTIVE,
            ),
        );
        sources.insert(
            "qualifier_directives".to_string(),
            self.source_of(
                "qualifier_directives",
                self.qualifier_directives == defaults.qualifier_directives,
                &defaults.qualifier_directives.join(","),
            ),
        );
        sources.insert(
            "scope_directives".to_string(),
            self.source_of(
                "scope_directives",
                self.scope_directives == defaults.scope_directives,
                &defaults.scope_directives.join(","),
            ),
        );
        sources.insert(
            "allow_provider_overrides".to_string(),
            self.source_of(
                "allow_provider_overrides",
                self.allow_provider_overrides == defaults.allow_provider_overrides,
                "false",
            ),
        );

        sources
    }
}
