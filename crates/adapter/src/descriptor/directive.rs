use std::fmt;

use crate::config::AdapterConfig;
use crate::descriptor::key::TypeKey;

/// Annotation-like marker attached to a type or method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directive {
    /// Fully qualified directive name, e.g. `dagger.Provides`
    pub name: String,
    /// Single string value, e.g. the name of a `@Named` qualifier
    pub value: Option<String>,
    /// Type-valued members, e.g. a module marker's sub-module list
    pub types: Vec<TypeKey>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            types: Vec::new(),
        }
    }

    /// Set the string value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Add a type-valued member
    pub fn with_type(mut self, type_key: impl Into<TypeKey>) -> Self {
        self.types.push(type_key.into());
        self
    }

    /// Name without its namespace, `dagger.multibindings.IntoSet` -> `IntoSet`
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Classify this directive when attached to a method
    pub fn kind(&self, config: &AdapterConfig) -> DirectiveKind {
        if self.name == config.provides_directive {
            DirectiveKind::Provides
        } else if self.name == config.into_set_directive {
            DirectiveKind::IntoSet
        } else if config.qualifier_directives.iter().any(|q| *q == self.name) {
            DirectiveKind::Qualifier
        } else if config.scope_directives.iter().any(|s| *s == self.name) {
            DirectiveKind::Scope
        } else if self.name.starts_with(&config.foreign_namespace) {
            DirectiveKind::Unsupported
        } else {
            DirectiveKind::Other
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if let Some(value) = &self.value {
            write!(f, "(\"{}\")", value)?;
        }
        Ok(())
    }
}

/// How the adapter treats a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Plain provider method
    Provides,
    /// Provider contributing one element to a set
    IntoSet,
    /// Binding qualifier, becomes part of the key
    Qualifier,
    /// Scope annotation, recorded on the binding
    Scope,
    /// Foreign directive the host cannot represent
    Unsupported,
    /// Directive outside the foreign namespace, ignored
    Other,
}

impl DirectiveKind {
    /// Check if the directive marks a translatable provider method
    pub fn is_provider(&self) -> bool {
        matches!(self, DirectiveKind::Provides | DirectiveKind::IntoSet)
    }

    /// Check if the directive must be reported
    pub fn is_unsupported(&self) -> bool {
        matches!(self, DirectiveKind::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_with_default_config() {
        let config = AdapterConfig::default();

        assert_eq!(Directive::new("dagger.Provides").kind(&config), DirectiveKind::Provides);
        assert_eq!(
            Directive::new("dagger.multibindings.IntoSet").kind(&config),
            DirectiveKind::IntoSet
        );
        assert_eq!(Directive::new("dagger.Binds").kind(&config), DirectiveKind::Unsupported);
        assert_eq!(
            Directive::new("dagger.multibindings.IntoMap").kind(&config),
            DirectiveKind::Unsupported
        );
        assert_eq!(
            Directive::new("javax.inject.Named").with_value("x").kind(&config),
            DirectiveKind::Qualifier
        );
        assert_eq!(Directive::new("javax.inject.Singleton").kind(&config), DirectiveKind::Scope);
        assert_eq!(Directive::new("java.lang.Deprecated").kind(&config), DirectiveKind::Other);
    }

    #[test]
    fn test_namespace_is_a_prefix_match() {
        let config = AdapterConfig::default();
        // `daggerx.` is not inside `dagger.`
        assert_eq!(Directive::new("daggerx.Binds").kind(&config), DirectiveKind::Other);
    }

    #[test]
    fn test_display() {
        assert_eq!(Directive::new("dagger.Binds").to_string(), "@dagger.Binds");
        assert_eq!(
            Directive::new("javax.inject.Named").with_value("primary").to_string(),
            "@javax.inject.Named(\"primary\")"
        );
        assert_eq!(Directive::new("dagger.multibindings.IntoSet").simple_name(), "IntoSet");
    }
}
