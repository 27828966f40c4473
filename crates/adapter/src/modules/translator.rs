use crate::config::AdapterConfig;
use crate::container::{BindingSpec, Producer, Provenance};
use crate::descriptor::{BindingKey, Directive, DirectiveKind, Key, MethodDescriptor};
use crate::errors::{ConfigurationError, ErrorSource};
use crate::modules::candidate::ModuleCandidate;

/// Bindings and errors produced for one candidate
#[derive(Debug, Default)]
pub struct Translation {
    /// One spec per accepted provider method, in scan order
    pub bindings: Vec<BindingSpec>,
    pub errors: Vec<ConfigurationError>,
}

/// Turns provider methods into binding specs
#[derive(Debug, Clone, Copy)]
pub struct ProviderMethodTranslator<'a> {
    config: &'a AdapterConfig,
}

/// Provider directives found on one method
struct ProviderShape<'m> {
    directive: &'m Directive,
    into_set: bool,
}

impl<'a> ProviderMethodTranslator<'a> {
    pub fn new(config: &'a AdapterConfig) -> Self {
        Self { config }
    }

    /// Translate every provider and set-contributor method of the candidate's
    /// hierarchy, most-derived first.
    ///
    /// Methods that also carry an unsupported directive are skipped; the
    /// validator reports those. Instance methods on a bare type are still
    /// translated and fail when invoked.
    pub fn translate(&self, candidate: &ModuleCandidate) -> Translation {
        let descriptor = candidate.descriptor();
        let methods = descriptor.all_declared_methods();
        let mut translation = Translation::default();

        for (position, method) in methods.iter().enumerate() {
            let Some(shape) = self.provider_shape(method) else {
                continue;
            };

            if method.directives.iter().any(|d| d.kind(self.config).is_unsupported()) {
                tracing::debug!("Skipping {}: unsupported directive", method);
                continue;
            }

            // Earlier entries are declared further down the hierarchy
            let overriding = methods[..position].iter().find(|other| {
                other.declaring_type != method.declaring_type && other.overrides(method)
            });
            if let Some(overriding) = overriding {
                if !self.config.allow_provider_overrides {
                    translation.errors.push(ConfigurationError::new(
                        format!(
                            "Overriding @{name} methods is not allowed.\n\t\
                             @{name} method: {method}\n\toverridden by: {overriding}",
                            name = shape.directive.simple_name(),
                        ),
                        ErrorSource::Method(overriding.to_string()),
                    ));
                }
                continue;
            }

            if method.is_abstract() {
                translation.errors.push(ConfigurationError::new(
                    format!(
                        "{} is annotated with @{} but has no implementation",
                        method, shape.directive.name
                    ),
                    ErrorSource::Method(method.to_string()),
                ));
                continue;
            }

            let qualifiers = self.directives_of(method, DirectiveKind::Qualifier);
            if qualifiers.len() > 1 {
                translation.errors.push(Self::more_than_one(method, "qualifier", &qualifiers));
                continue;
            }

            let mut element = Key::new(method.return_type.clone());
            if let Some(qualifier) = qualifiers.first() {
                element = element.with_qualifier(Self::qualifier_name(qualifier));
            }

            let key = if shape.into_set {
                BindingKey::SetOf(element)
            } else {
                BindingKey::Single(element)
            };

            let scopes = self.directives_of(method, DirectiveKind::Scope);
            if scopes.len() > 1 {
                translation.errors.push(Self::more_than_one(method, "scope", &scopes));
                continue;
            }
            let scope = scopes.first().map(|d| d.name.clone());

            translation.bindings.push(BindingSpec {
                key,
                dependencies: method.parameters.clone(),
                scope,
                producer: Producer::for_method(method, candidate.instance_handle().cloned()),
                provenance: Provenance {
                    module: descriptor.name.clone(),
                    method: method.to_string(),
                },
            });
        }

        translation
    }

    fn provider_shape<'m>(&self, method: &'m MethodDescriptor) -> Option<ProviderShape<'m>> {
        let mut provides = None;
        let mut into_set = None;

        for directive in &method.directives {
            match directive.kind(self.config) {
                DirectiveKind::Provides => provides = provides.or(Some(directive)),
                DirectiveKind::IntoSet => into_set = into_set.or(Some(directive)),
                _ => {}
            }
        }

        provides.or(into_set).map(|directive| ProviderShape {
            directive,
            into_set: into_set.is_some(),
        })
    }

    fn directives_of<'m>(
        &self,
        method: &'m MethodDescriptor,
        kind: DirectiveKind,
    ) -> Vec<&'m Directive> {
        method
            .directives
            .iter()
            .filter(|d| d.kind(self.config) == kind)
            .collect()
    }

    fn more_than_one(
        method: &MethodDescriptor,
        what: &str,
        directives: &[&Directive],
    ) -> ConfigurationError {
        let listed: Vec<_> = directives.iter().map(|d| d.to_string()).collect();
        ConfigurationError::new(
            format!("{} has more than one {}: {}", method, what, listed.join(", ")),
            ErrorSource::Method(method.to_string()),
        )
    }

    fn qualifier_name(directive: &Directive) -> String {
        directive
            .value
            .clone()
            .unwrap_or_else(|| directive.name.clone())
    }
}
