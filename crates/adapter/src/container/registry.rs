use std::collections::{BTreeMap, HashMap};

use crate::container::binding::BindingSpec;
use crate::container::sink::ConfigurationSink;
use crate::descriptor::{BindingKey, Key};
use crate::errors::{ConfigurationError, ConfigurationErrors, ErrorSource};

/// In-memory host configuration: records everything the adapter hands over,
/// in order, and checks it when built
#[derive(Debug, Default)]
pub struct BindingRegistry {
    errors: Vec<ConfigurationError>,
    bindings: Vec<BindingSpec>,
    contributions: Vec<BindingSpec>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors recorded so far
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }

    /// Plain bindings in installation order
    pub fn bindings(&self) -> &[BindingSpec] {
        &self.bindings
    }

    /// Set contributions in installation order
    pub fn set_contributions(&self) -> &[BindingSpec] {
        &self.contributions
    }

    /// Every installed key, plain bindings first, each in installation order
    pub fn installed_keys(&self) -> Vec<BindingKey> {
        self.bindings
            .iter()
            .chain(self.contributions.iter())
            .map(|spec| spec.key.clone())
            .collect()
    }

    /// Plain binding for a key, if any
    pub fn binding(&self, key: &Key) -> Option<&BindingSpec> {
        self.bindings.iter().find(|spec| spec.key.element() == key)
    }

    /// Contributions to the set of `element`, merged across modules
    pub fn contributions_to(&self, element: &Key) -> Vec<&BindingSpec> {
        self.contributions
            .iter()
            .filter(|spec| spec.key.element() == element)
            .collect()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.bindings.is_empty() && self.contributions.is_empty()
    }

    /// Finish configuration. Fails with every recorded error, plus one error
    /// per plain key bound more than once.
    pub fn build(self) -> Result<Configuration, ConfigurationErrors> {
        let mut errors = self.errors;
        let mut bindings: HashMap<Key, BindingSpec> = HashMap::new();

        for spec in self.bindings {
            let key = spec.key.element().clone();
            if let Some(existing) = bindings.get(&key) {
                errors.push(ConfigurationError::new(
                    format!(
                        "A binding to {} was already configured at {}",
                        key, existing.provenance
                    ),
                    ErrorSource::Method(spec.provenance.method.clone()),
                ));
                continue;
            }
            bindings.insert(key, spec);
        }

        if !errors.is_empty() {
            tracing::error!("Configuration failed with {} error(s)", errors.len());
            return Err(ConfigurationErrors::new(errors));
        }

        let mut sets: BTreeMap<Key, Vec<BindingSpec>> = BTreeMap::new();
        for spec in self.contributions {
            sets.entry(spec.key.element().clone()).or_default().push(spec);
        }

        Ok(Configuration { bindings, sets })
    }
}

impl ConfigurationSink for BindingRegistry {
    fn add_error(&mut self, message: String, source: ErrorSource) {
        self.errors.push(ConfigurationError::new(message, source));
    }

    fn install_binding(&mut self, binding: BindingSpec) {
        tracing::debug!("Installing binding {} from {}", binding.key, binding.provenance);
        self.bindings.push(binding);
    }

    fn install_set_contribution(&mut self, contribution: BindingSpec) {
        tracing::debug!(
            "Installing contribution to {} from {}",
            contribution.key,
            contribution.provenance
        );
        self.contributions.push(contribution);
    }
}

/// Validated host configuration
#[derive(Debug)]
pub struct Configuration {
    bindings: HashMap<Key, BindingSpec>,
    sets: BTreeMap<Key, Vec<BindingSpec>>,
}

impl Configuration {
    /// Plain binding for a key
    pub fn binding(&self, key: &Key) -> Option<&BindingSpec> {
        self.bindings.get(key)
    }

    /// Every contribution to the set of `element`, in installation order
    pub fn set(&self, element: &Key) -> &[BindingSpec] {
        self.sets.get(element).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Element keys that have at least one set contribution
    pub fn set_keys(&self) -> impl Iterator<Item = &Key> {
        self.sets.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::binding::{Producer, Provenance};
    use crate::descriptor::{MethodDescriptor, TypeKey};

    fn spec(key: BindingKey, module: &str, method: &str) -> BindingSpec {
        let mut descriptor = MethodDescriptor::static_provider(method, |_| Ok(1u8));
        descriptor.declaring_type = TypeKey::new(module);
        BindingSpec {
            key,
            dependencies: Vec::new(),
            scope: None,
            producer: Producer::for_method(&descriptor, None),
            provenance: Provenance {
                module: TypeKey::new(module),
                method: descriptor.to_string(),
            },
        }
    }

    #[test]
    fn test_set_contributions_merge_by_element() {
        let mut registry = BindingRegistry::new();
        let plugins = BindingKey::SetOf(Key::new("Plugin"));
        registry.install_set_contribution(spec(plugins.clone(), "app.A", "a"));
        registry.install_set_contribution(spec(plugins, "app.B", "b"));
        registry.install_set_contribution(spec(BindingKey::SetOf(Key::new("Other")), "app.B", "c"));

        assert_eq!(registry.contributions_to(&Key::new("Plugin")).len(), 2);

        let configuration = registry.build().unwrap();
        let plugins = configuration.set(&Key::new("Plugin"));
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0].provenance.method, "app.A.a()");
        assert_eq!(plugins[1].provenance.method, "app.B.b()");
        assert!(configuration.set(&Key::new("Missing")).is_empty());
        assert_eq!(configuration.set_keys().count(), 2);
    }

    #[test]
    fn test_duplicate_plain_binding_fails_build() {
        let mut registry = BindingRegistry::new();
        registry.install_binding(spec(BindingKey::Single(Key::new("X")), "app.A", "x"));
        registry.install_binding(spec(BindingKey::Single(Key::new("X")), "app.B", "x"));

        let errors = registry.build().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.errors()[0].message,
            "A binding to X was already configured at app.A.x()"
        );
        assert_eq!(errors.errors()[0].source, ErrorSource::Method("app.B.x()".to_string()));
    }

    #[test]
    fn test_qualified_keys_do_not_collide() {
        let mut registry = BindingRegistry::new();
        registry.install_binding(spec(BindingKey::Single(Key::new("X")), "app.A", "x"));
        registry.install_binding(spec(
            BindingKey::Single(Key::new("X").with_qualifier("other")),
            "app.A",
            "otherX",
        ));

        let configuration = registry.build().unwrap();
        assert_eq!(configuration.binding_count(), 2);
        assert!(configuration.binding(&Key::new("X").with_qualifier("other")).is_some());
    }

    #[test]
    fn test_recorded_errors_fail_build_in_order() {
        let mut registry = BindingRegistry::new();
        registry.add_error("first".to_string(), ErrorSource::Module(TypeKey::new("app.A")));
        registry.install_binding(spec(BindingKey::Single(Key::new("X")), "app.A", "x"));
        registry.add_error("second".to_string(), ErrorSource::Module(TypeKey::new("app.B")));

        assert!(registry.binding(&Key::new("X")).is_some());
        let errors = registry.build().unwrap_err();
        let messages: Vec<_> = errors.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
