use std::fmt;

use crate::config::{AdapterConfig, AdapterConfigTrait, ConfigError};
use crate::container::{BindingRegistry, BindingSpec, Configuration, ConfigurationSink};
use crate::errors::{AdapterError, ConfigurationError, ErrorSink};
use crate::modules::candidate::ModuleCandidate;
use crate::modules::translator::ProviderMethodTranslator;
use crate::modules::validator::ModuleValidator;

/// Adapts foreign modules so their provider methods configure the host
/// container.
///
/// ```ignore
/// let mut registry = BindingRegistry::new();
/// ModuleAdapter::new([ModuleCandidate::of::<ClockModule>(), SettingsModule::new().into()])
///     .configure(&mut registry);
/// let configuration = registry.build()?;
/// ```
///
/// Modules without instance methods can be passed as bare types. Instance
/// methods on a bare type are still bound, and fail when invoked.
/// Sub-module declarations are reported, never followed.
#[derive(Clone)]
pub struct ModuleAdapter {
    modules: Vec<ModuleCandidate>,
    config: AdapterConfig,
}

/// Everything one pass produced, before it is handed to the host
#[derive(Debug, Default)]
pub(crate) struct PassOutcome {
    pub(crate) errors: Vec<ConfigurationError>,
    pub(crate) bindings: Vec<BindingSpec>,
}

impl ModuleAdapter {
    /// Adapter over an ordered sequence of candidates, default configuration
    pub fn new(modules: impl IntoIterator<Item = ModuleCandidate>) -> Self {
        Self {
            modules: modules.into_iter().collect(),
            config: AdapterConfig::default(),
        }
    }

    /// Use a specific adapter configuration, rejecting one that fails
    /// validation
    pub fn with_config(mut self, config: AdapterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn modules(&self) -> &[ModuleCandidate] {
        &self.modules
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Run the configuration pass and report everything to `sink`: all
    /// errors in pass order, then every binding in pass order.
    pub fn configure<S: ConfigurationSink + ?Sized>(&self, sink: &mut S) {
        let outcome = self.run_pass();

        for error in outcome.errors {
            sink.add_error(error.message, error.source);
        }

        for binding in outcome.bindings {
            if binding.is_set_contribution() {
                sink.install_set_contribution(binding);
            } else {
                sink.install_binding(binding);
            }
        }
    }

    /// Configure a fresh [`BindingRegistry`] and build it
    pub fn build(&self) -> Result<Configuration, AdapterError> {
        let mut registry = BindingRegistry::new();
        self.configure(&mut registry);
        Ok(registry.build()?)
    }

    pub(crate) fn run_pass(&self) -> PassOutcome {
        let pass_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("module_adapter_pass", %pass_id);
        let _entered = span.enter();

        let validator = ModuleValidator::new(&self.config);
        let translator = ProviderMethodTranslator::new(&self.config);
        let mut errors = ErrorSink::new();
        let mut bindings = Vec::new();

        tracing::info!("Adapting {} module(s)", self.modules.len());

        for candidate in &self.modules {
            tracing::debug!("Validating module candidate {}", candidate);
            let validation = validator.validate(candidate);
            let structurally_valid = validation.is_structurally_valid();
            errors.extend(validation.errors);

            if !structurally_valid {
                tracing::debug!("Not translating {}: not an acceptable module", candidate);
                continue;
            }

            let translation = translator.translate(candidate);
            errors.extend(translation.errors);
            tracing::debug!(
                "Translated {} provider method(s) from {}",
                translation.bindings.len(),
                candidate
            );
            bindings.extend(translation.bindings);
        }

        tracing::info!(
            "Module adaptation finished with {} binding(s) and {} error(s)",
            bindings.len(),
            errors.len()
        );

        PassOutcome {
            errors: errors.drain(),
            bindings,
        }
    }
}

impl FromIterator<ModuleCandidate> for ModuleAdapter {
    fn from_iter<I: IntoIterator<Item = ModuleCandidate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ModuleAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modules: Vec<_> = self.modules.iter().map(|m| m.to_string()).collect();
        write!(f, "ModuleAdapter {{ modules: [{}] }}", modules.join(", "))
    }
}

impl fmt::Debug for ModuleAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleAdapter")
            .field("modules", &self.modules)
            .field("config", &self.config)
            .finish()
    }
}
