use crate::container::binding::BindingSpec;
use crate::errors::ErrorSource;

/// Narrow contract through which the adapter configures a host container
pub trait ConfigurationSink {
    /// Record a configuration error against its offending element
    fn add_error(&mut self, message: String, source: ErrorSource);

    /// Install a plain binding keyed by the provider's return type
    fn install_binding(&mut self, binding: BindingSpec);

    /// Install one contribution to the set keyed by the element type.
    /// Merging contributions into one set is the host's job.
    fn install_set_contribution(&mut self, contribution: BindingSpec);
}

impl<S: ConfigurationSink + ?Sized> ConfigurationSink for &mut S {
    fn add_error(&mut self, message: String, source: ErrorSource) {
        (**self).add_error(message, source)
    }

    fn install_binding(&mut self, binding: BindingSpec) {
        (**self).install_binding(binding)
    }

    fn install_set_contribution(&mut self, contribution: BindingSpec) {
        (**self).install_set_contribution(contribution)
    }
}
