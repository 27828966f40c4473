use crate::config::AdapterConfig;
use crate::descriptor::{MethodDescriptor, TypeDescriptor};
use crate::errors::{ConfigurationError, ErrorSource};
use crate::modules::candidate::{ModuleAnnotationInfo, ModuleCandidate};

/// Outcome of validating one candidate
#[derive(Debug, Clone)]
pub struct Validation {
    pub info: ModuleAnnotationInfo,
    /// Errors in check order: marker, sub-modules, then methods
    pub errors: Vec<ConfigurationError>,
}

impl Validation {
    /// Check if the candidate is an acceptable module shape: marked, and
    /// without sub-modules. Directive errors do not count here.
    pub fn is_structurally_valid(&self) -> bool {
        self.info.is_module && self.info.sub_modules.is_empty()
    }
}

/// Checks that a candidate is a module the host can represent
#[derive(Debug, Clone, Copy)]
pub struct ModuleValidator<'a> {
    config: &'a AdapterConfig,
}

impl<'a> ModuleValidator<'a> {
    pub fn new(config: &'a AdapterConfig) -> Self {
        Self { config }
    }

    /// Run every check on one candidate. Never fails: malformed modules are
    /// reported through the returned errors.
    ///
    /// A candidate without the module marker gets exactly one error; its
    /// sub-modules and methods are not inspected.
    pub fn validate(&self, candidate: &ModuleCandidate) -> Validation {
        let descriptor = candidate.descriptor();
        let info = candidate.annotation_info(self.config);
        let mut errors = Vec::new();

        if !info.is_module {
            errors.push(self.not_a_module(descriptor));
            return Validation { info, errors };
        }

        if let Some(error) = self.check_no_sub_modules(descriptor, &info) {
            errors.push(error);
        }

        for method in descriptor.all_declared_methods() {
            errors.extend(self.check_supported_directives(method));
        }

        Validation { info, errors }
    }

    fn not_a_module(&self, descriptor: &TypeDescriptor) -> ConfigurationError {
        ConfigurationError::new(
            format!(
                "{} must be annotated with @{}",
                descriptor.name, self.config.module_directive
            ),
            ErrorSource::Module(descriptor.name.clone()),
        )
    }

    fn check_no_sub_modules(
        &self,
        descriptor: &TypeDescriptor,
        info: &ModuleAnnotationInfo,
    ) -> Option<ConfigurationError> {
        if info.sub_modules.is_empty() {
            return None;
        }

        let listed: Vec<_> = info.sub_modules.iter().map(|t| t.to_string()).collect();
        Some(ConfigurationError::new(
            format!(
                "Sub-modules cannot be configured for modules used with the module adapter. {} specifies: [{}]",
                descriptor.name,
                listed.join(", ")
            ),
            ErrorSource::Module(descriptor.name.clone()),
        ))
    }

    fn check_supported_directives(&self, method: &MethodDescriptor) -> Vec<ConfigurationError> {
        method
            .directives
            .iter()
            .filter(|directive| directive.kind(self.config).is_unsupported())
            .map(|directive| {
                ConfigurationError::new(
                    format!(
                        "{} is annotated with @{} which is not supported by the module adapter",
                        method, directive.name
                    ),
                    ErrorSource::Method(method.to_string()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Directive, TypeKey};

    fn validate(descriptor: TypeDescriptor) -> Validation {
        let config = AdapterConfig::default();
        ModuleValidator::new(&config).validate(&ModuleCandidate::from_descriptor(descriptor))
    }

    #[test]
    fn test_unmarked_type_gets_exactly_one_error() {
        let validation = validate(
            TypeDescriptor::builder("app.Plain")
                .with_method(MethodDescriptor::new("m", "app.X").annotated("dagger.Binds"))
                .build(),
        );

        assert!(!validation.is_structurally_valid());
        assert_eq!(validation.errors.len(), 1);
        assert_eq!(
            validation.errors[0].message,
            "app.Plain must be annotated with @dagger.Module"
        );
        assert_eq!(
            validation.errors[0].source,
            ErrorSource::Module(TypeKey::new("app.Plain"))
        );
    }

    #[test]
    fn test_sub_modules_are_listed_verbatim() {
        let validation = validate(
            TypeDescriptor::builder("app.U")
                .with_directive(
                    Directive::new("dagger.Module")
                        .with_type("app.V")
                        .with_type("app.Other"),
                )
                .build(),
        );

        assert!(!validation.is_structurally_valid());
        assert_eq!(validation.errors.len(), 1);
        assert!(validation.errors[0].message.ends_with("app.U specifies: [app.V, app.Other]"));
    }

    #[test]
    fn test_each_unsupported_directive_is_reported() {
        let validation = validate(
            TypeDescriptor::builder("app.W")
                .annotated("dagger.Module")
                .with_method(
                    MethodDescriptor::new("m", "app.X")
                        .annotated("dagger.Binds")
                        .annotated("dagger.multibindings.IntoMap")
                        .annotated("java.lang.Deprecated"),
                )
                .with_method(MethodDescriptor::new("ok", "app.Y").annotated("dagger.Provides"))
                .build(),
        );

        assert!(validation.is_structurally_valid());
        let messages: Vec<_> = validation.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "app.W.m() is annotated with @dagger.Binds which is not supported by the module adapter",
                "app.W.m() is annotated with @dagger.multibindings.IntoMap which is not supported by the module adapter",
            ]
        );
    }

    #[test]
    fn test_inherited_methods_are_checked() {
        let base = TypeDescriptor::builder("app.Base")
            .with_method(MethodDescriptor::new("reusable", "app.X").annotated("dagger.Reusable"))
            .build();
        let validation = validate(
            TypeDescriptor::builder("app.Child")
                .annotated("dagger.Module")
                .extends(base)
                .build(),
        );

        assert_eq!(validation.errors.len(), 1);
        assert_eq!(
            validation.errors[0].source,
            ErrorSource::Method("app.Base.reusable()".to_string())
        );
    }

    #[test]
    fn test_sub_module_error_precedes_method_errors() {
        let validation = validate(
            TypeDescriptor::builder("app.U")
                .with_directive(Directive::new("dagger.Module").with_type("app.V"))
                .with_method(MethodDescriptor::new("m", "app.X").annotated("dagger.Binds"))
                .build(),
        );

        assert_eq!(validation.errors.len(), 2);
        assert!(validation.errors[0].message.starts_with("Sub-modules cannot be configured"));
        assert!(validation.errors[1].message.contains("@dagger.Binds"));
    }
}
