use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

use crate::descriptor::directive::Directive;
use crate::descriptor::key::{Key, TypeKey};
use crate::descriptor::method::MethodDescriptor;

/// Immutable description of a module type: its directives, declared
/// methods and parent type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub name: TypeKey,
    pub directives: Vec<Directive>,
    /// Methods declared on this type only, in declaration order
    pub methods: Vec<MethodDescriptor>,
    pub parent: Option<Arc<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Start describing a type
    pub fn builder(name: impl Into<TypeKey>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name.into())
    }

    /// Start describing a Rust type
    pub fn builder_for<T: ?Sized + 'static>() -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(TypeKey::of::<T>())
    }

    /// Directive declared directly on this type
    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }

    /// This type followed by its ancestors, most-derived first
    pub fn hierarchy(&self) -> Hierarchy<'_> {
        Hierarchy {
            next: Some(self),
        }
    }

    /// Every method declared anywhere in the hierarchy, most-derived first.
    ///
    /// Each declaration is visited once: a method repeated under the same
    /// declaring type and signature is skipped, while an override declared
    /// at a different level is kept.
    pub fn all_declared_methods(&self) -> Vec<&MethodDescriptor> {
        let mut seen: HashSet<(&TypeKey, &str, &[Key])> = HashSet::new();
        let mut methods = Vec::new();

        for level in self.hierarchy() {
            for method in &level.methods {
                let (name, parameters) = method.signature();
                if seen.insert((&method.declaring_type, name, parameters)) {
                    methods.push(method);
                }
            }
        }

        methods
    }
}

/// Iterator over a type and its ancestors
pub struct Hierarchy<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for Hierarchy<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

/// Builder for type descriptors
pub struct TypeDescriptorBuilder {
    name: TypeKey,
    directives: Vec<Directive>,
    methods: Vec<MethodDescriptor>,
    parent: Option<Arc<TypeDescriptor>>,
}

impl TypeDescriptorBuilder {
    pub fn new(name: TypeKey) -> Self {
        Self {
            name,
            directives: Vec::new(),
            methods: Vec::new(),
            parent: None,
        }
    }

    /// Attach a directive to the type
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Attach a value-less directive by name
    pub fn annotated(self, name: impl Into<String>) -> Self {
        self.with_directive(Directive::new(name))
    }

    /// Declare a method on this type
    pub fn with_method(mut self, mut method: MethodDescriptor) -> Self {
        method.declaring_type = self.name.clone();
        self.methods.push(method);
        self
    }

    /// Set the parent type
    pub fn extends(mut self, parent: impl Into<Arc<TypeDescriptor>>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name: self.name,
            directives: self.directives,
            methods: self.methods,
            parent: self.parent,
        }
    }
}

/// Types that can describe themselves as foreign modules
pub trait DescribeModule: Any + Send + Sync {
    /// Describe the type's directives and methods
    fn describe() -> TypeDescriptor
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> TypeDescriptor {
        TypeDescriptor::builder("app.Base")
            .with_method(MethodDescriptor::new("shared", "app.S"))
            .with_method(MethodDescriptor::new("baseOnly", "app.B"))
            .build()
    }

    #[test]
    fn test_builder_sets_declaring_type() {
        let descriptor = base();
        assert!(descriptor
            .methods
            .iter()
            .all(|m| m.declaring_type == TypeKey::new("app.Base")));
    }

    #[test]
    fn test_hierarchy_is_most_derived_first() {
        let child = TypeDescriptor::builder("app.Child").extends(base()).build();
        let names: Vec<_> = child.hierarchy().map(|t| t.name.name().to_string()).collect();
        assert_eq!(names, vec!["app.Child", "app.Base"]);
    }

    #[test]
    fn test_all_declared_methods_visits_every_level_once() {
        let child = TypeDescriptor::builder("app.Child")
            .with_method(MethodDescriptor::new("shared", "app.S"))
            .with_method(MethodDescriptor::new("childOnly", "app.C"))
            .with_method(MethodDescriptor::new("childOnly", "app.C"))
            .extends(base())
            .build();

        let methods: Vec<_> = child
            .all_declared_methods()
            .iter()
            .map(|m| m.to_string())
            .collect();

        assert_eq!(
            methods,
            vec![
                "app.Child.shared()",
                "app.Child.childOnly()",
                "app.Base.shared()",
                "app.Base.baseOnly()",
            ]
        );
    }

    #[test]
    fn test_directive_lookup_is_not_inherited() {
        let parent = TypeDescriptor::builder("app.Parent")
            .annotated("dagger.Module")
            .build();
        let child = TypeDescriptor::builder("app.Child").extends(parent).build();

        assert!(child.directive("dagger.Module").is_none());
        assert!(child.parent.as_ref().unwrap().directive("dagger.Module").is_some());
    }
}
