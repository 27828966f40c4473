use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::directive::Directive;
use crate::descriptor::key::{Key, TypeKey};
use crate::errors::ProvisionError;

/// A value produced by a provider method
pub type Provided = Arc<dyn Any + Send + Sync>;

/// Body of a method that needs no module instance
pub type StaticBody =
    Arc<dyn Fn(&Dependencies<'_>) -> Result<Provided, ProvisionError> + Send + Sync>;

/// Body of a method invoked on a module instance
pub type InstanceBody = Arc<
    dyn Fn(&(dyn Any + Send + Sync), &Dependencies<'_>) -> Result<Provided, ProvisionError>
        + Send
        + Sync,
>;

/// How a method is invoked
#[derive(Clone)]
pub enum MethodBody {
    /// Declared without an implementation
    Abstract,
    /// Associated function, no receiver needed
    Static(StaticBody),
    /// Needs the module instance as receiver
    Instance(InstanceBody),
}

impl fmt::Debug for MethodBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodBody::Abstract => write!(f, "Abstract"),
            MethodBody::Static(_) => write!(f, "Static(<fn>)"),
            MethodBody::Instance(_) => write!(f, "Instance(<fn>)"),
        }
    }
}

/// Resolved dependency values handed to a provider body
pub struct Dependencies<'a> {
    method: &'a str,
    keys: &'a [Key],
    values: &'a [Provided],
}

impl<'a> Dependencies<'a> {
    pub fn new(method: &'a str, keys: &'a [Key], values: &'a [Provided]) -> Self {
        Self {
            method,
            keys,
            values,
        }
    }

    /// Number of supplied values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed access to the dependency at `index`
    pub fn get<T: Any>(&self, index: usize) -> Result<&'a T, ProvisionError> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| ProvisionError::MissingDependency {
                method: self.method.to_string(),
                index,
                key: self
                    .keys
                    .get(index)
                    .map(|k| k.to_string())
                    .unwrap_or_else(|| "<undeclared>".to_string()),
            })?;

        value
            .downcast_ref::<T>()
            .ok_or_else(|| ProvisionError::DependencyTypeMismatch {
                method: self.method.to_string(),
                index,
                expected: std::any::type_name::<T>().to_string(),
            })
    }

    /// Shared handle to the dependency at `index`
    pub fn get_arc<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, ProvisionError> {
        self.get::<T>(index)?;
        self.values[index]
            .clone()
            .downcast::<T>()
            .map_err(|_| ProvisionError::DependencyTypeMismatch {
                method: self.method.to_string(),
                index,
                expected: std::any::type_name::<T>().to_string(),
            })
    }
}

/// One method declared on a module type
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub name: String,
    /// Type that declares this method, filled in by the type builder
    pub declaring_type: TypeKey,
    pub return_type: TypeKey,
    pub parameters: Vec<Key>,
    pub directives: Vec<Directive>,
    pub body: MethodBody,
}

impl MethodDescriptor {
    /// Create an abstract method descriptor
    pub fn new(name: impl Into<String>, return_type: impl Into<TypeKey>) -> Self {
        Self {
            name: name.into(),
            declaring_type: TypeKey::new(""),
            return_type: return_type.into(),
            parameters: Vec::new(),
            directives: Vec::new(),
            body: MethodBody::Abstract,
        }
    }

    /// Method with no receiver returning `R`
    pub fn static_provider<R, F>(name: impl Into<String>, body: F) -> Self
    where
        R: Send + Sync + 'static,
        F: Fn(&Dependencies<'_>) -> Result<R, ProvisionError> + Send + Sync + 'static,
    {
        Self::new(name, TypeKey::of::<R>()).with_static_body(move |deps| {
            let value = body(deps)?;
            Ok(Arc::new(value) as Provided)
        })
    }

    /// Method on module type `M` returning `R`
    pub fn instance_provider<M, R, F>(name: impl Into<String>, body: F) -> Self
    where
        M: Any + Send + Sync,
        R: Send + Sync + 'static,
        F: Fn(&M, &Dependencies<'_>) -> Result<R, ProvisionError> + Send + Sync + 'static,
    {
        let name = name.into();
        let method_name = name.clone();
        Self::new(name, TypeKey::of::<R>()).with_instance_body(move |receiver, deps| {
            let module = receiver.downcast_ref::<M>().ok_or_else(|| {
                ProvisionError::InstanceMismatch {
                    method: method_name.clone(),
                    expected: std::any::type_name::<M>().to_string(),
                }
            })?;
            let value = body(module, deps)?;
            Ok(Arc::new(value) as Provided)
        })
    }

    /// Set a body that needs no receiver
    pub fn with_static_body<F>(mut self, body: F) -> Self
    where
        F: Fn(&Dependencies<'_>) -> Result<Provided, ProvisionError> + Send + Sync + 'static,
    {
        self.body = MethodBody::Static(Arc::new(body));
        self
    }

    /// Set a body invoked on the module instance
    pub fn with_instance_body<F>(mut self, body: F) -> Self
    where
        F: Fn(&(dyn Any + Send + Sync), &Dependencies<'_>) -> Result<Provided, ProvisionError>
            + Send
            + Sync
            + 'static,
    {
        self.body = MethodBody::Instance(Arc::new(body));
        self
    }

    /// Add a parameter
    pub fn with_parameter(mut self, key: impl Into<Key>) -> Self {
        self.parameters.push(key.into());
        self
    }

    /// Attach a directive
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Attach a value-less directive by name
    pub fn annotated(self, name: impl Into<String>) -> Self {
        self.with_directive(Directive::new(name))
    }

    pub fn is_static(&self) -> bool {
        matches!(self.body, MethodBody::Static(_))
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.body, MethodBody::Abstract)
    }

    /// Name plus parameter keys, what an override must match
    pub fn signature(&self) -> (&str, &[Key]) {
        (&self.name, &self.parameters)
    }

    /// Check if `other` has the same signature
    pub fn overrides(&self, other: &MethodDescriptor) -> bool {
        self.signature() == other.signature()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.declaring_type, self.name)?;
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        write!(f, ")")
    }
}
