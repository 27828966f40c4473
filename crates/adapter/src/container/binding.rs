use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::{
    BindingKey, Dependencies, Key, MethodBody, MethodDescriptor, Provided, TypeKey,
};
use crate::errors::ProvisionError;

/// Module instance a non-static provider is bound to
pub type ModuleInstance = Arc<dyn Any + Send + Sync>;

/// Where a binding came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub module: TypeKey,
    /// Method rendered as `Type.method(params)`
    pub method: String,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.method)
    }
}

/// Procedure the host invokes to produce a binding's value: the provider
/// method, bound to its module instance when it has one
#[derive(Clone)]
pub struct Producer {
    method: String,
    body: MethodBody,
    receiver: Option<ModuleInstance>,
    dependencies: Vec<Key>,
}

impl Producer {
    /// Bind a method to an optional module instance
    pub fn for_method(method: &MethodDescriptor, receiver: Option<ModuleInstance>) -> Self {
        let receiver = match method.body {
            MethodBody::Instance(_) => receiver,
            _ => None,
        };

        Self {
            method: method.to_string(),
            body: method.body.clone(),
            receiver,
            dependencies: method.parameters.clone(),
        }
    }

    /// Check if invoking this producer needs a module instance
    pub fn requires_instance(&self) -> bool {
        matches!(self.body, MethodBody::Instance(_))
    }

    /// Check if a module instance is bound
    pub fn has_instance(&self) -> bool {
        self.receiver.is_some()
    }

    /// Invoke the provider with resolved dependency values, in parameter order.
    ///
    /// An instance method whose module was supplied as a type fails here with
    /// [`ProvisionError::MissingInstance`], not during configuration.
    pub fn provide(&self, values: &[Provided]) -> Result<Provided, ProvisionError> {
        if values.len() < self.dependencies.len() {
            return Err(ProvisionError::MissingDependency {
                method: self.method.clone(),
                index: values.len(),
                key: self.dependencies[values.len()].to_string(),
            });
        }

        let deps = Dependencies::new(&self.method, &self.dependencies, values);
        match &self.body {
            MethodBody::Abstract => Err(ProvisionError::NoImplementation {
                method: self.method.clone(),
            }),
            MethodBody::Static(body) => body(&deps),
            MethodBody::Instance(body) => match &self.receiver {
                Some(receiver) => body(receiver.as_ref(), &deps),
                None => Err(ProvisionError::missing_instance(&self.method)),
            },
        }
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("method", &self.method)
            .field("body", &self.body)
            .field("has_instance", &self.receiver.is_some())
            .finish()
    }
}

/// One translated provider method
#[derive(Debug, Clone)]
pub struct BindingSpec {
    pub key: BindingKey,
    /// Keys of the method's parameters, in order
    pub dependencies: Vec<Key>,
    /// Scope directive found on the method, enforced by the host
    pub scope: Option<String>,
    pub producer: Producer,
    pub provenance: Provenance,
}

impl BindingSpec {
    /// Invoke the producer, see [`Producer::provide`]
    pub fn provide(&self, values: &[Provided]) -> Result<Provided, ProvisionError> {
        self.producer.provide(values)
    }

    /// Check if this spec contributes to a set
    pub fn is_set_contribution(&self) -> bool {
        self.key.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        start: u32,
    }

    fn next_method() -> MethodDescriptor {
        let mut method = MethodDescriptor::instance_provider("next", |c: &Counter, deps| {
            let step = deps.get::<u32>(0)?;
            Ok(c.start + step)
        })
        .with_parameter(Key::of::<u32>());
        method.declaring_type = TypeKey::new("app.CounterModule");
        method
    }

    #[test]
    fn test_instance_producer_uses_bound_receiver() {
        let module: ModuleInstance = Arc::new(Counter { start: 40 });
        let producer = Producer::for_method(&next_method(), Some(module));

        assert!(producer.requires_instance());
        let values: Vec<Provided> = vec![Arc::new(2u32)];
        let value = producer.provide(&values).unwrap();
        assert_eq!(*value.downcast_ref::<u32>().unwrap(), 42);
    }

    #[test]
    fn test_missing_instance_is_deferred_to_invocation() {
        let producer = Producer::for_method(&next_method(), None);

        assert!(!producer.has_instance());
        let values: Vec<Provided> = vec![Arc::new(2u32)];
        let err = producer.provide(&values).unwrap_err();
        assert!(err.is_missing_instance());
        assert!(err.to_string().starts_with("app.CounterModule.next(u32)"));
    }

    #[test]
    fn test_static_producer_ignores_receiver() {
        let method = MethodDescriptor::static_provider("answer", |_| Ok(42u64));
        let module: ModuleInstance = Arc::new(Counter { start: 0 });
        let producer = Producer::for_method(&method, Some(module));

        assert!(!producer.has_instance());
        let value = producer.provide(&[]).unwrap();
        assert_eq!(*value.downcast_ref::<u64>().unwrap(), 42);
    }

    #[test]
    fn test_too_few_values_is_reported() {
        let module: ModuleInstance = Arc::new(Counter { start: 0 });
        let producer = Producer::for_method(&next_method(), Some(module));

        let err = producer.provide(&[]).unwrap_err();
        assert!(matches!(err, ProvisionError::MissingDependency { index: 0, .. }));
    }
}
