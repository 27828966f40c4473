use std::fmt;
use std::sync::Arc;

use crate::config::AdapterConfig;
use crate::container::ModuleInstance;
use crate::descriptor::{DescribeModule, TypeDescriptor, TypeKey};

/// One unit of foreign configuration: a bare type, or a type with an
/// instance its non-static providers can be bound to
#[derive(Clone)]
pub enum ModuleCandidate {
    TypeOnly(Arc<TypeDescriptor>),
    Instance {
        descriptor: Arc<TypeDescriptor>,
        instance: ModuleInstance,
    },
}

impl ModuleCandidate {
    /// Candidate for a module type without an instance
    pub fn of<M: DescribeModule>() -> Self {
        Self::TypeOnly(Arc::new(M::describe()))
    }

    /// Candidate for a module instance
    pub fn instance<M: DescribeModule>(module: M) -> Self {
        Self::Instance {
            descriptor: Arc::new(M::describe()),
            instance: Arc::new(module),
        }
    }

    /// Candidate for a descriptor built at runtime
    pub fn from_descriptor(descriptor: impl Into<Arc<TypeDescriptor>>) -> Self {
        Self::TypeOnly(descriptor.into())
    }

    /// Candidate for a runtime descriptor with an instance
    pub fn with_instance(
        descriptor: impl Into<Arc<TypeDescriptor>>,
        instance: ModuleInstance,
    ) -> Self {
        Self::Instance {
            descriptor: descriptor.into(),
            instance,
        }
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        match self {
            Self::TypeOnly(descriptor) | Self::Instance { descriptor, .. } => descriptor,
        }
    }

    pub fn type_key(&self) -> &TypeKey {
        &self.descriptor().name
    }

    /// Instance handle, absent for bare types
    pub fn instance_handle(&self) -> Option<&ModuleInstance> {
        match self {
            Self::TypeOnly(_) => None,
            Self::Instance { instance, .. } => Some(instance),
        }
    }

    /// Read the module marker of this candidate's type
    pub fn annotation_info(&self, config: &AdapterConfig) -> ModuleAnnotationInfo {
        ModuleAnnotationInfo::derive(self.descriptor(), config)
    }
}

impl fmt::Debug for ModuleCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeOnly(descriptor) => {
                f.debug_tuple("TypeOnly").field(&descriptor.name).finish()
            }
            Self::Instance { descriptor, .. } => f
                .debug_struct("Instance")
                .field("type", &descriptor.name)
                .field("instance", &"<instance>")
                .finish(),
        }
    }
}

impl fmt::Display for ModuleCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeOnly(descriptor) => write!(f, "{}", descriptor.name),
            Self::Instance { descriptor, .. } => write!(f, "{} instance", descriptor.name),
        }
    }
}

impl<M: DescribeModule> From<M> for ModuleCandidate {
    fn from(module: M) -> Self {
        Self::instance(module)
    }
}

/// Module marker metadata of one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAnnotationInfo {
    pub is_module: bool,
    /// Sub-module types listed by the marker, in declaration order
    pub sub_modules: Vec<TypeKey>,
}

impl ModuleAnnotationInfo {
    pub fn derive(descriptor: &TypeDescriptor, config: &AdapterConfig) -> Self {
        match descriptor.directive(&config.module_directive) {
            Some(marker) => Self {
                is_module: true,
                sub_modules: marker.types.clone(),
            },
            None => Self {
                is_module: false,
                sub_modules: Vec::new(),
            },
        }
    }
}
