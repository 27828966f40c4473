//! Type descriptors: the introspection data the adapter validates and
//! translates. A descriptor is built once per type and never mutated.

pub mod directive;
pub mod key;
pub mod method;
pub mod type_descriptor;

pub use directive::{Directive, DirectiveKind};
pub use key::{BindingKey, Key, TypeKey};
pub use method::{Dependencies, InstanceBody, MethodBody, MethodDescriptor, Provided, StaticBody};
pub use type_descriptor::{DescribeModule, Hierarchy, TypeDescriptor, TypeDescriptorBuilder};
