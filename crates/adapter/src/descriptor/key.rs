use std::fmt;

use serde::Serialize;

/// Canonical name of a type as seen by the host container
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeKey(String);

impl TypeKey {
    /// Create a type key from a canonical name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create a type key for a Rust type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// Get the canonical name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Binding key: a type plus an optional qualifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Key {
    pub type_key: TypeKey,
    pub qualifier: Option<String>,
}

impl Key {
    /// Unqualified key for a type
    pub fn new(type_key: impl Into<TypeKey>) -> Self {
        Self {
            type_key: type_key.into(),
            qualifier: None,
        }
    }

    /// Unqualified key for a Rust type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeKey::of::<T>())
    }

    /// Key for a Rust type qualified by name
    pub fn named<T: ?Sized + 'static>(qualifier: impl Into<String>) -> Self {
        Self::of::<T>().with_qualifier(qualifier)
    }

    /// Attach a qualifier
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }
}

impl From<TypeKey> for Key {
    fn from(type_key: TypeKey) -> Self {
        Self::new(type_key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "@{} {}", qualifier, self.type_key),
            None => write!(f, "{}", self.type_key),
        }
    }
}

/// Key under which a translated provider is installed
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BindingKey {
    /// Plain binding of the element key
    Single(Key),
    /// One contribution to the set of the element key
    SetOf(Key),
}

impl BindingKey {
    /// The provided element key, for both kinds
    pub fn element(&self) -> &Key {
        match self {
            BindingKey::Single(key) | BindingKey::SetOf(key) => key,
        }
    }

    /// Check if this is a set contribution
    pub fn is_set(&self) -> bool {
        matches!(self, BindingKey::SetOf(_))
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKey::Single(key) => write!(f, "{}", key),
            BindingKey::SetOf(key) => match &key.qualifier {
                Some(qualifier) => write!(f, "@{} Set<{}>", qualifier, key.type_key),
                None => write!(f, "Set<{}>", key.type_key),
            },
        }
    }
}
