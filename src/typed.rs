use std::any::Any;
use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::ReadError;

/// Optional capability: deserialize JSON text into a caller-named target
/// type. Not every deployment carries one; a facade built without a
/// `TypedParser` reports [`ReadError::Unsupported`] instead.
pub trait TypedParser: Send + Sync {
    /// Parse `text` into the type registered under `type_name`.
    fn parse_named(&self, type_name: &str, text: &str) -> Result<Box<dyn Any + Send>, ReadError>;

    /// Short label for logging and diagnostics.
    fn name(&self) -> &str;
}

type ParseFn = Box<dyn Fn(&str) -> Result<Box<dyn Any + Send>, serde_json::Error> + Send + Sync>;

/// A [`TypedParser`] backed by an explicit name-to-deserializer registry.
///
/// Rust has no runtime class lookup, so "reflection" here is a table the
/// composition root fills in: each registered name maps to a concrete
/// `DeserializeOwned` type. Unknown names fail with `TypeNotFound`;
/// JSON that does not fit the target's shape fails with `ShapeMismatch`.
#[derive(Default)]
pub struct TypeRegistry {
    entries: HashMap<String, ParseFn>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `type_name`. Re-registering a name replaces the
    /// previous entry.
    pub fn register<T>(&mut self, type_name: impl Into<String>)
    where
        T: DeserializeOwned + Any + Send + 'static,
    {
        self.entries.insert(
            type_name.into(),
            Box::new(|text: &str| {
                serde_json::from_str::<T>(text).map(|v| Box::new(v) as Box<dyn Any + Send>)
            }),
        );
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with<T>(mut self, type_name: impl Into<String>) -> Self
    where
        T: DeserializeOwned + Any + Send + 'static,
    {
        self.register::<T>(type_name);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }
}

impl TypedParser for TypeRegistry {
    fn parse_named(&self, type_name: &str, text: &str) -> Result<Box<dyn Any + Send>, ReadError> {
        let parse = self
            .entries
            .get(type_name)
            .ok_or_else(|| ReadError::TypeNotFound(type_name.to_string()))?;
        parse(text).map_err(|source| ReadError::ShapeMismatch {
            type_name: type_name.to_string(),
            source,
        })
    }

    fn name(&self) -> &str {
        "registry"
    }
}
