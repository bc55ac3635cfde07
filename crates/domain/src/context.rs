//! Data context for placeholder substitution
//!
//! Holds the nested key-value data a template is rendered against and
//! resolves dotted paths (`user.address.city`) into it.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value::{Map, Value};

/// A read-only nested mapping used as the source of substitution values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataContext {
    root: Map,
}

impl DataContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level entry, returning the context for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a top-level entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.root.insert(key.into(), value.into());
    }

    /// Returns the top-level mapping.
    #[must_use]
    pub const fn root(&self) -> &Map {
        &self.root
    }

    /// Returns true if the context has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Resolves a dot-separated path to its value.
    ///
    /// Returns `None` when any segment is missing, when an intermediate value
    /// cannot be descended into, or when the final value is `Null`. Empty
    /// strings, zero and `false` are present values.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;

        for segment in segments {
            current = current.child(segment)?;
        }

        if current.is_null() { None } else { Some(current) }
    }

    /// Returns true if the path resolves to a present value.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }
}

impl From<Map> for DataContext {
    fn from(root: Map) -> Self {
        Self { root }
    }
}

impl TryFrom<Value> for DataContext {
    type Error = DomainError;

    fn try_from(value: Value) -> DomainResult<Self> {
        match value {
            Value::Map(root) => Ok(Self { root }),
            other => Err(DomainError::InvalidContext(format!(
                "expected a mapping at the top level, found {}",
                kind_name(&other)
            ))),
        }
    }
}

impl TryFrom<serde_json::Value> for DataContext {
    type Error = DomainError;

    fn try_from(value: serde_json::Value) -> DomainResult<Self> {
        Self::try_from(Value::from(value))
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Int(_) | Value::Float(_) => "a number",
        Value::String(_) => "a string",
        Value::List(_) => "a list",
        Value::Map(_) => "a mapping",
    }
}
