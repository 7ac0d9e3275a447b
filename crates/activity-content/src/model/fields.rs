//! Extension-field container for forward compatibility.
//!
//! Every wire entity can carry caller-defined fields outside the canonical
//! schema. They are stored uninterpreted as JSON values, keyed by name, with
//! insertion order preserved so that serialization round-trips byte layouts.

use serde_json::{Map, Value};

use crate::error::{FieldError, ReservedFieldError};

/// Ordered mapping of caller-defined field names to arbitrary JSON values.
///
/// Keys are unique; writing an existing key overwrites its value in place
/// (last write wins) while new keys append in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdditionalFields {
    entries: Map<String, Value>,
}

impl AdditionalFields {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Inserts a field, rejecting keys that belong to the entity's declared
    /// schema. `reserved` is the owning entity's declared member list.
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        reserved: &[&str],
    ) -> Result<(), ReservedFieldError> {
        let key = key.into();
        if reserved.contains(&key.as_str()) {
            return Err(ReservedFieldError { field: key });
        }
        self.entries.insert(key, value.into());
        Ok(())
    }

    /// Inserts a field without a reserved-key check.
    ///
    /// Used by the lenient parser, which has already established that the
    /// key is outside the declared schema.
    pub(crate) fn insert_unchecked(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }

    /// Returns the raw JSON value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the field as a string slice.
    pub fn get_str(&self, key: &str) -> Result<&str, FieldError> {
        self.typed(key, "a string", Value::as_str)
    }

    /// Returns the field as a signed integer.
    pub fn get_i64(&self, key: &str) -> Result<i64, FieldError> {
        self.typed(key, "an integer", Value::as_i64)
    }

    /// Returns the field as a float.
    pub fn get_f64(&self, key: &str) -> Result<f64, FieldError> {
        self.typed(key, "a number", Value::as_f64)
    }

    /// Returns the field as a boolean.
    pub fn get_bool(&self, key: &str) -> Result<bool, FieldError> {
        self.typed(key, "a boolean", Value::as_bool)
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        extract: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<T, FieldError> {
        let value = self.entries.get(key).ok_or_else(|| FieldError::Missing {
            field: key.to_string(),
        })?;
        extract(value).ok_or_else(|| FieldError::TypeMismatch {
            field: key.to_string(),
            expected,
        })
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AdditionalFields {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
