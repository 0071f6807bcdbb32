//! Named single-valued bindings.

use crate::error::{BinderyError, Result};
use crate::value::Value;

/// A key bound to at most one [`Value`].
///
/// The value slot is single-assignment: a pair may start unset and receive
/// its value later, but it cannot be rebound. Reading an unset pair fails
/// with [`BinderyError::MissingValue`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair {
    key: String,
    value: Option<Box<Value>>,
}

impl Pair {
    /// Create an unset pair. Fails with [`BinderyError::EmptyKey`] for `""`.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(BinderyError::EmptyKey);
        }
        Ok(Self { key, value: None })
    }

    /// Create a pair with its value already bound.
    pub fn with_value(key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let mut pair = Self::new(key)?;
        pair.value = Some(Box::new(value.into()));
        Ok(pair)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Bind the value. A pair that already holds one is left untouched and
    /// [`BinderyError::ValueAlreadySet`] is returned.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
        if self.value.is_some() {
            return Err(BinderyError::ValueAlreadySet {
                key: self.key.clone(),
            });
        }
        self.value = Some(Box::new(value.into()));
        Ok(())
    }

    /// The bound value, or [`BinderyError::MissingValue`] naming this key.
    pub fn value(&self) -> Result<&Value> {
        self.value
            .as_deref()
            .ok_or_else(|| BinderyError::MissingValue {
                path: self.key.clone(),
            })
    }
}
