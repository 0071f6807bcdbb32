//! IR converter — validates a binding tree and rewrites it into the
//! renderer-facing intermediate representation.
//!
//! The IR is a plain `serde_json::Value` (insertion-ordered maps via the
//! `preserve_order` feature):
//!
//! - Pair → `{key: value}`
//! - text array → `[scalar, ...]` with numeric coercion
//! - array list → `[[...], ...]`
//! - pair array → `[{key: value}, ...]` (repeated records)
//! - Text / Code → their own JSON form
//!
//! Conversion is all-or-nothing. The walk is depth-first, left to right, and
//! stops at the first offending node; errors carry its path in a
//! `$.key[index]` notation. Keys that are empty or contain `.`, `[`, `]`, `"`
//! or `\` are written in bracket form instead, e.g. `$["a.b"][0]`.

use crate::array::{Array, ArrayShape};
use crate::error::{BinderyError, Result};
use crate::pair::Pair;
use crate::value::Value;
use serde::Deserialize;
use serde_json::Map;
use std::fmt::Write;

/// How arrays without items are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyArrayPolicy {
    /// An empty array has no shape and fails with `StructureMismatch`.
    #[default]
    Reject,
    /// An empty array converts to `[]`.
    Allow,
}

/// Converter settings. Deserializable so they can live in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    pub empty_arrays: EmptyArrayPolicy,
}

/// Root marker for error paths.
const ROOT: &str = "$";

/// Stateless walker; one instance may convert any number of trees.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a top-level pair into `{key: value}`.
    pub fn convert_pair(&self, pair: &Pair) -> Result<serde_json::Value> {
        let mut path = String::from(ROOT);
        self.pair(pair, &mut path)
    }

    /// Convert a top-level array (no wrapping key).
    pub fn convert_array(&self, array: &Array) -> Result<serde_json::Value> {
        let mut path = String::from(ROOT);
        self.array(array, &mut path)
    }

    /// Convert any value as if it were the root of a tree.
    pub fn convert_value(&self, value: &Value) -> Result<serde_json::Value> {
        let mut path = String::from(ROOT);
        self.value(value, &mut path)
    }

    fn value(&self, value: &Value, path: &mut String) -> Result<serde_json::Value> {
        match value {
            Value::Text(text) => Ok(text.to_json()),
            Value::Code(code) => Ok(code.to_json()),
            Value::Pair(pair) => self.pair(pair, path),
            Value::Array(array) => self.array(array, path),
        }
    }

    fn pair(&self, pair: &Pair, path: &mut String) -> Result<serde_json::Value> {
        let mark = path.len();
        push_key(path, pair.key());

        let value = pair.value().map_err(|_| BinderyError::MissingValue {
            path: path.clone(),
        })?;
        let converted = self.value(value, path)?;
        path.truncate(mark);

        let mut map = Map::with_capacity(1);
        map.insert(pair.key().to_string(), converted);
        Ok(serde_json::Value::Object(map))
    }

    fn array(&self, array: &Array, path: &mut String) -> Result<serde_json::Value> {
        if array.is_empty() && self.options.empty_arrays == EmptyArrayPolicy::Allow {
            return Ok(serde_json::Value::Array(Vec::new()));
        }

        let Some(shape) = array.shape() else {
            let kinds: Vec<&str> = array.items().iter().map(Value::kind).collect();
            tracing::debug!(path = %path, ?kinds, "array is not homogeneous");
            return Err(BinderyError::StructureMismatch { path: path.clone() });
        };

        let mut out = Vec::with_capacity(array.len());
        for (index, item) in array.items().iter().enumerate() {
            let mark = path.len();
            push_index(path, index);
            let converted = match (shape, item) {
                (ArrayShape::Text, Value::Text(text)) => text.to_json(),
                (ArrayShape::List, Value::Array(inner)) => self.array(inner, path)?,
                (ArrayShape::Pairs, Value::Pair(pair)) => self.pair(pair, path)?,
                // The cached shape guarantees every item matches it.
                _ => return Err(BinderyError::StructureMismatch { path: path.clone() }),
            };
            path.truncate(mark);
            out.push(converted);
        }
        Ok(serde_json::Value::Array(out))
    }
}

/// Append `.key`, or `["key"]` when the key would be ambiguous in dotted form.
pub(crate) fn push_key(path: &mut String, key: &str) {
    let plain = !key.is_empty() && !key.contains(['.', '[', ']', '"', '\\']);
    if plain {
        path.push('.');
        path.push_str(key);
        return;
    }
    path.push_str("[\"");
    for ch in key.chars() {
        if matches!(ch, '"' | '\\') {
            path.push('\\');
        }
        path.push(ch);
    }
    path.push_str("\"]");
}

/// Append `[index]`.
pub(crate) fn push_index(path: &mut String, index: usize) {
    // Writing to a String cannot fail.
    let _ = write!(path, "[{index}]");
}
