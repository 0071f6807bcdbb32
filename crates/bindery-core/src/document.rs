//! Document builder — turns a parsed JSON or YAML tree into a value tree.
//!
//! # Mapping rules
//!
//! | Parsed node                         | Value                         |
//! |-------------------------------------|-------------------------------|
//! | string / number / bool              | `Text` (canonical spelling)   |
//! | `{"$code": "..."}` or `!code "..."` | `Code`                        |
//! | sequence                            | `Array`                       |
//! | mapping with one entry              | `Pair`                        |
//! | mapping with zero or several        | `Array` of `Pair`s            |
//! | `null` as a mapping value           | unset `Pair`                  |
//!
//! The root must be a mapping or a sequence. An unset pair is accepted here
//! and only reported as `MissingValue` when the document is converted.

use crate::array::Array;
use crate::convert::{push_index, push_key, ConvertOptions, Converter};
use crate::error::{BinderyError, Result};
use crate::pair::Pair;
use crate::value::Value;
use std::collections::HashSet;

/// Key that marks a JSON object as a code snippet.
pub const CODE_KEY: &str = "$code";

/// YAML tag that marks a scalar as a code snippet (`!code`).
pub const CODE_TAG: &str = "code";

/// The root of a binding tree: a single named binding or an unnamed
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Document {
    Pair(Pair),
    Array(Array),
}

impl Document {
    /// Parse JSON text and build the document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Parse YAML text and build the document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Self::from_yaml_value(&value)
    }

    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        build_document(value)
    }

    pub fn from_yaml_value(value: &serde_yaml::Value) -> Result<Self> {
        build_document(value)
    }

    /// Validate the tree and produce its IR.
    pub fn convert(&self, options: &ConvertOptions) -> Result<serde_json::Value> {
        let converter = Converter::new(options.clone());
        tracing::debug!(root = self.kind(), ?options, "converting document");
        let result = match self {
            Document::Pair(pair) => converter.convert_pair(pair),
            Document::Array(array) => converter.convert_array(array),
        };
        match &result {
            Ok(_) => tracing::debug!(root = self.kind(), "document converted"),
            Err(err) => tracing::debug!(error = %err, "conversion failed"),
        }
        result
    }

    /// [`Document::convert`] rendered as pretty-printed JSON.
    pub fn to_json_string(&self, options: &ConvertOptions) -> Result<String> {
        Ok(format!("{:#}", self.convert(options)?))
    }

    fn kind(&self) -> &'static str {
        match self {
            Document::Pair(_) => "pair",
            Document::Array(_) => "array",
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        match document {
            Document::Pair(pair) => Value::Pair(pair),
            Document::Array(array) => Value::Array(array),
        }
    }
}

/// A parsed node, reduced to what the builder distinguishes.
enum Node<'a, T> {
    Null,
    String(String),
    /// A number or boolean, already spelled as text.
    Scalar(String),
    Code(String),
    Sequence(&'a [T]),
    Mapping(Vec<(String, &'a T)>),
}

/// A parsed tree the builder can walk.
trait RawTree: Sized {
    fn node(&self, path: &str) -> Result<Node<'_, Self>>;
}

impl RawTree for serde_json::Value {
    fn node(&self, path: &str) -> Result<Node<'_, Self>> {
        use serde_json::Value as Json;
        Ok(match self {
            Json::Null => Node::Null,
            Json::Bool(b) => Node::Scalar(b.to_string()),
            Json::Number(n) => Node::Scalar(n.to_string()),
            Json::String(s) => Node::String(s.clone()),
            Json::Array(items) => Node::Sequence(items),
            Json::Object(map) => {
                let entries = map.iter().map(|(k, v)| (k.clone(), v)).collect();
                code_or_mapping(entries, path)?
            }
        })
    }
}

impl RawTree for serde_yaml::Value {
    fn node(&self, path: &str) -> Result<Node<'_, Self>> {
        use serde_yaml::Value as Yaml;
        Ok(match self {
            Yaml::Null => Node::Null,
            Yaml::Bool(b) => Node::Scalar(b.to_string()),
            Yaml::Number(n) => Node::Scalar(n.to_string()),
            Yaml::String(s) => Node::String(s.clone()),
            Yaml::Sequence(items) => Node::Sequence(items),
            Yaml::Mapping(mapping) => {
                let mut entries = Vec::with_capacity(mapping.len());
                for (key, value) in mapping {
                    entries.push((yaml_key(key, path)?, value));
                }
                code_or_mapping(entries, path)?
            }
            Yaml::Tagged(tagged) if tagged.tag == CODE_TAG => match &tagged.value {
                Yaml::String(s) => Node::Code(s.clone()),
                _ => return Err(invalid(path, "!code must tag a string")),
            },
            Yaml::Tagged(tagged) => {
                return Err(invalid(path, &format!("unsupported tag {}", tagged.tag)));
            }
        })
    }
}

/// Spell a scalar YAML key as a string; complex keys are rejected.
fn yaml_key(key: &serde_yaml::Value, path: &str) -> Result<String> {
    use serde_yaml::Value as Yaml;
    match key {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        _ => Err(invalid(path, "mapping keys must be strings, numbers or booleans")),
    }
}

/// A single-entry mapping keyed by [`CODE_KEY`] is a code snippet.
fn code_or_mapping<'a, T: RawTree>(
    entries: Vec<(String, &'a T)>,
    path: &str,
) -> Result<Node<'a, T>> {
    if let [(key, value)] = entries.as_slice() {
        if key == CODE_KEY {
            return match value.node(path)? {
                Node::String(snippet) => Ok(Node::Code(snippet)),
                _ => Err(invalid(path, "$code must hold a string")),
            };
        }
    }
    Ok(Node::Mapping(entries))
}

fn build_document<T: RawTree>(root: &T) -> Result<Document> {
    let mut path = String::from("$");
    match root.node(&path)? {
        Node::Sequence(items) => Ok(Document::Array(build_array(items, &mut path)?)),
        Node::Mapping(entries) if entries.is_empty() => Err(invalid(&path, "document is empty")),
        Node::Mapping(entries) => {
            let mut pairs = build_pairs(entries, &mut path)?;
            if pairs.len() == 1 {
                return Ok(Document::Pair(pairs.remove(0)));
            }
            Ok(Document::Array(pairs.into_iter().map(Value::Pair).collect()))
        }
        Node::Null | Node::String(_) | Node::Scalar(_) | Node::Code(_) => Err(invalid(
            &path,
            "document root must be a mapping or a sequence",
        )),
    }
}

/// Build a value, with `None` standing for an explicit `null`.
fn build_slot<T: RawTree>(node: &T, path: &mut String) -> Result<Option<Value>> {
    Ok(Some(match node.node(path)? {
        Node::Null => return Ok(None),
        Node::String(text) | Node::Scalar(text) => Value::text(text),
        Node::Code(snippet) => Value::code(snippet),
        Node::Sequence(items) => Value::Array(build_array(items, path)?),
        Node::Mapping(entries) => {
            let mut pairs = build_pairs(entries, path)?;
            if pairs.len() == 1 {
                Value::Pair(pairs.remove(0))
            } else {
                Value::Array(pairs.into_iter().map(Value::Pair).collect())
            }
        }
    }))
}

fn build_array<T: RawTree>(items: &[T], path: &mut String) -> Result<Array> {
    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let mark = path.len();
        push_index(path, index);
        let value = build_slot(item, path)?
            .ok_or_else(|| invalid(path, "null is only allowed as a mapping value"))?;
        path.truncate(mark);
        values.push(value);
    }
    Ok(Array::new(values))
}

fn build_pairs<T: RawTree>(entries: Vec<(String, &T)>, path: &mut String) -> Result<Vec<Pair>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut pairs = Vec::with_capacity(entries.len());
    for (key, node) in entries {
        if !seen.insert(key.clone()) {
            return Err(BinderyError::DuplicateKey {
                path: path.clone(),
                key,
            });
        }
        let mark = path.len();
        push_key(path, &key);
        let mut pair = Pair::new(key).map_err(|_| invalid(path, "mapping key must not be empty"))?;
        if let Some(value) = build_slot(node, path)? {
            pair.set_value(value)?;
        }
        path.truncate(mark);
        pairs.push(pair);
    }
    Ok(pairs)
}

fn invalid(path: &str, message: &str) -> BinderyError {
    BinderyError::InvalidDocument {
        path: path.to_string(),
        message: message.to_string(),
    }
}
