//! Error types for building and converting binding documents.

use thiserror::Error;

/// Errors that can occur while building a value tree or converting it to IR.
#[derive(Error, Debug)]
pub enum BinderyError {
    /// An array mixes item kinds (or is empty under the default policy).
    /// `path` locates the array, e.g. `$.report[2]`.
    #[error("array at '{path}' must contain only text values, only arrays, or only pairs")]
    StructureMismatch { path: String },

    /// A pair was read before a value was bound to it.
    #[error("pair at '{path}' has no value")]
    MissingValue { path: String },

    /// A pair already holds a value and cannot be rebound.
    #[error("pair '{key}' already has a value")]
    ValueAlreadySet { key: String },

    /// Pair keys must be non-empty.
    #[error("pair key must not be empty")]
    EmptyKey,

    /// Two sibling entries of a mapping resolve to the same key.
    #[error("duplicate key '{key}' at '{path}'")]
    DuplicateKey { path: String, key: String },

    /// The parsed tree has a shape the document builder cannot represent.
    #[error("invalid document at '{path}': {message}")]
    InvalidDocument { path: String, message: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl BinderyError {
    /// The tree path the error refers to, when it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            BinderyError::StructureMismatch { path }
            | BinderyError::MissingValue { path }
            | BinderyError::DuplicateKey { path, .. }
            | BinderyError::InvalidDocument { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience alias used throughout bindery-core.
pub type Result<T> = std::result::Result<T, BinderyError>;
