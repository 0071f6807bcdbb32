//! # bindery-core
//!
//! Value model and IR converter for report data-binding documents.
//!
//! A binding document (YAML or JSON) lists the values to substitute into a
//! report template. This crate builds it into a strict tree of four node
//! kinds, checks that every array is homogeneous, and rewrites the tree into
//! a plain JSON intermediate representation for the rendering layer.
//!
//! ## Quick start
//!
//! ```rust
//! use bindery_core::{ConvertOptions, Document};
//!
//! let yaml = "report:\n  - title: Q3\n  - pages: 12\n";
//! let doc = Document::from_yaml_str(yaml).unwrap();
//! let ir = doc.convert(&ConvertOptions::default()).unwrap();
//! assert_eq!(
//!     ir,
//!     serde_json::json!({"report": [{"title": "Q3"}, {"pages": 12}]})
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value` sum type plus the `Text` and `Code` scalars
//! - [`pair`] — single-assignment named bindings
//! - [`array`] — homogeneous collections and their shape
//! - [`document`] — builds a tree from parsed JSON/YAML
//! - [`convert`] — validates a tree and emits the IR
//! - [`error`] — error types

pub mod array;
pub mod convert;
pub mod document;
pub mod error;
pub mod pair;
pub mod value;

pub use array::{Array, ArrayShape};
pub use convert::{ConvertOptions, Converter, EmptyArrayPolicy};
pub use document::Document;
pub use error::{BinderyError, Result};
pub use pair::Pair;
pub use value::{Code, Text, Value};
