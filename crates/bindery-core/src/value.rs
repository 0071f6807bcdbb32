//! The value model: a closed sum type over the four node kinds a binding
//! document can contain.
//!
//! - [`Text`] — a scalar string, exported with numeric coercion
//! - [`Code`] — an opaque snippet resolved by a downstream evaluator
//! - [`Pair`] — a named binding holding exactly one nested value
//! - [`Array`] — an ordered, homogeneous collection
//!
//! Equality and hashing are structural for every variant, so `Text("5")` and
//! `Code("5")` are never equal even though they hold the same string.

use crate::array::Array;
use crate::convert::Converter;
use crate::error::Result;
use crate::pair::Pair;
use serde_json::Number;

/// A node of a binding tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(Text),
    Code(Code),
    Pair(Pair),
    Array(Array),
}

impl Value {
    /// Shorthand for `Value::Text(Text::new(raw))`.
    pub fn text(raw: impl Into<String>) -> Self {
        Value::Text(Text::new(raw))
    }

    /// Shorthand for `Value::Code(Code::new(snippet))`.
    pub fn code(snippet: impl Into<String>) -> Self {
        Value::Code(Code::new(snippet))
    }

    /// Short lowercase name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Code(_) => "code",
            Value::Pair(_) => "pair",
            Value::Array(_) => "array",
        }
    }

    /// True for the leaf variants (Text and Code).
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Text(_) | Value::Code(_))
    }

    /// JSON-like representation of this value.
    ///
    /// Scalars render themselves. Pairs and arrays go through the IR
    /// converter with default options, so they fail the same way a full
    /// conversion would.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Value::Text(text) => Ok(text.to_json()),
            Value::Code(code) => Ok(code.to_json()),
            Value::Pair(_) | Value::Array(_) => Converter::default().convert_value(self),
        }
    }

    /// [`Value::to_json`] rendered as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(format!("{:#}", self.to_json()?))
    }
}

impl From<Text> for Value {
    fn from(text: Text) -> Self {
        Value::Text(text)
    }
}

impl From<Code> for Value {
    fn from(code: Code) -> Self {
        Value::Code(code)
    }
}

impl From<Pair> for Value {
    fn from(pair: Pair) -> Self {
        Value::Pair(pair)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

/// A scalar text value.
///
/// The stored string is never altered; numeric coercion only happens when
/// exporting through [`Text::to_json`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    raw: String,
}

impl Text {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The text exactly as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Export with numeric coercion:
    ///
    /// 1. `[+-]?[0-9]+` that fits in `i64` → JSON integer
    /// 2. decimal/exponent form with a finite value → JSON float
    /// 3. anything else → JSON string, verbatim
    pub fn to_json(&self) -> serde_json::Value {
        if let Some(n) = parse_integer(&self.raw) {
            return serde_json::Value::Number(Number::from(n));
        }
        if let Some(n) = parse_float(&self.raw).and_then(Number::from_f64) {
            return serde_json::Value::Number(n);
        }
        serde_json::Value::String(self.raw.clone())
    }

    /// [`Text::to_json`] rendered as pretty-printed JSON.
    pub fn to_json_string(&self) -> String {
        format!("{:#}", self.to_json())
    }
}

/// An opaque code snippet. Its value is produced by an external evaluator, so
/// it has no static JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code {
    snippet: String,
}

impl Code {
    pub fn new(snippet: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
        }
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// Always JSON `null`: a placeholder for the evaluated result.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    pub fn to_json_string(&self) -> String {
        format!("{:#}", self.to_json())
    }
}

/// Parse `[+-]?[0-9]+` into an `i64`. Overflowing input returns `None` and
/// falls through to the float path.
fn parse_integer(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse `[+-]?(digits[.digits?] | .digits)([eE][+-]?digits)?` into a finite
/// `f64`. Rejects the `inf`/`NaN` spellings `str::parse` would accept.
fn parse_float(s: &str) -> Option<f64> {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    if let Some(exp) = exponent {
        let exp_digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if exp_digits.is_empty() || !all_digits(exp_digits) {
            return None;
        }
    }

    let value: f64 = s.parse().ok()?;
    value.is_finite().then_some(value)
}
