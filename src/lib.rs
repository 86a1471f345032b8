//! A lenient JSON parser.
//!
//! Input runs through two stages: the [scanner] turns text into a flat sequence of tokens and
//! the [builder] assembles those tokens into a [JsonValue] tree. With the default
//! [DialectOptions] the parser accepts strict JSON only. Each relaxation (comments, trailing
//! commas, single-quoted strings and unquoted keys) can be switched on individually.
//!
//! ```
//! use chisel_lenient_json::{parse_with, DialectOptions, JsonValue};
//!
//! let value = parse_with("{key: 'value', /* note */ list: [1, 2,],}", DialectOptions::lenient())
//!     .unwrap();
//! assert_eq!(value["key"], JsonValue::String("value".to_string()));
//! ```
use std::ops::Index;

use indexmap::IndexMap;

pub mod builder;
pub mod coords;
mod decoders;
pub mod dom;
pub mod errors;
pub mod options;
pub mod scanner;
#[cfg(test)]
mod test_macros;
pub mod tokens;

pub use decoders::Encoding;
pub use errors::{Error, ParserResult};
pub use options::DialectOptions;

/// Basic enumeration of different Json values
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// Map of values, in insertion order
    Object(IndexMap<String, JsonValue>),
    /// Array of values
    Array(Vec<JsonValue>),
    /// Canonical string value
    String(String),
    /// Floating point numeric value
    Number(f64),
    /// Canonical boolean value
    Boolean(bool),
    /// Canonical null value
    Null,
}

/// Shared null value handed out by indexing misses
static NULL: JsonValue = JsonValue::Null;

impl JsonValue {
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Look up a key if this value is an object
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|pairs| pairs.get(key))
    }
}

impl Index<&str> for JsonValue {
    type Output = JsonValue;

    /// Missing keys and non-objects index to [JsonValue::Null]
    fn index(&self, key: &str) -> &JsonValue {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for JsonValue {
    type Output = JsonValue;

    /// Out of range indexes and non-arrays index to [JsonValue::Null]
    fn index(&self, index: usize) -> &JsonValue {
        self.as_array()
            .and_then(|values| values.get(index))
            .unwrap_or(&NULL)
    }
}

/// Parse strict JSON text into a [JsonValue]
pub fn parse(input: &str) -> ParserResult<JsonValue> {
    parse_with(input, DialectOptions::default())
}

/// Parse text into a [JsonValue], accepting the relaxations enabled in `options`
pub fn parse_with(input: &str, options: DialectOptions) -> ParserResult<JsonValue> {
    let tokens = scanner::scan(input, options)?;
    builder::build(&tokens, options)
}
