//! Token type definitions

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Constant value of the header `type` field
pub const TOKEN_TYPE: &str = "JWT";

/// Caller-supplied claims: an ordered JSON object
///
/// Key order is preserved through encode and decode.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Deepest nesting of objects and arrays a token segment may carry,
/// counting the top-level object as one level
///
/// Encoding refuses deeper payloads and decoding rejects them, so every
/// token the codec mints can be verified by it. The bound sits below
/// `serde_json`'s parser recursion limit.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Whether `object` nests deeper than [`MAX_NESTING_DEPTH`]
pub(crate) fn exceeds_nesting_depth(object: &Payload) -> bool {
    // `budget` is the number of container levels still permitted
    fn deeper_than(value: &Value, budget: usize) -> bool {
        match value {
            Value::Array(items) => {
                budget == 0 || items.iter().any(|item| deeper_than(item, budget - 1))
            }
            Value::Object(map) => {
                budget == 0 || map.values().any(|item| deeper_than(item, budget - 1))
            }
            _ => false,
        }
    }
    object
        .values()
        .any(|value| deeper_than(value, MAX_NESTING_DEPTH - 1))
}

/// Token header
///
/// Serialized with keys in the order `type`, `alg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenHeader {
    /// Token type marker, always [`TOKEN_TYPE`] on encode
    #[serde(rename = "type")]
    pub typ: String,
    /// Algorithm identifier used to sign the token
    pub alg: String,
}

impl TokenHeader {
    /// Header for a token signed with `alg`
    #[must_use]
    pub fn new(alg: &str) -> Self {
        Self {
            typ: TOKEN_TYPE.to_string(),
            alg: alg.to_string(),
        }
    }
}

/// One of the three dot-separated parts of a compact token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Encoded header
    Header,
    /// Encoded payload
    Payload,
    /// Encoded signature
    Signature,
}

impl Segment {
    /// Lowercase segment name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Segment::Header => "header",
            Segment::Payload => "payload",
            Segment::Signature => "signature",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
