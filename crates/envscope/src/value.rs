//! JSON-based coercion of raw variable values.
//!
//! Invariants:
//! - Decoding is total: every input string yields a value, never an error.
//! - A string that is not valid JSON is stored verbatim as `Value::String`.

use serde_json::Value;

/// Decode a raw variable value as JSON, falling back to the raw string.
///
/// `true`/`false` become booleans, numeric literals become numbers, quoted
/// strings become strings, `[...]`/`{...}` become arrays/objects and `null`
/// becomes `Value::Null`. Anything the JSON decoder rejects (typically a bare
/// unquoted word) is kept unchanged.
pub(crate) fn decode_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
