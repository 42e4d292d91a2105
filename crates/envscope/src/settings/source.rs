//! Override key sources and their runtime checks.
//!
//! Responsibilities:
//! - Model the three ways callers can supply override keys: a typed closure,
//!   an untyped closure crossing a dynamic boundary, and a plain value from
//!   deserialized configuration.
//! - Degrade a source that cannot produce a usable key sequence to an empty
//!   sequence with a warning, never an error.
//!
//! Invariants / Assumptions:
//! - `resolve()` is called on every lookup; sources must be cheap and
//!   side-effect free.
//! - For the `Keys` variant the not-callable and unsupported-return-type
//!   conditions cannot arise; they remain reachable through the `Dynamic`
//!   and `Static` variants.

use std::fmt;

use serde_json::Value;

type KeysFn = dyn Fn() -> Vec<String> + Send + Sync;
type DynamicFn = dyn Fn() -> Value + Send + Sync;

/// Source of the override key sequence consulted during lookup.
pub enum OverrideSource {
    /// Typed closure returning override keys in precedence order.
    Keys(Box<KeysFn>),
    /// Closure from a dynamically typed boundary (e.g. deserialized
    /// configuration); its return value is checked on every lookup and must
    /// be a JSON array of strings.
    Dynamic(Box<DynamicFn>),
    /// Plain value from deserialized configuration. Not invocable; always
    /// degrades to an empty sequence with a warning.
    Static(Value),
}

impl OverrideSource {
    /// Wrap a typed closure returning override keys in precedence order.
    pub fn keys<F>(f: F) -> Self
    where
        F: Fn() -> Vec<String> + Send + Sync + 'static,
    {
        Self::Keys(Box::new(f))
    }

    /// Wrap an untyped closure whose return value is checked at lookup time.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Dynamic(Box::new(f))
    }

    /// Wrap a plain value taken from deserialized configuration.
    pub fn value(value: Value) -> Self {
        Self::Static(value)
    }

    /// Produce the override key sequence for one lookup.
    ///
    /// A source that is not invocable, or whose return value is not an array
    /// of strings, yields an empty sequence after emitting a warning; lookup
    /// then proceeds as if no overrides were configured.
    pub(crate) fn resolve(&self) -> Vec<String> {
        match self {
            Self::Keys(f) => f(),
            Self::Dynamic(f) => match f() {
                Value::Array(items) => {
                    let mut keys = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            Value::String(key) => keys.push(key),
                            other => {
                                tracing::warn!(
                                    element = %other,
                                    "Override source returned a non-string override key; \
                                     ignoring the whole sequence"
                                );
                                return Vec::new();
                            }
                        }
                    }
                    keys
                }
                other => {
                    tracing::warn!(
                        returned = %json_type_name(&other),
                        "Override source did not return an array of override keys"
                    );
                    Vec::new()
                }
            },
            Self::Static(_) => {
                tracing::warn!("The override source provided is not callable");
                Vec::new()
            }
        }
    }
}

impl fmt::Debug for OverrideSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keys(_) => f.write_str("Keys(<fn>)"),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
