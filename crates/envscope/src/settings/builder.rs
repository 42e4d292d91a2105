//! Builder for `Settings`.
//!
//! Responsibilities:
//! - Collect construction parameters (env prefix, override prefix, override
//!   source, reverse lookup) and produce an empty `Settings`.
//!
//! Invariants / Assumptions:
//! - The env prefix is the only required parameter; `build()` cannot fail.
//! - An empty override prefix means overrides are disabled.

use serde_json::Value;

use super::Settings;
use super::source::OverrideSource;

/// Builder returned by [`Settings::builder`].
pub struct SettingsBuilder {
    env_prefix: String,
    override_prefix: Option<String>,
    override_source: Option<OverrideSource>,
    reverse_lookup: bool,
}

impl SettingsBuilder {
    pub(crate) fn new(env_prefix: impl Into<String>) -> Self {
        Self {
            env_prefix: env_prefix.into(),
            override_prefix: None,
            override_source: None,
            reverse_lookup: false,
        }
    }

    /// Set the prefix that marks variables as members of an override set.
    ///
    /// An empty prefix disables override extraction entirely.
    pub fn with_override_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.override_prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    /// Set the source consulted for the override key sequence.
    pub fn with_override_source(mut self, source: OverrideSource) -> Self {
        self.override_source = Some(source);
        self
    }

    /// Set a typed closure returning override keys in precedence order.
    ///
    /// Shorthand for `with_override_source(OverrideSource::keys(f))`.
    pub fn with_override_keys<F>(self, f: F) -> Self
    where
        F: Fn() -> Vec<String> + Send + Sync + 'static,
    {
        self.with_override_source(OverrideSource::keys(f))
    }

    /// Set a plain override-key value taken from deserialized configuration.
    ///
    /// Shorthand for `with_override_source(OverrideSource::value(v))`.
    pub fn with_override_value(self, value: Value) -> Self {
        self.with_override_source(OverrideSource::value(value))
    }

    /// Consult the override key sequence in reverse order.
    pub fn with_reverse_lookup(mut self, reverse: bool) -> Self {
        self.reverse_lookup = reverse;
        self
    }

    /// Build an empty `Settings` instance.
    pub fn build(self) -> Settings {
        Settings::new(
            self.env_prefix,
            self.override_prefix,
            self.override_source,
            self.reverse_lookup,
        )
    }
}
