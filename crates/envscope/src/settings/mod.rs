//! Prefix-scoped settings container and lookup.
//!
//! Responsibilities:
//! - Hold the primary and override configuration maps populated by ingestion.
//! - Resolve a setting name against override sets first, then the primary map.
//! - Provide a deep-copy snapshot of the primary map.
//!
//! Does NOT handle:
//! - Reading the environment or dotenv files (see `ingest.rs`).
//! - Override key sequence checks on the source (see `source.rs`).
//!
//! Invariants / Assumptions:
//! - Keys in the primary map have had the env prefix stripped exactly once.
//! - A key moved into an override set never also exists in the primary map.
//! - Lookup never mutates state, but it re-invokes the override source on
//!   every call; per-request override selection relies on this.
//! - Ingestion and lookup are not internally synchronized. Sharing one
//!   instance across threads while loading is a data race the caller must
//!   serialize.

mod builder;
mod error;
mod ingest;
mod source;

pub use builder::SettingsBuilder;
pub use error::SettingsError;
pub use source::OverrideSource;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::ops::Index;

use serde_json::Value;

/// Settings loaded from prefixed environment variables and dotenv files.
///
/// Construct with [`Settings::builder`], populate with
/// [`load_env`](Settings::load_env) /
/// [`load_dotenv_file`](Settings::load_dotenv_file) /
/// [`load_entries`](Settings::load_entries), and read with
/// [`get`](Settings::get) or the indexing operator.
#[derive(Debug)]
pub struct Settings {
    env_prefix: String,
    override_prefix: Option<String>,
    override_source: Option<OverrideSource>,
    reverse_lookup: bool,
    config: BTreeMap<String, Value>,
    override_config: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Settings {
    /// Start building a `Settings` instance for the given env prefix.
    pub fn builder(env_prefix: impl Into<String>) -> SettingsBuilder {
        SettingsBuilder::new(env_prefix)
    }

    pub(crate) fn new(
        env_prefix: String,
        override_prefix: Option<String>,
        override_source: Option<OverrideSource>,
        reverse_lookup: bool,
    ) -> Self {
        Self {
            env_prefix,
            override_prefix,
            override_source,
            reverse_lookup,
            config: BTreeMap::new(),
            override_config: BTreeMap::new(),
        }
    }

    /// The prefix that selects environment variables for this instance.
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Whether `name` is present in the primary map (overrides not consulted).
    pub fn contains(&self, name: &str) -> bool {
        self.config.contains_key(name)
    }

    /// Number of settings in the primary map.
    pub fn len(&self) -> usize {
        self.config.len()
    }

    /// Whether the primary map is empty.
    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    /// Resolve `name` against the override sets, then the primary map.
    ///
    /// When both an override prefix and an override source are configured,
    /// the source is invoked to produce the override key sequence. Keys are
    /// consulted in order (reversed first when reverse lookup is enabled) and
    /// the first set containing `name` wins; otherwise the primary map is
    /// consulted. Sequence keys with no loaded override set are reported with
    /// a warning and skipped.
    ///
    /// The override source is re-invoked on every call; its result is never
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NotFound`] when `name` exists in neither an
    /// override set nor the primary map.
    pub fn get(&self, name: &str) -> Result<&Value, SettingsError> {
        if self.override_prefix.is_some()
            && let Some(override_source) = &self.override_source
        {
            let mut override_keys = override_source.resolve();

            let missing: Vec<&String> = override_keys
                .iter()
                .filter(|key| !self.override_config.contains_key(key.as_str()))
                .collect();
            if !missing.is_empty() {
                tracing::warn!(
                    keys = ?missing,
                    "No override configuration loaded for these override keys"
                );
            }

            if self.reverse_lookup {
                override_keys.reverse();
            }

            for key in &override_keys {
                if let Some(overrides) = self.override_config.get(key)
                    && let Some(value) = overrides.get(name)
                {
                    return Ok(value);
                }
            }
        }

        self.config.get(name).ok_or_else(|| SettingsError::NotFound {
            name: name.to_string(),
            settings: format!("{self:?}"),
        })
    }

    /// Deep, independent copy of the primary map (overrides excluded).
    ///
    /// Mutating the returned map never affects this instance.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.config.clone()
    }
}

impl Index<&str> for Settings {
    type Output = Value;

    /// Indexing form of [`get`](Settings::get).
    ///
    /// # Panics
    ///
    /// Panics when `name` is not present, like map indexing.
    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
