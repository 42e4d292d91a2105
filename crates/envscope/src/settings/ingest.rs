//! Ingestion of raw variables into the settings maps.
//!
//! Responsibilities:
//! - Filter a source mapping down to env-prefixed entries, strip the prefix
//!   once, JSON-decode each value with a string fallback, and merge into the
//!   primary map.
//! - Move override-prefixed entries into the nested override map.
//! - Load the process environment and dotenv files through the same path.
//!
//! Does NOT handle:
//! - Dotenv syntax itself (delegated to `dotenvy`).
//! - Lookup and override ordering (see `mod.rs`).
//!
//! Invariants / Assumptions:
//! - Ingestion is total over its entries: a value that fails JSON decoding
//!   is stored as a plain string, never rejected.
//! - Repeated calls merge additively; later calls overwrite entries with the
//!   same final name.
//! - A dotenv file that fails to parse merges nothing: entries are collected
//!   before any mutation.
//! - Dotenv errors never carry line contents.

use std::path::Path;

use super::{Settings, SettingsError};
use crate::value::decode_value;

impl Settings {
    /// Load settings from the process environment.
    ///
    /// Every variable whose name starts with the env prefix is loaded under
    /// its stripped name. Variables whose name or value is not valid Unicode
    /// are skipped. May be called repeatedly; each call merges into the
    /// existing state.
    pub fn load_env(&mut self) {
        let entries: Vec<(String, String)> = std::env::vars_os()
            .filter_map(|(name, value)| {
                Some((name.into_string().ok()?, value.into_string().ok()?))
            })
            .collect();
        self.load_entries(entries);
    }

    /// Load settings from a dotenv file at `path`.
    ///
    /// Works like [`load_env`](Settings::load_env), with values read from the
    /// file instead of the environment. A missing file loads nothing and only
    /// emits a warning, matching an empty environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DotenvParse`] for invalid syntax (carrying
    /// only the parse position) or [`SettingsError::DotenvIo`] when the file
    /// cannot be read. On error nothing is merged.
    pub fn load_dotenv_file(&mut self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(error) if is_not_found(&error) => {
                tracing::warn!(path = %path.display(), "Dotenv file not found; nothing loaded");
                return Ok(());
            }
            Err(error) => return Err(map_dotenv_error(error)),
        };

        let mut entries = Vec::new();
        for item in iter {
            entries.push(item.map_err(map_dotenv_error)?);
        }
        self.load_entries(entries);
        Ok(())
    }

    /// Load settings from an arbitrary `(name, value)` mapping.
    ///
    /// This is the core ingestion contract behind
    /// [`load_env`](Settings::load_env) and
    /// [`load_dotenv_file`](Settings::load_dotenv_file): entries not carrying
    /// the env prefix are ignored, the prefix is stripped from the start of
    /// the name exactly once, and each value is decoded as JSON with a
    /// fallback to the raw string. Later entries (and later calls) overwrite
    /// earlier ones with the same final name.
    pub fn load_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, raw) in entries {
            if let Some(stripped) = name.strip_prefix(&self.env_prefix) {
                self.config.insert(stripped.to_string(), decode_value(&raw));
            }
        }

        if self.override_prefix.is_some() {
            self.extract_overrides();
        }
    }

    /// Move override-prefixed entries out of the primary map.
    ///
    /// The remainder after the override prefix splits on the first `_` into
    /// the override key and the final setting name. A remainder with no `_`
    /// is malformed: the entry is skipped with a warning and stays in the
    /// primary map under its full stripped name.
    fn extract_overrides(&mut self) {
        let Some(prefix) = self.override_prefix.clone() else {
            return;
        };

        let names: Vec<String> = self
            .config
            .keys()
            .filter(|name| name.starts_with(prefix.as_str()))
            .cloned()
            .collect();

        for name in names {
            let remainder = &name[prefix.len()..];
            let Some((override_key, setting_name)) = remainder.split_once('_') else {
                tracing::warn!(
                    variable = %name,
                    "Override variable has no `_` separating an override key \
                     from the setting name; keeping it in the primary map"
                );
                continue;
            };
            let override_key = override_key.to_string();
            let setting_name = setting_name.to_string();

            if let Some(value) = self.config.remove(&name) {
                self.override_config
                    .entry(override_key)
                    .or_default()
                    .insert(setting_name, value);
            }
        }
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(error: &dotenvy::Error) -> bool {
    matches!(
        error,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

fn map_dotenv_error(error: dotenvy::Error) -> SettingsError {
    match error {
        dotenvy::Error::LineParse(_, index) => SettingsError::DotenvParse { error_index: index },
        dotenvy::Error::Io(io_err) => SettingsError::DotenvIo {
            kind: io_err.kind(),
        },
        _ => SettingsError::DotenvUnknown,
    }
}
