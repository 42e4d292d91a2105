//! Error types for settings loading and lookup.
//!
//! Responsibilities:
//! - Define the single fatal lookup error and the dotenv loading failures.
//!
//! Invariants:
//! - Dotenv errors NEVER include raw `.env` line contents to prevent secret
//!   leakage; only the parse position or the I/O error kind is carried.
//! - Everything other than these variants degrades to a warning instead of
//!   an error (see `source.rs` and `ingest.rs`).

use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur while loading or looking up settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The requested name exists in neither an override set nor the primary
    /// map. Fatal to the single lookup only.
    #[error("{settings} has no setting named `{name}`")]
    NotFound { name: String, settings: String },

    /// Failed to parse a dotenv file due to invalid syntax.
    ///
    /// Carries only the byte index of the failure, not the offending line.
    #[error("Failed to parse dotenv file at position {error_index}")]
    DotenvParse { error_index: usize },

    /// Failed to read a dotenv file due to an I/O error.
    #[error("Failed to read dotenv file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from the dotenvy crate).
    #[error("Failed to load dotenv file")]
    DotenvUnknown,
}
