//! Prefix-scoped application settings from environment variables and `.env` files.
//!
//! This crate loads every environment variable carrying a configured prefix
//! into a [`Settings`] container, stripping the prefix and decoding each value
//! as JSON (falling back to the raw string when the value is not valid JSON).
//! An optional second prefix groups variables into named override sets that
//! are consulted, in caller-supplied order, before the primary values.
//!
//! ```
//! use envscope::{Settings, Value};
//!
//! let mut settings = Settings::builder("MY_APP_").build();
//! settings.load_entries([
//!     ("MY_APP_TIMEOUT".to_string(), "30".to_string()),
//!     ("MY_APP_NAME".to_string(), "vial".to_string()),
//! ]);
//!
//! assert_eq!(settings.get("TIMEOUT").unwrap(), &Value::from(30));
//! assert_eq!(settings.get("NAME").unwrap(), &Value::from("vial"));
//! ```
//!
//! `load_env()` reads the process environment the same way, and
//! `load_dotenv_file(path)` reads a dotenv file through [`dotenvy`].

mod settings;
mod value;

pub use serde_json::Value;
pub use settings::{OverrideSource, Settings, SettingsBuilder, SettingsError};
