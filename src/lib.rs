//! utilkit - small list and file helpers
//!
//! Two independent, stateless modules:
//!
//! - [`list_utils`] - cleaning lists of strings (blank entries, duplicates,
//!   surrounding whitespace) and picking out Chinese/Japanese characters
//! - [`file_utils`] - reading lines and writing plain text, JSON and JSON-lines
//!   files, with `save_*` helpers that rewrite existing files and create new ones
//!
//! Supporting modules:
//!
//! - [`fs`] - filesystem capability (`OsFs` for disk, `MemoryFs` for tests)
//! - [`json_format`] - on-disk JSON encoding
//! - [`config`] - store configuration
//! - [`error`] - error types
//!
//! # Configuration
//!
//! The free functions in [`file_utils`] use the default [`StoreConfig`]. To
//! change it, build a [`FileStore`] from a config file or value:
//!
//! ```no_run
//! use utilkit::{FileStore, JsonStyle, StoreConfig};
//!
//! // {"json_style": "compact", "sync_on_write": true}
//! let store = FileStore::from_config_file("utilkit.json");
//!
//! let explicit = FileStore::from_config(StoreConfig {
//!     json_style: JsonStyle::Compact,
//!     ..StoreConfig::load("utilkit.json")
//! });
//! explicit.save_in_jsonl(&[serde_json::json!({"id": 1})], "records.jsonl")?;
//! # drop(store);
//! # Ok::<(), utilkit::Error>(())
//! ```
//!
//! All operations are synchronous. None of them is safe to run concurrently on
//! the same path.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod file_utils;
pub mod fs;
pub mod json_format;
pub mod list_utils;

#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used types
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use file_utils::{Content, FileStore, Record, SaveAction};
pub use fs::{FileSystem, MemoryFs, OsFs, WriteMode};
pub use json_format::JsonStyle;
