use crate::json_format::JsonStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every operation of a [`FileStore`](crate::file_utils::FileStore)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Separator style for the JSON and JSON-lines writers
    #[serde(default)]
    pub json_style: JsonStyle,
    /// Flush written files to physical media before returning (real filesystem only)
    #[serde(default)]
    pub sync_on_write: bool,
}

impl StoreConfig {
    /// Loads a config from a JSON file, or returns the default if the file is
    /// missing or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<StoreConfig>(&json) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(
                        "Invalid store config {}, using defaults: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read store config {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
