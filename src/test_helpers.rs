//! Shared test utilities
//!
//! This module is only compiled in test mode.

use crate::file_utils::Record;
use serde::{Serialize, Serializer};
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Routes `tracing` output through the test harness so it shows up for
/// failing tests only. Safe to call from every test.
pub fn init_test_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Converts a `json!` object literal into a [`Record`].
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
pub fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A value that always fails to serialize
pub struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("value cannot be represented in JSON"))
    }
}
