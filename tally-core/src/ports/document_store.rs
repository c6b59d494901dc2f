//! Document store port - one JSON value per named file

use std::path::PathBuf;

use serde_json::Value;

use crate::domain::result::Result;

/// Storage for serialized documents, keyed by file name
pub trait DocumentStore {
    /// Write `value` under `file_name`, replacing any previous content.
    /// Returns the full path written.
    fn save_json(&self, file_name: &str, value: &Value) -> Result<PathBuf>;

    /// Read the value stored under `file_name`
    fn load_json(&self, file_name: &str) -> Result<Value>;

    /// File names of all stored documents, sorted
    fn list(&self) -> Result<Vec<String>>;
}
