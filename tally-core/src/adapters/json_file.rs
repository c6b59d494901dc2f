//! JSON document files, one per document, in a single directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::result::{Error, Result};
use crate::ports::DocumentStore;

/// Directory of `*.json` documents
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: false,
        }
    }

    /// Write indented JSON instead of compact JSON
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn path_for(&self, file_name: &str) -> Result<PathBuf> {
        // Only bare file names; anything with a directory part is refused.
        let is_bare = Path::new(file_name).file_name().and_then(|n| n.to_str()) == Some(file_name);
        if !is_bare {
            return Err(Error::validation(format!(
                "Invalid document file name: {}",
                file_name
            )));
        }
        Ok(self.dir.join(file_name))
    }
}

impl DocumentStore for JsonFileStore {
    fn save_json(&self, file_name: &str, value: &Value) -> Result<PathBuf> {
        let path = self.path_for(file_name)?;
        fs::create_dir_all(&self.dir)?;

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        fs::write(&path, bytes)?;
        Ok(path)
    }

    fn load_json(&self, file_name: &str) -> Result<Value> {
        let path = self.path_for(file_name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::not_found(file_name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}
