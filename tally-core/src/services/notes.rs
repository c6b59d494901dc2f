//! Note service - validate, timestamp, marshal, write
//!
//! Works on anything implementing [`Document`], so notes and todos share
//! one save and load path.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::document::file_name_from_title;
use crate::domain::result::Result;
use crate::domain::{Document, JsonKeyStyle, Note, Todo, TODO_FILE_NAME};
use crate::ports::DocumentStore;

/// Result of saving a document
#[derive(Debug, Clone, Serialize)]
pub struct SavedDocument {
    pub kind: &'static str,
    pub file_name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// One stored document, as shown by `list`
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub file_name: String,
    pub kind: &'static str,
    /// Note title or todo text
    pub label: String,
    pub created_at: DateTime<Utc>,
}

/// Note service for creating and storing notes and todos
pub struct NoteService {
    store: Box<dyn DocumentStore>,
    key_style: JsonKeyStyle,
}

impl NoteService {
    pub fn new(store: Box<dyn DocumentStore>, key_style: JsonKeyStyle) -> Self {
        Self { store, key_style }
    }

    pub fn create_note(&self, title: &str, content: &str) -> Result<Note> {
        Note::new(title, content)
    }

    pub fn create_todo(&self, text: &str) -> Result<Todo> {
        Todo::new(text)
    }

    /// Serialize `document` and write it under its own file name
    pub fn save<D: Document>(&self, document: &D) -> Result<SavedDocument> {
        let value = self.key_style.apply(serde_json::to_value(document)?);
        let file_name = document.file_name();
        let path = self.store.save_json(&file_name, &value)?;

        Ok(SavedDocument {
            kind: D::KIND,
            file_name,
            path,
            created_at: document.created_at(),
        })
    }

    /// Read a stored document back. Stored values go through the same
    /// validation as freshly created ones.
    pub fn load<D: Document>(&self, file_name: &str) -> Result<D> {
        let value = self.store.load_json(file_name)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Load a note by file name (`shopping_list.json`) or by title
    /// (`Shopping List`)
    pub fn load_note(&self, name: &str) -> Result<Note> {
        let file_name = if name.ends_with(".json") {
            name.to_string()
        } else {
            file_name_from_title(name)
        };
        self.load(&file_name)
    }

    pub fn load_todo(&self) -> Result<Todo> {
        self.load(TODO_FILE_NAME)
    }

    /// Summaries of every readable document in the store, oldest first.
    /// Files that are neither a note nor a todo are skipped.
    pub fn list(&self) -> Result<Vec<DocumentSummary>> {
        let mut summaries = Vec::new();

        for file_name in self.store.list()? {
            let value = match self.store.load_json(&file_name) {
                Ok(value) => value,
                Err(_) => continue,
            };

            let summary = if let Ok(note) = serde_json::from_value::<Note>(value.clone()) {
                DocumentSummary {
                    file_name,
                    kind: Note::KIND,
                    label: note.title().to_string(),
                    created_at: note.created_at(),
                }
            } else if let Ok(todo) = serde_json::from_value::<Todo>(value) {
                DocumentSummary {
                    file_name,
                    kind: Todo::KIND,
                    label: todo.text().to_string(),
                    created_at: todo.created_at(),
                }
            } else {
                continue;
            };

            summaries.push(summary);
        }

        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(summaries)
    }
}
