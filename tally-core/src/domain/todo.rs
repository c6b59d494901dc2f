//! Todo domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::{is_blank, Document};
use super::result::{Error, Result};

/// File every todo is written to
pub const TODO_FILE_NAME: &str = "todo.json";

/// A single todo item. Same rules as [`Note`](super::Note), one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTodo")]
pub struct Todo {
    text: String,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct StoredTodo {
    #[serde(alias = "Text")]
    text: String,
    #[serde(alias = "CreatedAt")]
    created_at: DateTime<Utc>,
}

impl TryFrom<StoredTodo> for Todo {
    type Error = Error;

    fn try_from(stored: StoredTodo) -> Result<Self> {
        if is_blank(&stored.text) {
            return Err(Error::validation("Invalid input."));
        }
        Ok(Self {
            text: stored.text,
            created_at: stored.created_at,
        })
    }
}

impl Todo {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if is_blank(&text) {
            return Err(Error::validation("Invalid input."));
        }

        Ok(Self {
            text,
            created_at: Utc::now(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Document for Todo {
    const KIND: &'static str = "todo";

    fn file_name(&self) -> String {
        TODO_FILE_NAME.to_string()
    }

    fn display(&self) -> String {
        format!("Todo: {}", self.text)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
