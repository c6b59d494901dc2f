//! Note domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::{file_name_from_title, is_blank, Document};
use super::result::{Error, Result};

/// A titled note.
///
/// Only constructible through [`Note::new`] (or by reading a stored note,
/// which goes through the same checks), so a `Note` always has a non-empty
/// title and content and a creation time it picked itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredNote")]
pub struct Note {
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

/// On-disk shape, accepting both key spellings
#[derive(Deserialize)]
struct StoredNote {
    #[serde(alias = "Title")]
    title: String,
    #[serde(alias = "Content")]
    content: String,
    #[serde(alias = "CreatedAt")]
    created_at: DateTime<Utc>,
}

impl TryFrom<StoredNote> for Note {
    type Error = Error;

    fn try_from(stored: StoredNote) -> Result<Self> {
        validate(&stored.title, &stored.content)?;
        Ok(Self {
            title: stored.title,
            content: stored.content,
            created_at: stored.created_at,
        })
    }
}

fn validate(title: &str, content: &str) -> Result<()> {
    if is_blank(title) || is_blank(content) {
        return Err(Error::validation("Invalid input."));
    }
    Ok(())
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let content = content.into();
        validate(&title, &content)?;

        Ok(Self {
            title,
            content,
            created_at: Utc::now(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Document for Note {
    const KIND: &'static str = "note";

    fn file_name(&self) -> String {
        file_name_from_title(&self.title)
    }

    fn display(&self) -> String {
        format!(
            "Your note titled {} has the following content:\n\n{}\n\n",
            self.title, self.content
        )
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
