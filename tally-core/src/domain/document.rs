//! Documents: small immutable values persisted as one JSON file each

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A value that can be written to and read back from its own JSON file.
///
/// Both [`Note`](super::Note) and [`Todo`](super::Todo) implement this, so
/// the storage layer only needs one save path for either.
pub trait Document: Serialize + DeserializeOwned {
    /// Short lowercase name of the document kind ("note", "todo")
    const KIND: &'static str;

    /// File name the document is stored under, including `.json`
    fn file_name(&self) -> String;

    /// Human-readable rendering
    fn display(&self) -> String;

    fn created_at(&self) -> DateTime<Utc>;
}

/// Spelling of JSON object keys in stored documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKeyStyle {
    /// `created_at`
    #[default]
    Snake,
    /// `CreatedAt`
    Pascal,
}

impl JsonKeyStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "snake" | "snake_case" => Some(Self::Snake),
            "pascal" | "pascalcase" => Some(Self::Pascal),
            _ => None,
        }
    }

    /// Re-key a serialized document. Only top-level keys are touched.
    pub fn apply(self, value: Value) -> Value {
        match (self, value) {
            (Self::Pascal, Value::Object(map)) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (snake_to_pascal(&k), v))
                    .collect::<Map<String, Value>>(),
            ),
            (_, value) => value,
        }
    }
}

fn snake_to_pascal(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Derive a file name from a title: lower-cased, spaces to underscores,
/// `.json` appended. Path separators are flattened as well.
pub fn file_name_from_title(title: &str) -> String {
    let stem: String = title
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}.json", stem)
}

/// Required text fields must contain something other than whitespace
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_name_from_title() {
        assert_eq!(file_name_from_title("Shopping List"), "shopping_list.json");
        assert_eq!(file_name_from_title("todo"), "todo.json");
        assert_eq!(file_name_from_title("a  b"), "a__b.json");
    }

    #[test]
    fn test_file_name_cannot_escape_directory() {
        assert_eq!(file_name_from_title("../etc/passwd"), ".._etc_passwd.json");
        assert_eq!(file_name_from_title("a\\b"), "a_b.json");
    }

    #[test]
    fn test_pascal_key_style() {
        let value = json!({"title": "x", "created_at": "2025-01-17T10:30:00Z"});
        let pascal = JsonKeyStyle::Pascal.apply(value);
        assert_eq!(pascal, json!({"Title": "x", "CreatedAt": "2025-01-17T10:30:00Z"}));
    }

    #[test]
    fn test_snake_key_style_is_identity() {
        let value = json!({"text": "x", "created_at": "now"});
        assert_eq!(JsonKeyStyle::Snake.apply(value.clone()), value);
    }

    #[test]
    fn test_parse_key_style() {
        assert_eq!(JsonKeyStyle::parse("PASCAL"), Some(JsonKeyStyle::Pascal));
        assert_eq!(JsonKeyStyle::parse("snake_case"), Some(JsonKeyStyle::Snake));
        assert_eq!(JsonKeyStyle::parse("kebab"), None);
    }
}
