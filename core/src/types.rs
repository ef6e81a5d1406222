//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's wire shape but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo.
pub type TodoId = i64;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }
}

/// Request payload for a partial update. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// Patch that only flips the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Patch that replaces the editable text fields.
    pub fn content(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            completed: None,
        }
    }
}

/// `created_at` codec. The backend emits offset-less timestamps for seeded
/// rows (`2024-01-15T10:00:00`) and RFC 3339 for stored ones; both are read,
/// offset-less values as UTC. Always written as RFC 3339.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn todo_accepts_offsetless_timestamp() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":1,"title":"Aprender FastAPI","description":"Crear una API REST","completed":false,"created_at":"2024-01-15T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(todo.created_at, Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn todo_accepts_rfc3339_with_offset() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":7,"title":"x","description":"","completed":true,"created_at":"2024-01-15T12:30:00.250+02:00"}"#,
        )
        .unwrap();
        assert_eq!(
            todo.created_at,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap() + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn todo_rejects_garbage_timestamp() {
        let result: Result<Todo, _> = serde_json::from_str(
            r#"{"id":1,"title":"x","description":"","completed":false,"created_at":"yesterday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":1,"title":"x","completed":false,"created_at":"2024-01-15T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(todo.description, "");
    }

    #[test]
    fn created_at_serializes_as_rfc3339() {
        let todo = Todo {
            id: 1,
            title: "x".to_string(),
            description: String::new(),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["created_at"], "2024-01-15T10:00:00Z");
    }

    #[test]
    fn completed_patch_omits_text_fields() {
        let json = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({"completed": true}));
    }

    #[test]
    fn content_patch_omits_completed() {
        let json = serde_json::to_value(UpdateTodo::content("T", "")).unwrap();
        assert_eq!(json, serde_json::json!({"title": "T", "description": ""}));
    }

    #[test]
    fn create_payload_starts_incomplete() {
        let json = serde_json::to_value(CreateTodo::new("Buy milk", "2 litres")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Buy milk", "description": "2 litres", "completed": false})
        );
    }
}
