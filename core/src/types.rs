//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift. Timestamps are
//! timezone-less (`NaiveDateTime`) because that is what the backend emits.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Todo priority.
///
/// The backend stores priority as free text, so unknown values decode into
/// `Other` instead of failing the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(s) => s,
        }
    }

    /// Parses one of the three known priorities. Used for user input, where
    /// an unknown value is a typo rather than server data.
    pub fn parse_known(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::parse_known(&s).unwrap_or(Priority::Other(s))
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A named, colored label attachable to todos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: NaiveDateTime,
}

/// Server-computed aggregate counts over all todos.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    #[serde(default)]
    pub by_priority: BTreeMap<String, u64>,
    /// Keyed by category id as a string; uncategorized todos count under `"None"`.
    #[serde(default)]
    pub by_category: BTreeMap<String, u64>,
}

/// Request payload for creating a new todo.
///
/// `description` and `category_id` are sent as explicit `null` when absent,
/// matching what the backend expects from a form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
}

impl UpdateTodo {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

/// The create form as the user is filling it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category_id: Option<i64>,
}

impl TodoDraft {
    /// Converts the draft into a create payload, or `None` when the title is
    /// blank. An empty description is sent as absent.
    pub fn to_create(&self) -> Option<CreateTodo> {
        if self.title.trim().is_empty() {
            return None;
        }
        let description = if self.description.is_empty() {
            None
        } else {
            Some(self.description.clone())
        };
        Some(CreateTodo {
            title: self.title.clone(),
            description,
            priority: self.priority.clone(),
            category_id: self.category_id,
            due_date: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_priority_is_preserved() {
        let p: Priority = serde_json::from_str(r#""urgent""#).unwrap();
        assert_eq!(p, Priority::Other("urgent".to_string()));
        assert_eq!(serde_json::to_string(&p).unwrap(), r#""urgent""#);
    }

    #[test]
    fn known_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
        let p: Priority = serde_json::from_str(r#""low""#).unwrap();
        assert_eq!(p, Priority::Low);
    }

    #[test]
    fn todo_decodes_backend_shape() {
        let raw = r#"{
            "id": 7,
            "title": "Pay rent",
            "description": null,
            "completed": false,
            "priority": "high",
            "category_id": 2,
            "due_date": null,
            "created_at": "2024-03-01T09:30:00.123456",
            "updated_at": "2024-03-01T09:30:00.123456"
        }"#;
        let todo: Todo = serde_json::from_str(raw).unwrap();
        assert_eq!(todo.id, 7);
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.category_id, Some(2));
        assert!(todo.description.is_none());
    }

    #[test]
    fn stats_aggregates_default_to_empty() {
        let stats: Stats = serde_json::from_str(r#"{"total":3,"completed":1,"pending":2}"#).unwrap();
        assert_eq!(stats.total, 3);
        assert!(stats.by_priority.is_empty());
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn draft_with_blank_title_is_rejected() {
        let draft = TodoDraft {
            title: "   ".to_string(),
            ..TodoDraft::default()
        };
        assert!(draft.to_create().is_none());
    }

    #[test]
    fn draft_normalizes_empty_description() {
        let draft = TodoDraft {
            title: "Read".to_string(),
            ..TodoDraft::default()
        };
        let create = draft.to_create().unwrap();
        assert!(create.description.is_none());
        assert_eq!(create.priority, Priority::Medium);

        let json = serde_json::to_value(&create).unwrap();
        assert!(json["description"].is_null());
        assert!(json["category_id"].is_null());
        assert!(json.get("due_date").is_none());
    }

    #[test]
    fn update_completed_only_sends_completed() {
        let json = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }
}
