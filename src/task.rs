//! Task data structure.
//!
//! This module defines the core `Task` struct representing a single work item.
//! Field names serialise in camelCase to stay compatible with the stored
//! `todos` slot layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fields::Status;

/// A single tracked work item.
///
/// `id`, `title` and `created_at` are fixed at creation; only `status` and
/// `previous_status` change afterwards, and only through the lifecycle
/// operations. `previous_status` records where the task sat on the line
/// before it was last frozen and is consulted only while the task is frozen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_previous_status")]
    pub previous_status: Status,
}

// Rows written before freeze support landed have no previousStatus field.
fn default_previous_status() -> Status {
    Status::Todo
}

impl Task {
    /// Create a fresh task at the start of the line.
    pub fn new(title: String) -> Self {
        Task {
            id: Uuid::new_v4(),
            title,
            status: Status::Todo,
            created_at: Utc::now(),
            previous_status: Status::Todo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_camel_case() {
        let task = Task::new("Buy milk".to_string());
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"previousStatus\""));
        assert!(json.contains("\"status\":\"todo\""));
    }

    #[test]
    fn test_status_strings_match_stored_layout() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(serde_json::to_string(&Status::Frozen).unwrap(), "\"frozen\"");
    }

    #[test]
    fn test_previous_status_defaults_for_legacy_rows() {
        let json = r#"{
            "id": "7f0ce1de-9f6b-4f9f-8f44-0f6a7c3f2a11",
            "title": "Legacy",
            "status": "inProgress",
            "createdAt": "2024-01-15T09:30:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.previous_status, Status::Todo);
        assert_eq!(task.status, Status::InProgress);
    }
}
