//! Task record as stored by the task server in `tasks.json`
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::parse_timestamp;

/// A user-owned unit of work. Read-only for the reminder core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier assigned by the task server
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Estimated effort in minutes
    #[serde(default)]
    pub duration: f64,

    /// Raw deadline as entered, e.g. `2025-09-14` or `2025-09-14T15:07`
    #[serde(default)]
    pub deadline: Option<String>,

    #[serde(default)]
    pub urgent: bool,

    #[serde(default)]
    pub completed: bool,

    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub created_at: Option<i64>,

    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Task {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            duration: 0.0,
            deadline: None,
            urgent: false,
            completed: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_deadline(mut self, deadline: &str) -> Self {
        self.deadline = Some(deadline.to_string());
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Deadline as an instant. Absent and unparseable deadlines both yield `None`.
    pub fn deadline_at(&self) -> Option<DateTime<Utc>> {
        self.deadline.as_deref().and_then(parse_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_record() {
        let json = r#"{
            "id": "0b7c1a",
            "title": "Write report",
            "description": "",
            "duration": 45,
            "deadline": "2025-09-14T15:07",
            "urgent": true,
            "completed": false,
            "createdAt": 1757850000000,
            "updatedAt": 1757850000000
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "0b7c1a");
        assert_eq!(task.duration, 45.0);
        assert!(task.urgent);
        assert_eq!(task.created_at, Some(1757850000000));
        assert_eq!(task.deadline_at(), parse_timestamp("2025-09-14T15:07"));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let task: Task =
            serde_json::from_str(r#"{"id": "1", "title": "Call mom", "deadline": null}"#).unwrap();
        assert_eq!(task, Task::new("1", "Call mom"));
        assert_eq!(task.deadline_at(), None);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let json = serde_json::to_value(Task::new("1", "x")).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_unparseable_deadline_is_none() {
        let task = Task::new("1", "x").with_deadline("next tuesday");
        assert_eq!(task.deadline_at(), None);
    }
}
