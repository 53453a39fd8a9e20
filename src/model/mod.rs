//! Core data model: the Task entity and its status enum.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TaskdeckError;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Wire form of the status ("pending" | "in-progress" | "completed")
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(TaskdeckError::validation(format!(
                "invalid status '{}': must be one of pending, in-progress, completed",
                other
            ))),
        }
    }
}

/// A persisted task record.
///
/// Wire form is camelCase (`dueDate`, `createdAt`, `updatedAt`), matching the
/// field names the browser client sends and expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Row id, assigned by the store on creation, never reused
    pub id: i64,
    /// Required non-empty title
    pub title: String,
    /// Free-text description, empty when not provided
    #[serde(default)]
    pub description: String,
    /// Optional due timestamp (RFC 3339)
    pub due_date: Option<DateTime<Utc>>,
    /// Current status
    pub status: TaskStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["pending", "in-progress", "completed"] {
            let status: TaskStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        let err = "done".parse::<TaskStatus>().unwrap_err();
        assert!(err.to_string().contains("invalid status 'done'"));
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: 1,
            title: "Buy milk".to_string(),
            description: String::new(),
            due_date: None,
            status: TaskStatus::InProgress,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "in-progress");
        assert!(json.get("dueDate").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("due_date").is_none());
    }
}
