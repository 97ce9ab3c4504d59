//! Task domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned task identifier
pub type TaskId = i64;

/// A unit of work tracked by the backend
///
/// Instances are freshly deserialized on every poll, so equality is
/// field-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub input_data: String,
    pub status: TaskStatus,
    /// Present only once the task has completed
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
    /// Worker that claimed the task, if any
    #[serde(default)]
    pub worker_id: Option<String>,
}

impl Task {
    /// Whether `result` is present exactly when the task is completed
    pub fn has_consistent_result(&self) -> bool {
        self.result.is_some() == (self.status == TaskStatus::Completed)
    }
}

/// Task lifecycle status
///
/// ```text
/// pending -> processing -> completed
///    |           \-------> failed
///    \-> completed | failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Terminal statuses have no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// Whether an observer may see `self` followed by `next`
    ///
    /// Staying in the same status is always allowed.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        if self == next {
            return true;
        }

        match self {
            TaskStatus::Pending => true,
            TaskStatus::Processing => next.is_terminal(),
            TaskStatus::Completed | TaskStatus::Failed => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
