//! Data-integrity findings
//!
//! The store mirrors whatever the backend reports. Observations that break
//! the task state machine are recorded here instead of being rejected.

use taskwatch_core::domain::task::{TaskId, TaskStatus};

/// Maximum number of findings retained; older ones are dropped first
pub(crate) const MAX_RETAINED_VIOLATIONS: usize = 256;

/// A backend observation that contradicts the task lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// A status change the lifecycle does not allow, e.g. leaving a terminal state
    BackwardTransition {
        id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },
    /// `result` present on a non-completed task, or missing on a completed one
    ResultMismatch { id: TaskId, status: TaskStatus },
}

impl IntegrityViolation {
    pub fn task_id(&self) -> TaskId {
        match self {
            Self::BackwardTransition { id, .. } | Self::ResultMismatch { id, .. } => *id,
        }
    }
}

impl std::fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BackwardTransition { id, from, to } => {
                write!(f, "task {} moved backwards from {} to {}", id, from, to)
            }
            Self::ResultMismatch { id, status } => {
                write!(f, "task {} has a result inconsistent with status {}", id, status)
            }
        }
    }
}
