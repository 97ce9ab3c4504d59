//! Derived display fields
//!
//! Nothing here is stored; every value is computed from store state on demand.

use taskwatch_core::domain::task::TaskStatus;

use crate::store::WorkerChannel;

/// Progress bar position for a task status
///
/// Completed and failed share 100; [`StatusTone`] tells them apart.
pub fn progress(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::Pending => 0,
        TaskStatus::Processing => 50,
        TaskStatus::Completed | TaskStatus::Failed => 100,
    }
}

/// Colour family for a task card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Active,
    Success,
    Danger,
}

impl From<TaskStatus> for StatusTone {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => StatusTone::Neutral,
            TaskStatus::Processing => StatusTone::Active,
            TaskStatus::Completed => StatusTone::Success,
            TaskStatus::Failed => StatusTone::Danger,
        }
    }
}

/// Worker badge shown next to the title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    Connecting,
    Offline,
    /// At least one worker is active
    Active(u32),
    /// The backend is reachable but reports no workers
    Idle,
}

/// Colour family for the worker badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Gray,
    Red,
    Green,
    Yellow,
}

impl WorkerStatus {
    /// Derives the badge from channel connectivity and the last known count
    ///
    /// An offline channel hides the retained count.
    pub fn derive(channel: WorkerChannel, count: Option<u32>) -> Self {
        match (channel, count) {
            (WorkerChannel::Connecting, _) => WorkerStatus::Connecting,
            (WorkerChannel::Offline, _) => WorkerStatus::Offline,
            (WorkerChannel::Reachable, Some(n)) if n > 0 => WorkerStatus::Active(n),
            (WorkerChannel::Reachable, _) => WorkerStatus::Idle,
        }
    }

    pub fn label(&self) -> String {
        match self {
            WorkerStatus::Connecting => "Connecting...".to_string(),
            WorkerStatus::Offline => "Offline".to_string(),
            WorkerStatus::Active(1) => "1 worker".to_string(),
            WorkerStatus::Active(n) => format!("{} workers", n),
            WorkerStatus::Idle => "Idle".to_string(),
        }
    }

    pub fn tone(&self) -> BadgeTone {
        match self {
            WorkerStatus::Connecting => BadgeTone::Gray,
            WorkerStatus::Offline => BadgeTone::Red,
            WorkerStatus::Active(_) => BadgeTone::Green,
            WorkerStatus::Idle => BadgeTone::Yellow,
        }
    }
}

impl std::fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_values() {
        assert_eq!(progress(TaskStatus::Pending), 0);
        assert_eq!(progress(TaskStatus::Processing), 50);
        assert_eq!(progress(TaskStatus::Completed), 100);
        assert_eq!(progress(TaskStatus::Failed), 100);
    }

    #[test]
    fn test_failed_differs_from_completed_by_tone() {
        assert_ne!(
            StatusTone::from(TaskStatus::Failed),
            StatusTone::from(TaskStatus::Completed)
        );
    }

    #[test]
    fn test_worker_labels() {
        assert_eq!(WorkerStatus::derive(WorkerChannel::Connecting, None).label(), "Connecting...");
        assert_eq!(WorkerStatus::derive(WorkerChannel::Offline, Some(3)).label(), "Offline");
        assert_eq!(WorkerStatus::derive(WorkerChannel::Reachable, Some(1)).label(), "1 worker");
        assert_eq!(WorkerStatus::derive(WorkerChannel::Reachable, Some(3)).label(), "3 workers");
        assert_eq!(WorkerStatus::derive(WorkerChannel::Reachable, Some(0)).label(), "Idle");
    }

    #[test]
    fn test_worker_tones() {
        assert_eq!(WorkerStatus::Connecting.tone(), BadgeTone::Gray);
        assert_eq!(WorkerStatus::Offline.tone(), BadgeTone::Red);
        assert_eq!(WorkerStatus::Active(2).tone(), BadgeTone::Green);
        assert_eq!(WorkerStatus::Idle.tone(), BadgeTone::Yellow);
    }
}
