//! Submission pipeline
//!
//! Posts new tasks to the backend. Nothing is inserted into the store
//! speculatively: a successful submission only invalidates the task list so
//! the new task shows up through the regular polling path.

use std::sync::Arc;
use std::time::Duration;

use taskwatch_client::{Backend, TransportError};
use taskwatch_core::domain::task::Task;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::notification::{DEFAULT_NOTIFICATION_DURATION, Notification};
use crate::scheduler::MonitorHandle;

/// The user's pending input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    input: String,
}

impl TaskDraft {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }
}

/// Command path for creating tasks
///
/// `submit` takes `&mut self`, so one pipeline never has two submissions in
/// flight.
pub struct SubmissionPipeline {
    backend: Arc<dyn Backend>,
    monitor: MonitorHandle,
    notifications: mpsc::UnboundedSender<Notification>,
    notification_duration: Duration,
}

impl SubmissionPipeline {
    pub fn new(
        backend: Arc<dyn Backend>,
        monitor: MonitorHandle,
        notifications: mpsc::UnboundedSender<Notification>,
    ) -> Self {
        Self {
            backend,
            monitor,
            notifications,
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    /// Overrides how long emitted notifications stay visible
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    /// Submits the draft's input as a new task
    ///
    /// On success the draft is cleared, a success notification is emitted and
    /// the task list is refreshed out of cycle. On failure an error
    /// notification is emitted and the draft is left untouched so the same
    /// payload can be resubmitted. There is no automatic retry.
    pub async fn submit(&mut self, draft: &mut TaskDraft) -> Result<Task, TransportError> {
        match self.backend.submit_task(draft.input()).await {
            Ok(task) => {
                info!("Submitted task {}", task.id);

                draft.clear();
                self.notify(Notification::success("Task submitted", self.notification_duration));

                if !self.monitor.refresh_tasks() {
                    warn!("Monitor is stopped; task {} will not be picked up", task.id);
                }
                Ok(task)
            }
            Err(e) => {
                warn!("Task submission failed: {}", e);
                self.notify(Notification::error(
                    "Task submission failed",
                    e.to_string(),
                    self.notification_duration,
                ));
                Err(e)
            }
        }
    }

    fn notify(&self, notification: Notification) {
        // No receiver means nobody is displaying notifications
        let _ = self.notifications.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_editing() {
        let mut draft = TaskDraft::default();
        assert_eq!(draft.input(), "");

        draft.set_input("hello");
        assert_eq!(draft.input(), "hello");

        draft.clear();
        assert_eq!(draft, TaskDraft::new(""));
    }
}
