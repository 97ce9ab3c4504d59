//! Subscriber-facing view of the store

use std::sync::Arc;

use taskwatch_core::domain::task::Task;

use crate::view::WorkerStatus;

/// Connectivity of the worker-count channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerChannel {
    /// No worker-count fetch has resolved yet
    #[default]
    Connecting,
    /// The most recent worker-count fetch failed
    Offline,
    /// The most recent worker-count fetch succeeded
    Reachable,
}

/// Immutable state published to subscribers on every change
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// Tasks in display order
    pub tasks: Vec<Arc<Task>>,
    /// False until the first task list has been applied
    pub tasks_loaded: bool,
    /// Last successfully fetched worker count, kept across outages
    pub worker_count: Option<u32>,
    pub worker_channel: WorkerChannel,
    /// Incremented on every published change
    pub revision: u64,
}

impl StoreSnapshot {
    /// Derived worker badge
    pub fn worker_status(&self) -> WorkerStatus {
        WorkerStatus::derive(self.worker_channel, self.worker_count)
    }
}
