//! Reconciliation store
//!
//! Holds the last-known task collection and worker count. Incoming snapshots
//! are merged on task id; subscribers are notified through a watch channel
//! only when something they can see actually changed.
//!
//! The store is owned by exactly one control loop and is never shared, so it
//! needs no interior locking.

mod audit;
mod snapshot;

pub use audit::IntegrityViolation;
pub use snapshot::{StoreSnapshot, WorkerChannel};

use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::IndexMap;
use taskwatch_core::domain::task::{Task, TaskId};
use tokio::sync::watch;
use tracing::{debug, warn};

use audit::MAX_RETAINED_VIOLATIONS;

/// Client-side mirror of backend task and worker state
pub struct ReconciliationStore {
    /// Tasks keyed by id, in display order
    tasks: IndexMap<TaskId, Arc<Task>>,
    tasks_loaded: bool,
    worker_count: Option<u32>,
    worker_channel: WorkerChannel,
    revision: u64,
    violations: VecDeque<IntegrityViolation>,
    publisher: watch::Sender<StoreSnapshot>,
}

impl ReconciliationStore {
    /// Creates an empty store with the worker channel in `Connecting`
    pub fn new() -> Self {
        let (publisher, _) = watch::channel(StoreSnapshot::default());
        Self {
            tasks: IndexMap::new(),
            tasks_loaded: false,
            worker_count: None,
            worker_channel: WorkerChannel::Connecting,
            revision: 0,
            violations: VecDeque::new(),
            publisher,
        }
    }

    /// Returns a receiver that is marked changed whenever the store publishes
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.publisher.subscribe()
    }

    /// Replaces the task collection with `tasks`
    ///
    /// Tasks equal to the held value keep their existing `Arc`. Tasks missing
    /// from `tasks` are dropped. Display order follows `tasks`.
    ///
    /// # Returns
    /// Whether subscribers were notified
    pub fn apply_task_snapshot(&mut self, tasks: Vec<Task>) -> bool {
        let mut next: IndexMap<TaskId, Arc<Task>> = IndexMap::with_capacity(tasks.len());

        for task in tasks {
            let entry = match self.tasks.get(&task.id).cloned() {
                Some(held) if *held == task => held,
                Some(held) => {
                    if !held.status.can_transition_to(task.status) {
                        self.record(IntegrityViolation::BackwardTransition {
                            id: task.id,
                            from: held.status,
                            to: task.status,
                        });
                    }
                    self.check_result(&task);
                    Arc::new(task)
                }
                None => {
                    self.check_result(&task);
                    Arc::new(task)
                }
            };

            if let Some(duplicate) = next.insert(entry.id, entry) {
                warn!("Snapshot contains task {} more than once; keeping the last entry", duplicate.id);
            }
        }

        let removed = self.tasks.keys().filter(|id| !next.contains_key(*id)).count();
        if removed > 0 {
            debug!("{} task(s) no longer reported by the backend", removed);
        }

        // Ordered, by value: a duplicate id that settles back on the held task is no change
        let changed = !self.tasks_loaded || !self.tasks.iter().eq(next.iter());

        self.tasks = next;
        self.tasks_loaded = true;

        if changed {
            self.publish();
        }
        changed
    }

    /// Records a successful worker-count fetch and marks the channel reachable
    pub fn apply_worker_count(&mut self, count: u32) -> bool {
        let changed =
            self.worker_channel != WorkerChannel::Reachable || self.worker_count != Some(count);

        self.worker_count = Some(count);
        self.worker_channel = WorkerChannel::Reachable;

        if changed {
            self.publish();
        }
        changed
    }

    /// Flags the worker channel offline, keeping the last known count
    pub fn mark_worker_channel_offline(&mut self) -> bool {
        self.set_worker_channel(WorkerChannel::Offline)
    }

    /// Puts the worker channel back into its initial `Connecting` state
    pub fn mark_worker_channel_connecting(&mut self) -> bool {
        self.set_worker_channel(WorkerChannel::Connecting)
    }

    /// Tasks in display order
    pub fn tasks(&self) -> impl Iterator<Item = &Arc<Task>> {
        self.tasks.values()
    }

    pub fn task(&self, id: TaskId) -> Option<&Arc<Task>> {
        self.tasks.get(&id)
    }

    pub fn tasks_loaded(&self) -> bool {
        self.tasks_loaded
    }

    pub fn worker_count(&self) -> Option<u32> {
        self.worker_count
    }

    pub fn worker_channel(&self) -> WorkerChannel {
        self.worker_channel
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Integrity findings, oldest first
    pub fn violations(&self) -> impl Iterator<Item = &IntegrityViolation> {
        self.violations.iter()
    }

    /// Builds the subscriber-facing view of the current state
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            tasks: self.tasks.values().cloned().collect(),
            tasks_loaded: self.tasks_loaded,
            worker_count: self.worker_count,
            worker_channel: self.worker_channel,
            revision: self.revision,
        }
    }

    fn set_worker_channel(&mut self, channel: WorkerChannel) -> bool {
        if self.worker_channel == channel {
            return false;
        }

        self.worker_channel = channel;
        self.publish();
        true
    }

    fn check_result(&mut self, task: &Task) {
        if !task.has_consistent_result() {
            self.record(IntegrityViolation::ResultMismatch {
                id: task.id,
                status: task.status,
            });
        }
    }

    fn record(&mut self, violation: IntegrityViolation) {
        warn!("Data integrity violation: {}", violation);

        if self.violations.len() == MAX_RETAINED_VIOLATIONS {
            self.violations.pop_front();
        }
        self.violations.push_back(violation);
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.publisher.send_replace(self.snapshot());
    }
}

impl Default for ReconciliationStore {
    fn default() -> Self {
        Self::new()
    }
}
