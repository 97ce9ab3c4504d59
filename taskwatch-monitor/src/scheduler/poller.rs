//! Channel poller
//!
//! A single control loop owns the reconciliation store. Fetches are spawned
//! onto the runtime and report back over a channel, so store mutation only
//! ever happens inside the loop. Each channel has at most one fetch in flight;
//! a tick that finds its channel busy is skipped, not queued.

use std::sync::Arc;

use taskwatch_client::{Backend, Result as TransportResult};
use taskwatch_core::domain::task::Task;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::handle::{Command, MonitorHandle};
use crate::config::MonitorConfig;
use crate::store::{ReconciliationStore, StoreSnapshot};

/// Poll cadence for each channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub tasks: Duration,
    pub workers: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            tasks: Duration::from_secs(2),
            workers: Duration::from_secs(5),
        }
    }
}

/// Result of one spawned fetch
enum FetchOutcome {
    Tasks(TransportResult<Vec<Task>>),
    WorkerCount(TransportResult<u32>),
}

/// Poll-and-diff monitor for the task backend
pub struct Monitor {
    backend: Arc<dyn Backend>,
    intervals: PollIntervals,
    store: ReconciliationStore,
    commands_tx: mpsc::UnboundedSender<Command>,
    commands_rx: mpsc::UnboundedReceiver<Command>,
    shutdown: CancellationToken,
}

impl Monitor {
    /// Creates a monitor with an empty store
    ///
    /// # Panics
    /// [`run`](Self::run) panics if either interval is zero.
    pub fn new(backend: Arc<dyn Backend>, intervals: PollIntervals) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            intervals,
            store: ReconciliationStore::new(),
            commands_tx,
            commands_rx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Creates a monitor using the cadences from `config`
    pub fn from_config(config: &MonitorConfig, backend: Arc<dyn Backend>) -> Self {
        Self::new(backend, config.poll_intervals())
    }

    /// Subscribes to store changes
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.store.subscribe()
    }

    /// Returns a handle for refreshing, pausing, or stopping the monitor
    pub fn handle(&self) -> MonitorHandle {
        MonitorHandle::new(self.commands_tx.clone(), self.shutdown.clone())
    }

    /// Runs the polling loop until [`MonitorHandle::stop`] is called
    ///
    /// Both channels fetch immediately on start, then on their own cadence.
    ///
    /// # Returns
    /// The store as it stood when the monitor stopped
    pub async fn run(self) -> ReconciliationStore {
        let Monitor {
            backend,
            intervals,
            store,
            commands_tx: _commands_tx,
            mut commands_rx,
            shutdown,
        } = self;

        info!(
            "Starting monitor (task interval: {:?}, worker interval: {:?})",
            intervals.tasks, intervals.workers
        );

        let (outcomes_tx, mut outcomes_rx) = mpsc::unbounded_channel();
        let mut control = ControlLoop {
            backend,
            store,
            outcomes: outcomes_tx,
            tasks_in_flight: false,
            workers_in_flight: false,
            refresh_pending: false,
            paused: false,
        };

        let mut task_ticker = time::interval(intervals.tasks);
        task_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut worker_ticker = time::interval(intervals.workers);
        worker_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break,
                Some(outcome) = outcomes_rx.recv() => control.apply(outcome),
                Some(command) = commands_rx.recv() => match command {
                    Command::RefreshTasks => control.request_refresh(),
                    Command::Pause => control.pause(),
                    Command::Resume => {
                        if control.resume() {
                            task_ticker.reset_immediately();
                            worker_ticker.reset_immediately();
                        }
                    }
                },
                _ = task_ticker.tick() => control.poll_tasks(),
                _ = worker_ticker.tick() => control.poll_workers(),
            }
        }

        // Dropping the receiver discards any result still in flight
        drop(outcomes_rx);

        if control.tasks_in_flight || control.workers_in_flight {
            debug!("Discarding results of fetches still in flight");
        }
        info!("Monitor stopped");

        control.store
    }
}

/// Loop-local state: the store plus per-channel in-flight flags
struct ControlLoop {
    backend: Arc<dyn Backend>,
    store: ReconciliationStore,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
    tasks_in_flight: bool,
    workers_in_flight: bool,
    /// A refresh arrived while a task fetch was in flight or polling was paused
    refresh_pending: bool,
    paused: bool,
}

impl ControlLoop {
    fn pause(&mut self) {
        if !self.paused {
            info!("Pausing monitor");
            self.paused = true;
        }
    }

    /// Returns whether the monitor was paused
    fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        info!("Resuming monitor");
        self.paused = false;
        true
    }

    fn poll_tasks(&mut self) {
        if self.paused {
            return;
        }
        if self.tasks_in_flight {
            debug!("Task list fetch still in flight, skipping tick");
            return;
        }

        debug!("Fetching task list");
        self.tasks_in_flight = true;
        self.refresh_pending = false;

        let backend = Arc::clone(&self.backend);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = backend.fetch_tasks().await;
            let _ = outcomes.send(FetchOutcome::Tasks(result));
        });
    }

    fn poll_workers(&mut self) {
        if self.paused {
            return;
        }
        if self.workers_in_flight {
            debug!("Worker count fetch still in flight, skipping tick");
            return;
        }

        debug!("Fetching worker count");
        self.workers_in_flight = true;

        let backend = Arc::clone(&self.backend);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = backend.fetch_worker_count().await;
            let _ = outcomes.send(FetchOutcome::WorkerCount(result));
        });
    }

    /// Out-of-cycle task fetch
    ///
    /// A fetch already in flight may have been issued before the change being
    /// refreshed for, so a new one follows it once it resolves.
    fn request_refresh(&mut self) {
        if self.paused {
            debug!("Monitor paused, deferring refresh until resume");
            self.refresh_pending = true;
        } else if self.tasks_in_flight {
            debug!("Task list fetch in flight, deferring refresh");
            self.refresh_pending = true;
        } else {
            self.poll_tasks();
        }
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Tasks(result) => {
                self.tasks_in_flight = false;

                match result {
                    Ok(tasks) => {
                        let count = tasks.len();
                        if self.store.apply_task_snapshot(tasks) {
                            debug!("Task list changed ({} task(s))", count);
                        }
                    }
                    Err(e) => warn!("Failed to fetch tasks, keeping previous snapshot: {}", e),
                }

                if self.refresh_pending {
                    self.poll_tasks();
                }
            }
            FetchOutcome::WorkerCount(result) => {
                self.workers_in_flight = false;

                match result {
                    Ok(count) => {
                        self.store.apply_worker_count(count);
                    }
                    Err(e) => {
                        warn!("Failed to fetch worker count: {}", e);
                        self.store.mark_worker_channel_offline();
                    }
                }
            }
        }
    }
}
