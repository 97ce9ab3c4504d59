//! Remote control for a running monitor

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Requests the control loop accepts from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Fetch the task list now instead of waiting for the next tick
    RefreshTasks,
    /// Ignore ticks until resumed; the store is kept as is
    Pause,
    /// Poll both channels now and continue on their cadences
    Resume,
}

/// Cloneable handle used to invalidate, pause, or stop a [`Monitor`](super::Monitor)
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    commands: mpsc::UnboundedSender<Command>,
    shutdown: CancellationToken,
}

impl MonitorHandle {
    pub(crate) fn new(commands: mpsc::UnboundedSender<Command>, shutdown: CancellationToken) -> Self {
        Self { commands, shutdown }
    }

    /// Marks the task list stale and asks for an out-of-cycle fetch
    ///
    /// # Returns
    /// False when the monitor is no longer running
    pub fn refresh_tasks(&self) -> bool {
        self.send(Command::RefreshTasks)
    }

    /// Suspends polling without discarding the store
    ///
    /// Fetches already in flight still land. A refresh requested while paused
    /// runs on resume.
    ///
    /// # Returns
    /// False when the monitor is no longer running
    pub fn pause(&self) -> bool {
        self.send(Command::Pause)
    }

    /// Resumes polling after [`pause`](Self::pause), fetching both channels at once
    ///
    /// # Returns
    /// False when the monitor is no longer running
    pub fn resume(&self) -> bool {
        self.send(Command::Resume)
    }

    /// Stops future ticks; requests already in flight finish but are not applied
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn send(&self, command: Command) -> bool {
        if self.shutdown.is_cancelled() {
            debug!("Ignoring {:?} for a stopped monitor", command);
            return false;
        }
        self.commands.send(command).is_ok()
    }
}
