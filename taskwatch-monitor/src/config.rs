//! Monitor configuration
//!
//! Defines the backend location, poll cadences and request timeout. Every
//! value can be tuned through environment variables.

use std::time::Duration;

use anyhow::Context;
use taskwatch_client::BackendClient;

use crate::scheduler::PollIntervals;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub backend_url: String,

    /// How often the task list is refreshed
    pub task_poll_interval: Duration,

    /// How often the worker count is refreshed
    pub worker_poll_interval: Duration,

    /// Upper bound on a single backend request
    pub request_timeout: Duration,

    /// How long a user-visible notification stays up
    pub notification_duration: Duration,
}

impl MonitorConfig {
    /// Creates a new configuration with default cadences
    pub fn new(backend_url: String) -> Self {
        Self {
            backend_url,
            task_poll_interval: Duration::from_millis(2000),
            worker_poll_interval: Duration::from_millis(5000),
            request_timeout: Duration::from_secs(10),
            notification_duration: Duration::from_millis(3000),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised variables (all optional):
    /// - TASKWATCH_BACKEND_URL (default: http://localhost:8000)
    /// - TASKWATCH_TASK_POLL_INTERVAL_MS (default: 2000)
    /// - TASKWATCH_WORKER_POLL_INTERVAL_MS (default: 5000)
    /// - TASKWATCH_REQUEST_TIMEOUT_MS (default: 10000)
    /// - TASKWATCH_NOTIFICATION_DURATION_MS (default: 3000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new(
            lookup("TASKWATCH_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        );

        let millis = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };

        Self {
            task_poll_interval: millis("TASKWATCH_TASK_POLL_INTERVAL_MS", defaults.task_poll_interval),
            worker_poll_interval: millis(
                "TASKWATCH_WORKER_POLL_INTERVAL_MS",
                defaults.worker_poll_interval,
            ),
            request_timeout: millis("TASKWATCH_REQUEST_TIMEOUT_MS", defaults.request_timeout),
            notification_duration: millis(
                "TASKWATCH_NOTIFICATION_DURATION_MS",
                defaults.notification_duration,
            ),
            ..defaults
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backend_url.is_empty() {
            anyhow::bail!("backend_url cannot be empty");
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            anyhow::bail!("backend_url must start with http:// or https://");
        }

        if self.task_poll_interval.is_zero() {
            anyhow::bail!("task_poll_interval must be greater than 0");
        }

        if self.worker_poll_interval.is_zero() {
            anyhow::bail!("worker_poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Poll cadences for the scheduler
    pub fn poll_intervals(&self) -> PollIntervals {
        PollIntervals {
            tasks: self.task_poll_interval,
            workers: self.worker_poll_interval,
        }
    }

    /// Builds the HTTP client used by every channel
    pub fn build_client(&self) -> anyhow::Result<BackendClient> {
        BackendClient::with_timeout(self.backend_url.clone(), self.request_timeout)
            .context("Failed to build HTTP client")
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL.to_string())
    }
}
