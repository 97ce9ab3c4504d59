//! Taskwatch Monitor
//!
//! Client-side state reconciliation for the task backend.
//!
//! Architecture:
//! - Configuration: backend URL and poll cadences from the environment
//! - Store: last-known tasks and worker count, change-suppressed publishing
//! - Scheduler: independent poll channels feeding the store
//! - Submission: task creation followed by an out-of-cycle refresh
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskwatch_monitor::{Monitor, MonitorConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = MonitorConfig::from_env();
//! config.validate()?;
//!
//! let monitor = Monitor::from_config(&config, Arc::new(config.build_client()?));
//! let mut changes = monitor.subscribe();
//! let handle = monitor.handle();
//! let running = tokio::spawn(monitor.run());
//!
//! changes.changed().await?;
//! println!("{}", changes.borrow().worker_status());
//!
//! handle.stop();
//! running.await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod notification;
pub mod scheduler;
pub mod store;
pub mod submission;
pub mod view;

pub use config::MonitorConfig;
pub use notification::{Notification, NotificationLevel};
pub use scheduler::{Monitor, MonitorHandle, PollIntervals};
pub use store::{IntegrityViolation, ReconciliationStore, StoreSnapshot, WorkerChannel};
pub use submission::{SubmissionPipeline, TaskDraft};
pub use view::{BadgeTone, StatusTone, WorkerStatus};
