//! Backend seam
//!
//! The monitor talks to the task backend only through this trait so that the
//! scheduler and submission pipeline can run against a scripted backend.

use async_trait::async_trait;
use taskwatch_core::domain::task::Task;

use crate::BackendClient;
use crate::error::Result;

/// The three calls the monitor makes against the task backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetches the full task list (`GET /tasks`)
    async fn fetch_tasks(&self) -> Result<Vec<Task>>;

    /// Fetches the active worker count (`GET /workers/count`)
    async fn fetch_worker_count(&self) -> Result<u32>;

    /// Submits a new task (`POST /tasks`)
    ///
    /// The payload is sent as-is; an empty string is allowed.
    async fn submit_task(&self, input: &str) -> Result<Task>;
}

#[async_trait]
impl Backend for BackendClient {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        self.list_tasks().await
    }

    async fn fetch_worker_count(&self) -> Result<u32> {
        self.worker_count().await
    }

    async fn submit_task(&self, input: &str) -> Result<Task> {
        self.create_task(input).await
    }
}
