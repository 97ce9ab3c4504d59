//! Task-related API endpoints

use crate::BackendClient;
use crate::error::Result;
use taskwatch_core::domain::task::Task;
use taskwatch_core::dto::task::CreateTask;

impl BackendClient {
    // =============================================================================
    // Tasks
    // =============================================================================

    /// List all tasks known to the backend
    ///
    /// # Returns
    /// The full task collection, newest first as ordered by the backend
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = format!("{}/tasks", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Create a new task
    ///
    /// # Arguments
    /// * `input` - Opaque payload handed to the worker (may be empty)
    ///
    /// # Returns
    /// The created task, normally in `pending` status
    ///
    /// # Example
    /// ```no_run
    /// # use taskwatch_client::BackendClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = BackendClient::new("http://localhost:8000");
    /// let task = client.create_task("hello").await?;
    /// println!("created task {}", task.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_task(&self, input: &str) -> Result<Task> {
        let url = format!("{}/tasks", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateTask {
                input_data: input.to_string(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }
}
