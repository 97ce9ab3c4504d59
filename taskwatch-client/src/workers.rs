//! Worker-related API endpoints

use crate::BackendClient;
use crate::error::Result;
use taskwatch_core::dto::worker::WorkerCountResponse;

impl BackendClient {
    /// Get the number of workers the backend currently considers active
    pub async fn worker_count(&self) -> Result<u32> {
        let url = format!("{}/workers/count", self.base_url);
        let response = self.client.get(&url).send().await?;

        let body: WorkerCountResponse = self.handle_response(response).await?;
        Ok(body.count)
    }
}
