//! Taskwatch HTTP Client
//!
//! A small, type-safe HTTP client for the task backend. It is stateless: every
//! call is a single request with no retries, and every failure collapses into
//! [`TransportError`].
//!
//! # Example
//!
//! ```no_run
//! use taskwatch_client::BackendClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BackendClient::new("http://localhost:8000");
//!
//!     for task in client.list_tasks().await? {
//!         println!("{} {}", task.id, task.status);
//!     }
//!     println!("{} worker(s) online", client.worker_count().await?);
//!     Ok(())
//! }
//! ```

mod backend;
pub mod error;
mod tasks;
mod workers;

pub use backend::Backend;
pub use error::{Result, TransportError};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the task backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    ///
    /// # Example
    /// ```
    /// use taskwatch_client::BackendClient;
    ///
    /// let client = BackendClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a backend client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!("Backend returned {}: {}", status, error_text);
            return Err(TransportError::server_error(status.as_u16(), error_text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| TransportError::MalformedResponse(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use taskwatch_core::domain::task::TaskStatus;

    fn task_json(id: i64, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "input_data": "hello",
            "status": status,
            "result": null,
            "created_at": "2024-03-01T12:00:00.000001",
            "updated_at": "2024-03-01T12:00:00.000001",
            "worker_id": null
        })
    }

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = BackendClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_with_timeout() {
        let client = BackendClient::with_timeout("http://localhost:8000", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_list_tasks() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([task_json(2, "processing"), task_json(1, "pending")]).to_string())
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let tasks = client.list_tasks().await.unwrap();

        mock.assert_async().await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 2);
        assert_eq!(tasks[0].status, TaskStatus::Processing);
    }

    #[tokio::test]
    async fn test_create_task_posts_input_data() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tasks")
            .match_body(Matcher::Json(json!({"input_data": "hello"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(task_json(1, "pending").to_string())
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let task = client.create_task("hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(task.id, 1);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_task_allows_empty_input() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tasks")
            .match_body(Matcher::Json(json!({"input_data": ""})))
            .with_status(200)
            .with_body(task_json(3, "pending").to_string())
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        assert!(client.create_task("").await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_worker_count() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/workers/count")
            .with_status(200)
            .with_body(r#"{"count": 3}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        assert_eq!(client.worker_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_non_success_status_is_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/workers/count")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let err = client.worker_count().await.unwrap_err();
        assert!(err.is_server_error());
        assert!(err.to_string().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_malformed_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(r#"{"tasks": []}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let err = client.list_tasks().await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_unreachable() {
        let client = BackendClient::new("http://127.0.0.1:1");
        let err = client.list_tasks().await.unwrap_err();
        assert!(matches!(err, TransportError::NetworkUnreachable(_)));
    }

    #[tokio::test]
    async fn test_backend_trait_delegates_to_client() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/workers/count")
            .with_status(200)
            .with_body(r#"{"count": 0}"#)
            .create_async()
            .await;

        let backend: std::sync::Arc<dyn Backend> = std::sync::Arc::new(BackendClient::new(server.url()));
        assert_eq!(backend.fetch_worker_count().await.unwrap(), 0);
    }
}
