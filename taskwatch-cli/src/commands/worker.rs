//! One-shot worker command

use anyhow::Result;
use taskwatch_monitor::{MonitorConfig, WorkerChannel, WorkerStatus};

use crate::render;

/// Print the worker badge for a single fetch
pub async fn show_count(config: &MonitorConfig) -> Result<()> {
    let client = config.build_client()?;

    match client.worker_count().await {
        Ok(count) => {
            render::print_worker_status(WorkerStatus::derive(WorkerChannel::Reachable, Some(count)));
            Ok(())
        }
        Err(e) => {
            render::print_worker_status(WorkerStatus::Offline);
            Err(e.into())
        }
    }
}
