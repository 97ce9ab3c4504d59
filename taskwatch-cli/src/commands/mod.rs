//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod task;
mod watch;
mod worker;

use anyhow::Result;
use clap::Subcommand;
use taskwatch_monitor::MonitorConfig;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Live dashboard; type a line to submit it as a task
    Watch {
        /// Task list poll interval in milliseconds
        #[arg(long)]
        task_interval_ms: Option<u64>,

        /// Worker count poll interval in milliseconds
        #[arg(long)]
        worker_interval_ms: Option<u64>,
    },
    /// Submit a single task
    Submit {
        /// Payload handed to the worker
        input: String,
    },
    /// List tasks once
    Tasks,
    /// Show the active worker count once
    Workers,
}

/// Handle a CLI command
///
/// Validates the configuration, then routes the command to its handler.
pub async fn handle_command(command: Commands, mut config: MonitorConfig) -> Result<()> {
    if let Commands::Watch {
        task_interval_ms,
        worker_interval_ms,
    } = &command
    {
        if let Some(ms) = task_interval_ms {
            config.task_poll_interval = std::time::Duration::from_millis(*ms);
        }
        if let Some(ms) = worker_interval_ms {
            config.worker_poll_interval = std::time::Duration::from_millis(*ms);
        }
    }

    config.validate()?;

    match command {
        Commands::Watch { .. } => watch::run(&config).await,
        Commands::Submit { input } => task::submit(&config, &input).await,
        Commands::Tasks => task::list(&config).await,
        Commands::Workers => worker::show_count(&config).await,
    }
}
