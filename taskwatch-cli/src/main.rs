//! Taskwatch CLI
//!
//! Terminal front-end for the task backend: a live dashboard plus one-shot
//! commands for submitting and inspecting tasks.

mod commands;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use taskwatch_monitor::MonitorConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "taskwatch")]
#[command(about = "Distributed task processing monitor", long_about = None)]
struct Cli {
    /// Task backend URL
    #[arg(long, env = "TASKWATCH_BACKEND_URL", default_value = "http://localhost:8000")]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the dashboard on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskwatch_cli=info,taskwatch_monitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = MonitorConfig::from_env();
    config.backend_url = cli.backend_url;

    handle_command(cli.command, config).await
}
