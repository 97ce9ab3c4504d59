//! One-shot task commands

use anyhow::{Context, Result};
use colored::*;
use taskwatch_monitor::MonitorConfig;

use crate::render;

/// Submit a single task and print the acknowledgment
pub async fn submit(config: &MonitorConfig, input: &str) -> Result<()> {
    let client = config.build_client()?;

    let task = client
        .create_task(input)
        .await
        .context("Failed to submit task")?;

    println!("{} Task {} submitted", "✓".green(), task.id.to_string().cyan());
    render::print_task(&task);

    Ok(())
}

/// List all tasks
pub async fn list(config: &MonitorConfig) -> Result<()> {
    let client = config.build_client()?;

    let tasks = client.list_tasks().await.context("Failed to fetch tasks")?;

    if tasks.is_empty() {
        println!("{}", "No tasks submitted yet".yellow());
    } else {
        println!("{}", format!("Found {} task(s):", tasks.len()).bold());
        println!();
        for task in &tasks {
            render::print_task(task);
        }
    }

    Ok(())
}
