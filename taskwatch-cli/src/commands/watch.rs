//! Live dashboard
//!
//! Runs the monitor, reprints the dashboard whenever the store publishes, and
//! turns stdin lines into submissions. Submissions run on their own task so a
//! slow POST never holds up redraws or Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use taskwatch_client::Backend;
use taskwatch_monitor::{Monitor, MonitorConfig, SubmissionPipeline, TaskDraft, notification};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::render;

const QUIT: &str = "/quit";
const RETRY: &str = "/retry";
const PAUSE: &str = "/pause";
const RESUME: &str = "/resume";

/// What the submitter task should post next
#[derive(Debug, Clone, PartialEq, Eq)]
enum Submission {
    /// Replace the draft with a new payload and submit it
    Input(String),
    /// Resubmit the retained draft
    Retry,
}

/// Run the dashboard until `/quit`, Ctrl-C, or the monitor goes away
pub async fn run(config: &MonitorConfig) -> Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(config.build_client()?);

    let monitor = Monitor::from_config(config, Arc::clone(&backend));
    let mut changes = monitor.subscribe();
    let handle = monitor.handle();
    let running = tokio::spawn(monitor.run());

    info!("Watching {}", config.backend_url);

    let (tx, mut notifications) = notification::channel();
    let pipeline = SubmissionPipeline::new(backend, handle.clone(), tx)
        .with_notification_duration(config.notification_duration);
    let (submissions, queued) = mpsc::unbounded_channel();
    let submitter = tokio::spawn(submit_loop(pipeline, queued));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    render::print_dashboard(&changes.borrow_and_update());
    print_usage();

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = changes.borrow_and_update().clone();
                render::print_dashboard(&snapshot);
            }
            Some(shown) = notifications.recv() => render::print_notification(&shown),
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    // Keep watching without input
                    stdin_open = false;
                    continue;
                };

                let submission = match line.trim() {
                    QUIT => break,
                    PAUSE => {
                        handle.pause();
                        println!("{}", "Polling paused".yellow());
                        continue;
                    }
                    RESUME => {
                        handle.resume();
                        continue;
                    }
                    RETRY => Submission::Retry,
                    _ => Submission::Input(line),
                };

                if submissions.send(submission).is_err() {
                    warn!("Submitter stopped; input dropped");
                }
            }
        }
    }

    // A pending POST is abandoned rather than awaited
    submitter.abort();

    handle.stop();
    let store = running.await.context("Monitor task failed")?;

    let violations = store.violations().count();
    if violations > 0 {
        warn!("Observed {} data integrity violation(s) during this session", violations);
    }

    Ok(())
}

/// Submits queued inputs one at a time, keeping the draft between attempts
///
/// # Returns
/// The draft as it stood when the queue closed
async fn submit_loop(
    mut pipeline: SubmissionPipeline,
    mut queued: mpsc::UnboundedReceiver<Submission>,
) -> TaskDraft {
    let mut draft = TaskDraft::default();

    while let Some(submission) = queued.recv().await {
        match submission {
            Submission::Input(input) => draft.set_input(input),
            Submission::Retry if draft.input().is_empty() => {
                println!("{}", "Nothing to retry".yellow());
                continue;
            }
            Submission::Retry => {}
        }

        // Errors are already surfaced as notifications
        let _ = pipeline.submit(&mut draft).await;
    }

    draft
}

fn print_usage() {
    println!(
        "{}",
        format!(
            "Type a line to submit it as a task. {} resubmits a failed payload, {}/{} toggle polling, {} exits.",
            RETRY, PAUSE, RESUME, QUIT
        )
        .dimmed()
    );
}
