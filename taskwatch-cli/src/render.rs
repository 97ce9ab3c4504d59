//! Terminal rendering of store state

use colored::*;
use taskwatch_core::domain::task::Task;
use taskwatch_monitor::view::progress;
use taskwatch_monitor::{
    BadgeTone, Notification, NotificationLevel, StatusTone, StoreSnapshot, WorkerStatus,
};

const BAR_WIDTH: usize = 20;

/// Print the whole dashboard: header badge and task cards
pub fn print_dashboard(snapshot: &StoreSnapshot) {
    println!();
    println!(
        "{}  {}",
        "Distributed Processing System".bold(),
        badge(snapshot.worker_status())
    );
    println!("{}", "─".repeat(60).dimmed());

    if !snapshot.tasks_loaded {
        println!("{}", "Loading tasks...".dimmed());
    } else if snapshot.tasks.is_empty() {
        println!("{}", "No tasks submitted yet".dimmed());
    } else {
        for task in &snapshot.tasks {
            print_task(task);
        }
    }
}

/// Print one task card
pub fn print_task(task: &Task) {
    let percent = progress(task.status);

    println!("  {} Task ID: {}", "▸".cyan(), task.id.to_string().bold());
    println!("    Input:    {}", task.input_data);
    println!(
        "    Progress: {} {:>3}%",
        tint(&progress_bar(percent), StatusTone::from(task.status)),
        percent
    );
    println!(
        "    Status:   {}",
        tint(task.status.as_str(), StatusTone::from(task.status))
    );
    println!(
        "    Updated:  {}",
        task.updated_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
    if let Some(worker) = &task.worker_id {
        println!("    Worker:   {}", worker.dimmed());
    }
    if let Some(result) = &task.result {
        println!("    Result:   {}", result);
    }
    println!();
}

pub fn print_worker_status(status: WorkerStatus) {
    println!("{}", badge(status));
}

pub fn print_notification(notification: &Notification) {
    match notification.level {
        NotificationLevel::Success => println!("{} {}", "✓".green(), notification.title.green()),
        NotificationLevel::Error => {
            println!("{} {}", "✗".red(), notification.title.red());
            if let Some(detail) = &notification.detail {
                println!("  {}", detail.red());
            }
        }
    }
}

fn badge(status: WorkerStatus) -> ColoredString {
    let label = format!("[{}]", status.label());
    match status.tone() {
        BadgeTone::Gray => label.dimmed(),
        BadgeTone::Red => label.red(),
        BadgeTone::Green => label.green(),
        BadgeTone::Yellow => label.yellow(),
    }
}

fn tint(text: &str, tone: StatusTone) -> ColoredString {
    match tone {
        StatusTone::Neutral => text.dimmed(),
        StatusTone::Active => text.blue(),
        StatusTone::Success => text.green(),
        StatusTone::Danger => text.red(),
    }
}

/// Fixed-width bar for a 0-100 progress value
fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
