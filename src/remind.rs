use std::process::Command;

use tracing::{debug, warn};

use crate::store::Week;
use crate::task::Task;

pub const TITLE: &str = "Pending Tasks Reminder";
pub const TIMEOUT_SECS: u32 = 10;
pub const MAX_ENTRIES: usize = 3;

/// Fire-and-forget delivery of a desktop notification.
pub trait Notifier {
	fn notify(&self, title: &str, message: &str, timeout_secs: u32);
}

/// Uses `notify-send` when it is on `PATH`, stdout otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
	fn notify(&self, title: &str, message: &str, timeout_secs: u32) {
		if which::which("notify-send").is_ok() {
			let status = Command::new("notify-send")
				.arg("-t")
				.arg((timeout_secs * 1000).to_string())
				.arg(title)
				.arg(message)
				.status();
			match status {
				Ok(s) if s.success() => {}
				Ok(s) => warn!(%s, "notify-send exited unsuccessfully"),
				Err(e) => warn!(error = %e, "failed to run notify-send"),
			}
		} else {
			println!("{}: {}", title, message);
		}
	}
}

pub fn pending_summary_flat(tasks: &[Task]) -> Option<String> {
	let entries: Vec<String> = tasks.iter().filter(|t| !t.done).take(MAX_ENTRIES).map(Task::display).collect();
	if entries.is_empty() { None } else { Some(entries.join("\n")) }
}

pub fn pending_summary_weekly(week: &Week) -> Option<String> {
	let entries: Vec<String> = week
		.iter()
		.flat_map(|(day, tasks)| tasks.iter().filter(|t| !t.done).map(move |t| format!("{}: {}", day, t.display())))
		.take(MAX_ENTRIES)
		.collect();
	if entries.is_empty() { None } else { Some(entries.join("\n")) }
}

/// Sends one reminder for up to three pending tasks. Returns whether anything was sent.
pub fn notify_pending(notifier: &dyn Notifier, summary: Option<String>) -> bool {
	match summary {
		Some(message) => {
			debug!(message = %message, "sending reminder");
			notifier.notify(TITLE, &message, TIMEOUT_SECS);
			true
		}
		None => {
			debug!("nothing pending, no reminder");
			false
		}
	}
}
