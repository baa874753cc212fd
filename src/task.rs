use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::{Datelike, Local};

pub const PENDING: &str = "[ ]";
pub const DONE: &str = "[✔]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
	pub text: String,
	pub done: bool,
}

impl Task {
	pub fn pending(text: impl Into<String>) -> Self {
		Task { text: text.into(), done: false }
	}

	pub fn marker(&self) -> &'static str {
		if self.done { DONE } else { PENDING }
	}

	/// Storage and display form: marker, one space, text.
	pub fn display(&self) -> String {
		format!("{} {}", self.marker(), self.text)
	}

	/// Parses `<marker> <text>`. Returns `None` for anything else, including empty text.
	pub fn parse(line: &str) -> Option<Task> {
		let (done, rest) = if let Some(rest) = line.strip_prefix(PENDING) {
			(false, rest)
		} else if let Some(rest) = line.strip_prefix(DONE) {
			(true, rest)
		} else {
			return None;
		};
		let text = rest.strip_prefix(' ')?.trim();
		if text.is_empty() {
			return None;
		}
		Some(Task { text: text.to_string(), done })
	}
}

impl fmt::Display for Task {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.marker(), self.text)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
	Monday,
	Tuesday,
	Wednesday,
	Thursday,
	Friday,
}

impl Weekday {
	pub const ALL: [Weekday; 5] = [
		Weekday::Monday,
		Weekday::Tuesday,
		Weekday::Wednesday,
		Weekday::Thursday,
		Weekday::Friday,
	];

	pub fn name(self) -> &'static str {
		match self {
			Weekday::Monday => "Monday",
			Weekday::Tuesday => "Tuesday",
			Weekday::Wednesday => "Wednesday",
			Weekday::Thursday => "Thursday",
			Weekday::Friday => "Friday",
		}
	}

	pub fn index(self) -> usize {
		self as usize
	}

	/// Exact, case-sensitive match used by the file format.
	pub fn from_name(name: &str) -> Option<Weekday> {
		Weekday::ALL.into_iter().find(|d| d.name() == name)
	}

	/// Today's weekday, or Monday on weekends.
	pub fn today() -> Weekday {
		let n = Local::now().date_naive().weekday().num_days_from_monday() as usize;
		Weekday::ALL.get(n).copied().unwrap_or(Weekday::Monday)
	}
}

impl fmt::Display for Weekday {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

// Lenient parsing for user input: any case, full name or 3-letter abbreviation.
impl FromStr for Weekday {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> anyhow::Result<Self> {
		let s = s.trim().to_lowercase();
		if s.len() >= 3 {
			for d in Weekday::ALL {
				let full = d.name().to_lowercase();
				if full == s || (s.len() == 3 && full.starts_with(&s)) {
					return Ok(d);
				}
			}
		}
		bail!("invalid day: {} (expected Monday to Friday)", s)
	}
}

/// Weekly line: `<Day>|<marker> <text>`, split at the first `|`.
pub fn parse_weekly_line(line: &str) -> Option<(Weekday, Task)> {
	let (day, payload) = line.split_once('|')?;
	let day = Weekday::from_name(day)?;
	let task = Task::parse(payload)?;
	Some((day, task))
}

pub fn format_weekly_line(day: Weekday, task: &Task) -> String {
	format!("{}|{}", day.name(), task.display())
}
