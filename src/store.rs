use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::task::{format_weekly_line, parse_weekly_line, Task, Weekday};

/// One ordered list per weekday, Monday first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Week {
	days: [Vec<Task>; 5],
}

impl Week {
	pub fn day(&self, day: Weekday) -> &[Task] {
		&self.days[day.index()]
	}

	pub fn day_mut(&mut self, day: Weekday) -> &mut Vec<Task> {
		&mut self.days[day.index()]
	}

	pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Task])> {
		Weekday::ALL.into_iter().map(move |d| (d, self.day(d)))
	}

	pub fn is_empty(&self) -> bool {
		self.days.iter().all(|d| d.is_empty())
	}
}

#[derive(Debug, Clone)]
pub struct FlatStore {
	path: PathBuf,
}

impl FlatStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		FlatStore { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn load(&self) -> Result<Vec<Task>> {
		let lines = read_file_lines(&self.path)?;
		let mut out = Vec::with_capacity(lines.len());
		for line in &lines {
			match Task::parse(line.trim()) {
				Some(t) => out.push(t),
				None => skipped(line),
			}
		}
		debug!(path = %self.path.display(), count = out.len(), "loaded tasks");
		Ok(out)
	}

	pub fn save(&self, tasks: &[Task]) -> Result<()> {
		let lines: Vec<String> = tasks.iter().map(Task::display).collect();
		write_file_lines(&self.path, &lines)?;
		debug!(path = %self.path.display(), count = lines.len(), "saved tasks");
		Ok(())
	}
}

#[derive(Debug, Clone)]
pub struct WeeklyStore {
	path: PathBuf,
}

impl WeeklyStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		WeeklyStore { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn load(&self) -> Result<Week> {
		let lines = read_file_lines(&self.path)?;
		let mut week = Week::default();
		for line in &lines {
			match parse_weekly_line(line.trim()) {
				Some((day, task)) => week.day_mut(day).push(task),
				None => skipped(line),
			}
		}
		debug!(path = %self.path.display(), "loaded week");
		Ok(week)
	}

	pub fn save(&self, week: &Week) -> Result<()> {
		let lines: Vec<String> = week
			.iter()
			.flat_map(|(day, tasks)| tasks.iter().map(move |t| format_weekly_line(day, t)))
			.collect();
		write_file_lines(&self.path, &lines)?;
		debug!(path = %self.path.display(), count = lines.len(), "saved week");
		Ok(())
	}
}

// Non-blank lines that fail to parse are gone after the next save.
fn skipped(line: &str) {
	if line.trim().is_empty() {
		debug!("skipping blank line");
	} else {
		warn!(line = %line, "skipping unrecognised line, it will be dropped on next save");
	}
}

fn read_file_lines(path: &Path) -> Result<Vec<String>> {
	match fs::read_to_string(path) {
		Ok(s) => Ok(s.lines().map(str::to_owned).collect()),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
		Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
	}
}

// Whole-file rewrite through a sibling temp file so readers never see a partial write.
fn write_file_lines(path: &Path, lines: &[String]) -> Result<()> {
	if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
		fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
	}
	let tmp = tmp_path(path);
	let mut contents = String::new();
	for l in lines {
		contents.push_str(l);
		contents.push('\n');
	}
	{
		let mut f = OpenOptions::new().create(true).truncate(true).write(true).open(&tmp).with_context(|| format!("write {}", tmp.display()))?;
		f.write_all(contents.as_bytes()).with_context(|| format!("write {}", tmp.display()))?;
		f.sync_all().with_context(|| format!("sync {}", tmp.display()))?;
	}
	fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
	Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
	let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "tasks.txt".into());
	name.push(".tmp");
	path.with_file_name(name)
}
