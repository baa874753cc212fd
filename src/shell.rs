use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{Config, Variant};
use crate::error::ListError;
use crate::list::{self, TaskList, WeekPlanner};
use crate::remind::{self, Notifier};
use crate::store::{FlatStore, WeeklyStore};
use crate::task::{Task, Weekday};

/// The state the shell renders: one flat list, or the week plus the current-day selector.
#[derive(Debug)]
pub enum Board {
	Flat(TaskList),
	Weekly { planner: WeekPlanner, day: Weekday },
}

impl Board {
	pub fn open(cfg: &Config, day: Weekday) -> Result<Board> {
		let board = match cfg.variant {
			Variant::Flat => Board::Flat(TaskList::open(FlatStore::new(&cfg.path))?),
			Variant::Weekly => Board::Weekly { planner: WeekPlanner::open(WeeklyStore::new(&cfg.path))?, day },
		};
		Ok(board)
	}

	pub fn current_day(&self) -> Option<Weekday> {
		match self {
			Board::Flat(_) => None,
			Board::Weekly { day, .. } => Some(*day),
		}
	}

	/// Switches the current day. Returns `false` for the flat variant.
	pub fn set_day(&mut self, to: Weekday) -> bool {
		match self {
			Board::Flat(_) => false,
			Board::Weekly { day, .. } => {
				*day = to;
				true
			}
		}
	}

	pub fn current_tasks(&self) -> &[Task] {
		match self {
			Board::Flat(list) => list.tasks(),
			Board::Weekly { planner, day } => planner.day(*day),
		}
	}

	pub fn add(&mut self, text: &str) -> list::Result<usize> {
		match self {
			Board::Flat(list) => list.add(text),
			Board::Weekly { planner, day } => planner.add(text, *day),
		}
	}

	pub fn complete(&mut self, selection: Option<usize>) -> list::Result<bool> {
		match self {
			Board::Flat(list) => list.complete(selection),
			Board::Weekly { planner, day } => planner.complete(selection, *day),
		}
	}

	pub fn delete(&mut self, selection: Option<usize>) -> list::Result<Task> {
		match self {
			Board::Flat(list) => list.delete(selection),
			Board::Weekly { planner, day } => planner.delete(selection, *day),
		}
	}

	pub fn pending_summary(&self) -> Option<String> {
		match self {
			Board::Flat(list) => remind::pending_summary_flat(list.tasks()),
			Board::Weekly { planner, .. } => remind::pending_summary_weekly(planner.week()),
		}
	}

	/// Writes the current list. With `all_days`, the weekly variant shows every day
	/// with open/done counts.
	pub fn render(&self, out: &mut dyn Write, all_days: bool) -> io::Result<()> {
		match self {
			Board::Flat(list) => render_tasks(out, list.tasks(), ""),
			Board::Weekly { planner, day } if !all_days => {
				writeln!(out, "{}", format!("# {}", day).bold())?;
				render_tasks(out, planner.day(*day), "")
			}
			Board::Weekly { planner, day } => {
				for (d, tasks) in planner.week().iter() {
					let header = if d == *day { format!("# {} (current)", d) } else { format!("# {}", d) };
					writeln!(out, "\n{}", header.bold())?;
					let done = tasks.iter().filter(|t| t.done).count();
					writeln!(out, "Open: {}, Done: {}", tasks.len() - done, done)?;
					render_tasks(out, tasks, " ")?;
				}
				Ok(())
			}
		}
	}
}

fn render_tasks(out: &mut dyn Write, tasks: &[Task], indent: &str) -> io::Result<()> {
	if tasks.is_empty() {
		return writeln!(out, "{}{}", indent, "No tasks.".dimmed());
	}
	for (i, t) in tasks.iter().enumerate() {
		let line = if t.done { t.display().green() } else { t.display().normal() };
		writeln!(out, "{}{:>3}. {}", indent, i + 1, line)?;
	}
	Ok(())
}

/// Converts a 1-based task number from the user into a selection.
pub fn selection(arg: Option<&str>) -> Option<usize> {
	arg.and_then(|a| a.trim().parse::<usize>().ok()).and_then(|n| n.checked_sub(1))
}

const HELP: &str = "commands: add <text> | done [n] | delete [n] | day <name> | list | help | quit";

/// Interactive session. Sends the startup reminder once, then handles one command per line.
pub fn run_session(board: &mut Board, notifier: &dyn Notifier, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
	remind::notify_pending(notifier, board.pending_summary());
	board.render(out, false)?;
	writeln!(out, "{}", HELP.dimmed())?;
	let mut line = String::new();
	loop {
		write!(out, "> ")?;
		out.flush()?;
		line.clear();
		if input.read_line(&mut line).context("read command")? == 0 {
			break;
		}
		let trimmed = line.trim();
		let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
			Some((c, r)) => (c, Some(r.trim()).filter(|r| !r.is_empty())),
			None => (trimmed, None),
		};
		let result = match cmd {
			"" => continue,
			"quit" | "exit" | "q" => break,
			"help" | "?" => {
				writeln!(out, "{}", HELP)?;
				continue;
			}
			"list" | "ls" => {
				board.render(out, true)?;
				continue;
			}
			"day" => {
				match rest.map(str::parse::<Weekday>) {
					Some(Ok(d)) => {
						if board.set_day(d) {
							board.render(out, false)?;
						} else {
							warn(out, "day selection only applies to the weekly list")?;
						}
					}
					Some(Err(e)) => warn(out, &e.to_string())?,
					None => match board.current_day() {
						Some(d) => writeln!(out, "current day: {}", d)?,
						None => warn(out, "day selection only applies to the weekly list")?,
					},
				}
				continue;
			}
			"add" => board.add(rest.unwrap_or("")).map(|_| ()),
			"done" | "complete" => board.complete(selection(rest)).map(|_| ()),
			"delete" | "del" | "rm" => board.delete(selection(rest)).map(|_| ()),
			other => {
				warn(out, &format!("unknown command: {} ({})", other, HELP))?;
				continue;
			}
		};
		match result {
			Ok(()) => board.render(out, false)?,
			Err(ListError::Persist(e)) => return Err(e),
			Err(e) => warn(out, &e.to_string())?,
		}
	}
	Ok(())
}

fn warn(out: &mut dyn Write, msg: &str) -> io::Result<()> {
	writeln!(out, "{} {}", "Warning:".yellow().bold(), msg)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::remind::testing::Recorder;
	use std::fs;
	use std::io::Cursor;
	use tempfile::tempdir;

	fn session(cfg: &Config, script: &str) -> (String, Recorder) {
		let mut board = Board::open(cfg, Weekday::Monday).unwrap();
		let rec = Recorder::default();
		let mut input = Cursor::new(script.as_bytes().to_vec());
		let mut out = Vec::new();
		run_session(&mut board, &rec, &mut input, &mut out).unwrap();
		(String::from_utf8(out).unwrap(), rec)
	}

	#[test]
	fn selection_is_one_based() {
		assert_eq!(selection(Some("1")), Some(0));
		assert_eq!(selection(Some(" 3 ")), Some(2));
		assert_eq!(selection(Some("0")), None);
		assert_eq!(selection(Some("x")), None);
		assert_eq!(selection(None), None);
	}

	#[test]
	fn flat_session_mutates_and_persists() {
		let dir = tempdir().unwrap();
		let cfg = Config { path: dir.path().join("tasks.txt"), variant: Variant::Flat };
		let (out, rec) = session(&cfg, "add Buy milk\nadd   \ndone\nadd Walk dog\ndone 1\ndelete 2\nquit\nadd never\n");
		assert!(out.contains("Task cannot be empty."));
		assert!(out.contains("Select a task to mark as complete."));
		assert!(out.contains("[✔] Buy milk"));
		assert!(rec.sent.borrow().is_empty());
		assert_eq!(fs::read_to_string(&cfg.path).unwrap(), "[✔] Buy milk\n");
	}

	#[test]
	fn startup_reminder_sent_once() {
		let dir = tempdir().unwrap();
		let cfg = Config { path: dir.path().join("tasks.txt"), variant: Variant::Flat };
		fs::write(&cfg.path, "[ ] a\n[ ] b\n").unwrap();
		let (_, rec) = session(&cfg, "add c\nadd d\n");
		let sent = rec.sent.borrow();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].1, "[ ] a\n[ ] b");
	}

	#[test]
	fn weekly_session_switches_day() {
		let dir = tempdir().unwrap();
		let cfg = Config { path: dir.path().join("tasks.txt"), variant: Variant::Weekly };
		let (out, _) = session(&cfg, "add Gym\nday tue\nadd Dentist\nday sunday\nlist\n");
		assert!(out.contains("invalid day"));
		assert!(out.contains("Open: 1, Done: 0"));
		assert_eq!(
			fs::read_to_string(&cfg.path).unwrap(),
			"Monday|[ ] Gym\nTuesday|[ ] Dentist\n"
		);
	}

	#[test]
	fn save_failure_ends_session() {
		let dir = tempdir().unwrap();
		let cfg = Config { path: dir.path().join("tasks.txt"), variant: Variant::Flat };
		let mut board = Board::open(&cfg, Weekday::Monday).unwrap();
		fs::create_dir(dir.path().join("tasks.txt.tmp")).unwrap();
		let rec = Recorder::default();
		let mut input = Cursor::new(b"add  \nadd x\nadd y\n".to_vec());
		let mut out = Vec::new();
		assert!(run_session(&mut board, &rec, &mut input, &mut out).is_err());
		let out = String::from_utf8(out).unwrap();
		assert!(out.contains("Task cannot be empty."));
		assert!(!out.contains("[ ] y"));
	}

	#[test]
	fn flat_rejects_day_command() {
		let dir = tempdir().unwrap();
		let cfg = Config { path: dir.path().join("tasks.txt"), variant: Variant::Flat };
		let (out, _) = session(&cfg, "day mon\nbogus\n");
		assert!(out.contains("only applies to the weekly list"));
		assert!(out.contains("unknown command: bogus"));
	}
}
