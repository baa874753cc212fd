use tracing::info;

use crate::error::{Action, ListError};
use crate::store::{FlatStore, Week, WeeklyStore};
use crate::task::{Task, Weekday};

pub type Result<T> = std::result::Result<T, ListError>;

// One task is one stored line, so embedded line breaks become spaces.
fn validate(raw: &str) -> Result<String> {
	let text = raw.replace(['\r', '\n'], " ");
	let text = text.trim();
	if text.is_empty() {
		return Err(ListError::Validation);
	}
	Ok(text.to_string())
}

fn selected(tasks: &[Task], selection: Option<usize>, action: Action) -> Result<usize> {
	match selection {
		Some(i) if i < tasks.len() => Ok(i),
		_ => Err(ListError::Selection(action)),
	}
}

/// Flat variant: one ordered list backed by a [`FlatStore`].
#[derive(Debug)]
pub struct TaskList {
	store: FlatStore,
	tasks: Vec<Task>,
}

impl TaskList {
	pub fn open(store: FlatStore) -> anyhow::Result<Self> {
		let tasks = store.load()?;
		Ok(TaskList { store, tasks })
	}

	pub fn store(&self) -> &FlatStore {
		&self.store
	}

	pub fn tasks(&self) -> &[Task] {
		&self.tasks
	}

	pub fn display_lines(&self) -> Vec<String> {
		self.tasks.iter().map(Task::display).collect()
	}

	/// Appends a pending task and returns its index.
	pub fn add(&mut self, raw: &str) -> Result<usize> {
		let text = validate(raw)?;
		info!(text = %text, "add task");
		self.tasks.push(Task::pending(text));
		self.store.save(&self.tasks)?;
		Ok(self.tasks.len() - 1)
	}

	/// Marks the selected task done. Returns `false` when it already was.
	pub fn complete(&mut self, selection: Option<usize>) -> Result<bool> {
		let i = selected(&self.tasks, selection, Action::Complete)?;
		if self.tasks[i].done {
			return Ok(false);
		}
		info!(index = i, "complete task");
		self.tasks[i].done = true;
		self.store.save(&self.tasks)?;
		Ok(true)
	}

	pub fn delete(&mut self, selection: Option<usize>) -> Result<Task> {
		let i = selected(&self.tasks, selection, Action::Delete)?;
		info!(index = i, "delete task");
		let removed = self.tasks.remove(i);
		self.store.save(&self.tasks)?;
		Ok(removed)
	}
}

/// Weekly variant: five ordered lists keyed by weekday, backed by a [`WeeklyStore`].
#[derive(Debug)]
pub struct WeekPlanner {
	store: WeeklyStore,
	week: Week,
}

impl WeekPlanner {
	pub fn open(store: WeeklyStore) -> anyhow::Result<Self> {
		let week = store.load()?;
		Ok(WeekPlanner { store, week })
	}

	pub fn store(&self) -> &WeeklyStore {
		&self.store
	}

	pub fn week(&self) -> &Week {
		&self.week
	}

	pub fn day(&self, day: Weekday) -> &[Task] {
		self.week.day(day)
	}

	pub fn display_lines(&self, day: Weekday) -> Vec<String> {
		self.week.day(day).iter().map(Task::display).collect()
	}

	pub fn add(&mut self, raw: &str, day: Weekday) -> Result<usize> {
		let text = validate(raw)?;
		info!(day = %day, text = %text, "add task");
		let list = self.week.day_mut(day);
		list.push(Task::pending(text));
		let idx = list.len() - 1;
		self.store.save(&self.week)?;
		Ok(idx)
	}

	pub fn complete(&mut self, selection: Option<usize>, day: Weekday) -> Result<bool> {
		let i = selected(self.week.day(day), selection, Action::Complete)?;
		let task = &mut self.week.day_mut(day)[i];
		if task.done {
			return Ok(false);
		}
		info!(day = %day, index = i, "complete task");
		task.done = true;
		self.store.save(&self.week)?;
		Ok(true)
	}

	pub fn delete(&mut self, selection: Option<usize>, day: Weekday) -> Result<Task> {
		let i = selected(self.week.day(day), selection, Action::Delete)?;
		info!(day = %day, index = i, "delete task");
		let removed = self.week.day_mut(day).remove(i);
		self.store.save(&self.week)?;
		Ok(removed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::{tempdir, TempDir};

	fn flat() -> (TempDir, TaskList) {
		let dir = tempdir().unwrap();
		let list = TaskList::open(FlatStore::new(dir.path().join("tasks.txt"))).unwrap();
		(dir, list)
	}

	fn weekly() -> (TempDir, WeekPlanner) {
		let dir = tempdir().unwrap();
		let planner = WeekPlanner::open(WeeklyStore::new(dir.path().join("tasks.txt"))).unwrap();
		(dir, planner)
	}

	#[test]
	fn add_trims_and_persists() {
		let (_dir, mut list) = flat();
		assert_eq!(list.add("  Buy milk \t").unwrap(), 0);
		let loaded = list.store().load().unwrap();
		assert_eq!(loaded, vec![Task::pending("Buy milk")]);
		assert_eq!(list.tasks(), loaded.as_slice());
	}

	#[test]
	fn add_empty_is_validation_error() {
		let (_dir, mut list) = flat();
		list.add("keep").unwrap();
		for raw in ["", "   ", "\t\n"] {
			let err = list.add(raw).unwrap_err();
			assert!(matches!(err, ListError::Validation));
			assert!(err.is_recoverable());
		}
		assert_eq!(list.display_lines(), vec!["[ ] keep"]);
	}

	#[test]
	fn add_folds_line_breaks_into_one_line() {
		let (_dir, mut list) = flat();
		list.add("a\nb\r\nc").unwrap();
		assert_eq!(list.display_lines(), vec!["[ ] a b  c"]);
		assert_eq!(list.store().load().unwrap(), list.tasks());
		assert!(matches!(list.add("\n\r\n"), Err(ListError::Validation)));
		assert_eq!(list.tasks().len(), 1);
	}

	#[test]
	fn weekly_add_cannot_plant_a_second_line() {
		let (_dir, mut planner) = weekly();
		planner.add("a\nFriday|[ ] injected", Weekday::Monday).unwrap();
		assert_eq!(planner.display_lines(Weekday::Monday), vec!["[ ] a Friday|[ ] injected"]);
		assert!(planner.day(Weekday::Friday).is_empty());
		assert_eq!(&planner.store().load().unwrap(), planner.week());
	}

	#[test]
	fn add_without_prior_file_does_not_write_on_failure() {
		let (_dir, mut list) = flat();
		assert!(list.add(" ").is_err());
		assert!(!list.store().path().exists());
	}

	#[test]
	fn complete_changes_only_target() {
		let (_dir, mut list) = flat();
		for t in ["a", "b", "c"] {
			list.add(t).unwrap();
		}
		assert!(list.complete(Some(1)).unwrap());
		assert_eq!(list.display_lines(), vec!["[ ] a", "[✔] b", "[ ] c"]);
		assert_eq!(list.store().load().unwrap(), list.tasks());
	}

	#[test]
	fn complete_done_task_is_noop() {
		let (_dir, mut list) = flat();
		list.add("a").unwrap();
		list.complete(Some(0)).unwrap();
		let before = fs::read(list.store().path()).unwrap();
		let snapshot = list.tasks().to_vec();
		assert!(!list.complete(Some(0)).unwrap());
		assert_eq!(list.tasks(), snapshot.as_slice());
		assert_eq!(fs::read(list.store().path()).unwrap(), before);
	}

	#[test]
	fn selection_errors() {
		let (_dir, mut list) = flat();
		list.add("a").unwrap();
		assert!(matches!(list.complete(None), Err(ListError::Selection(Action::Complete))));
		assert!(matches!(list.delete(None), Err(ListError::Selection(Action::Delete))));
		assert!(matches!(list.delete(Some(5)), Err(ListError::Selection(Action::Delete))));
		assert_eq!(list.tasks().len(), 1);
		assert_eq!(
			ListError::Selection(Action::Complete).to_string(),
			"Select a task to mark as complete."
		);
	}

	#[test]
	fn delete_shifts_following_items() {
		let (_dir, mut list) = flat();
		for t in ["a", "b", "c", "d"] {
			list.add(t).unwrap();
		}
		let removed = list.delete(Some(1)).unwrap();
		assert_eq!(removed.text, "b");
		assert_eq!(list.display_lines(), vec!["[ ] a", "[ ] c", "[ ] d"]);
		assert_eq!(list.store().load().unwrap(), list.tasks());
	}

	#[test]
	fn reopen_sees_same_state() {
		let (dir, mut list) = flat();
		list.add("x").unwrap();
		list.add("y").unwrap();
		list.complete(Some(0)).unwrap();
		let reopened = TaskList::open(FlatStore::new(dir.path().join("tasks.txt"))).unwrap();
		assert_eq!(reopened.tasks(), list.tasks());
	}

	#[test]
	fn weekly_ops_touch_one_day() {
		let (_dir, mut planner) = weekly();
		planner.add("Gym", Weekday::Monday).unwrap();
		planner.add("Swim", Weekday::Monday).unwrap();
		planner.add("Dentist", Weekday::Tuesday).unwrap();

		assert!(planner.complete(Some(1), Weekday::Monday).unwrap());
		assert_eq!(planner.display_lines(Weekday::Monday), vec!["[ ] Gym", "[✔] Swim"]);
		assert_eq!(planner.display_lines(Weekday::Tuesday), vec!["[ ] Dentist"]);

		assert!(matches!(
			planner.complete(Some(0), Weekday::Friday),
			Err(ListError::Selection(_))
		));
		planner.delete(Some(0), Weekday::Tuesday).unwrap();
		assert!(planner.day(Weekday::Tuesday).is_empty());
		assert_eq!(&planner.store().load().unwrap(), planner.week());
	}

	#[test]
	fn weekly_add_validates() {
		let (_dir, mut planner) = weekly();
		assert!(matches!(planner.add("  ", Weekday::Wednesday), Err(ListError::Validation)));
		assert!(planner.week().is_empty());
	}
}
