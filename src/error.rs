use thiserror::Error;

/// Errors from the task list controllers.
///
/// `Validation` and `Selection` leave state untouched and are meant to be shown to the
/// user. `Persist` wraps a store failure.
#[derive(Debug, Error)]
pub enum ListError {
	#[error("Task cannot be empty.")]
	Validation,

	#[error("Select a task to {0}.")]
	Selection(Action),

	#[error(transparent)]
	Persist(#[from] anyhow::Error),
}

impl ListError {
	pub fn is_recoverable(&self) -> bool {
		!matches!(self, ListError::Persist(_))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Complete,
	Delete,
}

impl std::fmt::Display for Action {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Action::Complete => f.write_str("mark as complete"),
			Action::Delete => f.write_str("delete"),
		}
	}
}
