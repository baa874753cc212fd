//! A to-do list kept in a plain-text file, in a flat or a Monday-to-Friday layout,
//! with a one-shot reminder for pending tasks.

pub mod config;
pub mod error;
pub mod list;
pub mod remind;
pub mod shell;
pub mod store;
pub mod task;

pub use config::{Config, Variant};
pub use error::{Action, ListError};
pub use list::{TaskList, WeekPlanner};
pub use remind::{DesktopNotifier, Notifier};
pub use store::{FlatStore, Week, WeeklyStore};
pub use task::{Task, Weekday};
