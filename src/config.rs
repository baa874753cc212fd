use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

pub const DEFAULT_FILE: &str = "tasks.txt";
pub const FILE_ENV: &str = "TODO_FILE";
pub const WEEKLY_ENV: &str = "TODO_WEEKLY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
	Flat,
	Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub path: PathBuf,
	pub variant: Variant,
}

impl Config {
	/// Resolves the task file: `--file`, then `TODO_FILE`, then the platform data dir
	/// when `global` is set, then `tasks.txt` in the working directory.
	pub fn resolve(file: Option<PathBuf>, global: bool, weekly: bool) -> Result<Config> {
		let path = match file {
			Some(p) => p,
			None => match env::var_os(FILE_ENV).filter(|v| !v.is_empty()) {
				Some(v) => PathBuf::from(v),
				None if global => global_file()?,
				None => PathBuf::from(DEFAULT_FILE),
			},
		};
		let variant = if weekly || env_flag(WEEKLY_ENV) { Variant::Weekly } else { Variant::Flat };
		Ok(Config { path, variant })
	}
}

fn env_flag(name: &str) -> bool {
	match env::var(name) {
		Ok(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
		Err(_) => false,
	}
}

// The directory itself is created by the store on first save.
fn global_file() -> Result<PathBuf> {
	ProjectDirs::from("dev", "local", "todo_reminder")
		.map(|dirs| dirs.data_dir().join(DEFAULT_FILE))
		.context("no home directory for the global task file")
}
