use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use todo_reminder::shell::{self, Board};
use todo_reminder::{remind, Config, DesktopNotifier, Weekday};

#[derive(Parser)]
#[command(
	name = "todo",
	version,
	about = "To-do list with a pending-task reminder",
	long_about = "A small to-do list stored in a plain-text file.\n\nFeatures:\n- Flat list, or one list per weekday (--weekly)\n- Add/done/delete by task number\n- Interactive session with a reminder for up to 3 pending tasks at startup\n- Desktop notifications via notify-send when available",
	after_help = "Examples:\n  todo\n  todo add \"Buy milk\"\n  todo done 1\n  todo delete 2\n  todo --weekly add -d tue \"Dentist\"\n  todo --weekly list\n  todo remind"
)]
struct Cli {
	/// Task file (default: $TODO_FILE, else ./tasks.txt)
	#[arg(short = 'f', long = "file", global = true)]
	file: Option<PathBuf>,
	/// Store tasks in the platform data directory instead of the working directory
	#[arg(short = 'g', long = "global", global = true)]
	global: bool,
	/// Use one list per weekday (also: TODO_WEEKLY=1)
	#[arg(short = 'w', long = "weekly", global = true)]
	weekly: bool,
	#[command(subcommand)]
	action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
	/// Start an interactive session (the default)
	Shell {
		/// Initial day for the weekly list (default: today, Monday on weekends)
		#[arg(short = 'd', long = "day")]
		day: Option<Weekday>,
	},
	/// Add a task
	Add {
		/// Task text
		text: Vec<String>,
		/// Day for the weekly list (default: today, Monday on weekends)
		#[arg(short = 'd', long = "day")]
		day: Option<Weekday>,
	},
	/// Mark a task complete by number
	Done {
		/// Task number (1-based, as shown by `list`)
		n: Option<String>,
		#[arg(short = 'd', long = "day")]
		day: Option<Weekday>,
	},
	/// Delete a task by number
	Delete {
		/// Task number (1-based, as shown by `list`)
		n: Option<String>,
		#[arg(short = 'd', long = "day")]
		day: Option<Weekday>,
	},
	/// List tasks (weekly: all days unless --day is given)
	List {
		#[arg(short = 'd', long = "day")]
		day: Option<Weekday>,
	},
	/// Send the pending-task reminder now
	Remind,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_writer(io::stderr)
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todo_reminder=warn")))
		.init();

	let cli = Cli::parse();
	let cfg = Config::resolve(cli.file, cli.global, cli.weekly)?;
	let action = cli.action.unwrap_or(Action::Shell { day: None });
	let stdout = io::stdout();
	let mut out = stdout.lock();
	match action {
		Action::Shell { day } => {
			let mut board = Board::open(&cfg, day.unwrap_or_else(Weekday::today))?;
			let stdin = io::stdin();
			let mut input = stdin.lock();
			shell::run_session(&mut board, &DesktopNotifier, &mut input, &mut out)?
		}
		Action::Add { text, day } => {
			let mut board = Board::open(&cfg, day.unwrap_or_else(Weekday::today))?;
			let i = board.add(&text.join(" "))?;
			writeln!(out, "Added: {}", board.current_tasks()[i])?;
		}
		Action::Done { n, day } => {
			let mut board = Board::open(&cfg, day.unwrap_or_else(Weekday::today))?;
			let sel = shell::selection(n.as_deref());
			if board.complete(sel)? {
				if let Some(i) = sel {
					writeln!(out, "Completed: {}", board.current_tasks()[i].to_string().green())?;
				}
			} else {
				writeln!(out, "Already complete.")?;
			}
		}
		Action::Delete { n, day } => {
			let mut board = Board::open(&cfg, day.unwrap_or_else(Weekday::today))?;
			let removed = board.delete(shell::selection(n.as_deref()))?;
			writeln!(out, "Deleted: {}", removed)?;
		}
		Action::List { day } => {
			let board = Board::open(&cfg, day.unwrap_or_else(Weekday::today))?;
			board.render(&mut out, day.is_none())?;
		}
		Action::Remind => {
			let board = Board::open(&cfg, Weekday::today())?;
			if !remind::notify_pending(&DesktopNotifier, board.pending_summary()) {
				writeln!(out, "No pending tasks.")?;
			}
		}
	}
	Ok(())
}
