//! # Chorust
//!
//! A terminal chore tracker for small offices. Chores can repeat daily or on
//! chosen weekdays every N weeks, and every occurrence is checked off on its
//! own.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Run without arguments to open the month calendar:
//!
//! ```bash
//! chorust
//! # or explicitly
//! chorust ui
//! ```
//!
//! *   `←↑↓→` / `hjkl`: Move the selected day
//! *   `[` / `]`: Previous / next month
//! *   `t`: Jump to today
//! *   `Tab` / `J` / `K`: Select a chore on the selected day
//! *   `Space`: Toggle completion of that occurrence
//! *   `a`: Add a one-off chore on the selected day
//! *   `d`: Delete the selected chore
//! *   `f`: Cycle the category filter
//! *   `q`: Quit
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # Weekly chore, every other Monday and Thursday
//! chorust add "Water plants" --due 2024-01-01 --recur weekly --every 2 --days mon,thu
//!
//! # Daily chore with an end date, assigned to a team member
//! chorust add "Empty dishwasher" --due 2024-03-01 --recur daily --until 2024-06-30 --assignee Alex
//!
//! # Month grid and a single day
//! chorust calendar --month 2024-03
//! chorust day 2024-03-13
//!
//! # Check off one occurrence
//! chorust toggle <ID> 2024-03-13
//! ```
//!
//! Ids can be shortened to any unique prefix.
//!
//! ## Data Storage
//!
//! Chores and team members are saved as `chores.json` and `team.json` in
//! `~/.local/share/chorust` (or the platform equivalent). Override the
//! directory with `--data-dir` or the `CHORUST_DATA_DIR` environment variable.
//! Set `RUST_LOG=debug` for diagnostic output.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chorust::commands::*;
use chorust::error::ChoreError;
use chorust::models::{Category, Priority, RecurrenceType};
use chorust::storage::Store;
use chorust::tui::run_tui;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chorust")]
#[command(about = "Recurring chore tracker", long_about = None)]
struct Cli {
    /// Directory holding chores.json and team.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new chore
    Add {
        /// Chore title (quoted if it has spaces)
        title: String,
        /// Due date, or first occurrence, in YYYY-MM-DD
        #[arg(short, long)]
        due: String,
        #[command(flatten)]
        fields: ChoreArgs,
    },
    /// Edit a chore
    Edit {
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New due date
        #[arg(short, long)]
        due: Option<String>,
        #[command(flatten)]
        fields: ChoreArgs,
        /// Remove the recurrence end date
        #[arg(long, conflicts_with = "until")]
        clear_until: bool,
        /// Remove the assignee
        #[arg(long, conflicts_with = "assignee")]
        unassign: bool,
    },
    /// Remove a chore
    Remove {
        id: String,
    },
    /// List all chores
    List,
    /// Show a month grid
    Calendar {
        /// Month in YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Show chores due on a date
    Day {
        /// Date in YYYY-MM-DD
        date: String,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Toggle completion of one occurrence
    Toggle {
        id: String,
        /// Occurrence date in YYYY-MM-DD
        date: String,
    },
    /// Show the next occurrence of a chore
    Next {
        id: String,
        /// Reference date (default: today)
        #[arg(short, long)]
        after: Option<String>,
    },
    /// Manage team members
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Reset the database (delete all chores and team members)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Args)]
struct ChoreArgs {
    /// Longer description
    #[arg(long)]
    description: Option<String>,
    /// cleaning, admin, maintenance or other
    #[arg(short, long)]
    category: Option<Category>,
    /// low, medium or high
    #[arg(short, long)]
    priority: Option<Priority>,
    /// Team member id, id prefix or name
    #[arg(short, long)]
    assignee: Option<String>,
    /// Recurrence (none, daily, weekly)
    #[arg(short, long)]
    recur: Option<RecurrenceType>,
    /// Repeat every N days or weeks (1-30)
    #[arg(short, long)]
    every: Option<u32>,
    /// Weekdays for weekly chores, e.g. mon,thu
    #[arg(long)]
    days: Option<String>,
    /// Last possible occurrence in YYYY-MM-DD
    #[arg(short, long)]
    until: Option<String>,
}

impl From<ChoreArgs> for ChoreOptions {
    fn from(a: ChoreArgs) -> Self {
        ChoreOptions {
            description: a.description,
            category: a.category,
            priority: a.priority,
            assignee: a.assignee,
            recur: a.recur,
            every: a.every,
            days: a.days,
            until: a.until,
        }
    }
}

#[derive(Args)]
struct FilterOpts {
    /// Only show this category
    #[arg(short, long)]
    category: Option<Category>,
    /// Only show this priority
    #[arg(short, long)]
    priority: Option<Priority>,
    /// Only show chores assigned to this member
    #[arg(short, long)]
    assignee: Option<String>,
}

impl From<FilterOpts> for FilterArgs {
    fn from(f: FilterOpts) -> Self {
        FilterArgs { category: f.category, priority: f.priority, assignee: f.assignee }
    }
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Add a team member
    Add {
        name: String,
        /// Display color as #RRGGBB (default: next free palette color)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List team members
    List,
    /// Remove a team member and unassign their chores
    Remove {
        /// Member id, id prefix or name
        id: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = Store::open(cli.data_dir);

    let result: Result<(), ChoreError> = match cli.command {
        Some(Commands::Add { title, due, fields }) => cmd_add(&store, title, &due, fields.into(), false).map(|_| ()),
        Some(Commands::Edit { id, title, due, fields, clear_until, unassign }) => {
            cmd_edit(&store, &id, title, due, fields.into(), clear_until, unassign, false)
        }
        Some(Commands::Remove { id }) => cmd_remove(&store, &id, false),
        Some(Commands::List) => {
            cmd_list(&store);
            Ok(())
        }
        Some(Commands::Calendar { month, filter }) => cmd_calendar(&store, month, filter.into()),
        Some(Commands::Day { date, filter }) => cmd_day(&store, &date, filter.into()),
        Some(Commands::Toggle { id, date }) => cmd_toggle(&store, &id, &date, false).map(|_| ()),
        Some(Commands::Next { id, after }) => cmd_next(&store, &id, after).map(|_| ()),
        Some(Commands::Member { command }) => match command {
            MemberCommands::Add { name, color } => cmd_member_add(&store, name, color, false).map(|_| ()),
            MemberCommands::List => {
                cmd_member_list(&store);
                Ok(())
            }
            MemberCommands::Remove { id } => cmd_member_remove(&store, &id, false),
        },
        Some(Commands::Reset { force }) => cmd_reset(&store, force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return ExitCode::FAILURE;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "chorust", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui(store) {
                eprintln!("Error running TUI: {}", e);
                return ExitCode::FAILURE;
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
