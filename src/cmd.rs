//! Command implementations for the CLI interface.
//!
//! Each subcommand resolves its target task, calls the matching lifecycle
//! operation, and reports the outcome. The lifecycle engine treats illegal
//! requests as no-ops; the handlers here only translate that into user-facing
//! feedback.

use std::path::Path;

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use uuid::Uuid;

use crate::cli::Cli;
use crate::fields::{SortKey, Status, ThemeMode};
use crate::lifecycle;
use crate::store::{
    format_created, format_status, print_table, resolve_task_identifier, short_id, Store,
};
use crate::theme::{format_theme, load_theme, save_theme};
use crate::tui::run::run_board_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive kanban board.
    Ui,

    /// Add a new task.
    Add {
        /// Title for the task. Rejected if another task already uses it.
        title: String,
    },

    /// List tasks with optional filters.
    List {
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Sort key.
        #[arg(long, value_enum, default_value_t = SortKey::Created)]
        sort: SortKey,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// View a single task by ID or title.
    View {
        /// Task ID, ID prefix, or title.
        id: String,
    },

    /// Move a task one step forward (todo -> in-progress -> done).
    Forward {
        /// Task ID, ID prefix, or title.
        id: String,
    },

    /// Move a task one step back (done -> in-progress -> todo).
    Back {
        /// Task ID, ID prefix, or title.
        id: String,
    },

    /// Freeze a task, remembering where it sat on the line.
    Freeze {
        /// Task ID, ID prefix, or title.
        id: String,
    },

    /// Unfreeze a task, restoring its pre-freeze status.
    Unfreeze {
        /// Task ID, ID prefix, or title.
        id: String,
    },

    /// Move a task directly to a status, subject to the transition rules.
    Move {
        /// Task ID, ID prefix, or title.
        id: String,
        /// Target status: todo | in-progress | done | frozen.
        #[arg(value_enum)]
        status: Status,
    },

    /// Delete a task by ID or title.
    Delete {
        /// Task ID, ID prefix, or title.
        id: String,
    },

    /// Show or set the theme preference for the board.
    Theme {
        /// New mode: light | dark | system. Omit to show the current one.
        #[arg(value_enum)]
        mode: Option<ThemeMode>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(data_dir: &Path) {
    if let Err(e) = run_board_tui(data_dir) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the board.
pub fn cmd_add(store: &mut Store, title: &str) {
    match lifecycle::create(store, title) {
        Ok(id) => println!("Added {}  {}", short_id(id), title.trim()),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// List tasks, optionally filtered and sorted.
pub fn cmd_list(store: &Store, status: Option<Status>, sort: SortKey, limit: Option<usize>) {
    let mut rows: Vec<_> = store
        .tasks()
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .collect();

    match sort {
        SortKey::Created => rows.sort_by_key(|t| t.created_at),
        SortKey::Status => rows.sort_by_key(|t| t.status.column_order()),
        SortKey::Title => rows.sort_by_key(|t| t.title.to_lowercase()),
    }
    if let Some(n) = limit {
        rows.truncate(n);
    }
    print_table(&rows);
}

/// Print full details for a single task.
pub fn cmd_view(store: &Store, identifier: &str) {
    let id = resolve_or_exit(identifier, store);
    let Some(task) = store.get(id) else { return };

    println!("ID:       {}", task.id);
    println!("Title:    {}", task.title);
    println!("Status:   {}", format_status(task.status));
    println!("Created:  {}", format_created(task));
    if task.status == Status::Frozen {
        println!("Resumes:  {}", format_status(task.previous_status));
    }
}

/// Advance a task one step along the line.
pub fn cmd_forward(store: &mut Store, identifier: &str) {
    let id = resolve_or_exit(identifier, store);
    match lifecycle::advance(store, id) {
        Ok(true) => report_status(store, id),
        Ok(false) => report_no_change(store, id),
        Err(e) => exit_io(e),
    }
}

/// Move a task one step back along the line.
pub fn cmd_back(store: &mut Store, identifier: &str) {
    let id = resolve_or_exit(identifier, store);
    match lifecycle::regress(store, id) {
        Ok(true) => report_status(store, id),
        Ok(false) => report_no_change(store, id),
        Err(e) => exit_io(e),
    }
}

/// Freeze a task in place.
pub fn cmd_freeze(store: &mut Store, identifier: &str) {
    cmd_move(store, identifier, Status::Frozen);
}

/// Unfreeze a task, restoring its remembered status.
pub fn cmd_unfreeze(store: &mut Store, identifier: &str) {
    let id = resolve_or_exit(identifier, store);
    // A bare `move .. todo` on an unfrozen task would drag it back down the
    // line, so guard here rather than reuse cmd_move.
    if store.get(id).map(|t| t.status) != Some(Status::Frozen) {
        report_no_change(store, id);
        return;
    }
    match lifecycle::set_status(store, id, Status::Todo) {
        Ok(_) => report_status(store, id),
        Err(e) => exit_io(e),
    }
}

/// Request a direct status change through the transition table.
pub fn cmd_move(store: &mut Store, identifier: &str, status: Status) {
    let id = resolve_or_exit(identifier, store);
    match lifecycle::set_status(store, id, status) {
        Ok(true) => report_status(store, id),
        Ok(false) => report_no_change(store, id),
        Err(e) => exit_io(e),
    }
}

/// Delete a task.
pub fn cmd_delete(store: &mut Store, identifier: &str) {
    let id = resolve_or_exit(identifier, store);
    let title = store.get(id).map(|t| t.title.clone()).unwrap_or_default();
    match lifecycle::delete(store, id) {
        Ok(_) => println!("Deleted '{title}'"),
        Err(e) => exit_io(e),
    }
}

/// Show or update the theme preference slot.
pub fn cmd_theme(data_dir: &Path, mode: Option<ThemeMode>) {
    match mode {
        None => println!("{}", format_theme(load_theme(data_dir))),
        Some(mode) => {
            if let Err(e) = save_theme(data_dir, mode) {
                eprintln!("Failed to save theme: {e}");
                std::process::exit(1);
            }
            println!("Theme set to {}", format_theme(mode));
        }
    }
}

/// Generate completions for the requested shell.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

fn resolve_or_exit(identifier: &str, store: &Store) -> Uuid {
    match resolve_task_identifier(identifier, store) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn report_status(store: &Store, id: Uuid) {
    if let Some(task) = store.get(id) {
        println!("'{}' is now {}", task.title, format_status(task.status));
    }
}

fn report_no_change(store: &Store, id: Uuid) {
    if let Some(task) = store.get(id) {
        println!(
            "No change: '{}' stays {}",
            task.title,
            format_status(task.status)
        );
    }
}

fn exit_io(e: std::io::Error) -> ! {
    eprintln!("Failed to save tasks: {e}");
    std::process::exit(1);
}
