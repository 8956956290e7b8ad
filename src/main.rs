//! # TB - Kanban Task Tracker
//!
//! A small, file-backed task tracker with a four-column kanban lifecycle and
//! an optional terminal user interface (TUI).
//!
//! ## Key Features
//!
//! - **Ordered Lifecycle**: tasks move along `todo -> inProgress -> done`,
//!   one step at a time or by direct (rule-checked) status assignment
//! - **Freezable Tasks**: park a task in the Frozen column and resume it
//!   later exactly where it left off
//! - **Multiple Interfaces**: full CLI for automation + interactive kanban
//!   board for visual management
//! - **Local File Storage**: the whole board is a single JSON slot, written
//!   atomically on every change - no daemon, no server, no sync
//! - **Duplicate Guard**: creating a task whose title already exists (any
//!   casing or surrounding whitespace) is refused
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the kanban board
//! tb ui
//!
//! # Add a task via CLI
//! tb add "Implement user authentication"
//!
//! # Walk it along the line
//! tb forward "Implement user authentication"
//!
//! # Park it for later, then resume where it left off
//! tb freeze "Implement user authentication"
//! tb unfreeze "Implement user authentication"
//!
//! # List tasks
//! tb list
//! ```
//!
//! ## Installation
//!
//! ```bash
//! git clone <repository-url>
//! cd taskboard
//! cargo install --path .
//! ```
//!
//! Data is stored locally in `~/.taskboard/` as two JSON slots: `todos.json`
//! (the task collection) and `theme.json` (the board's theme preference).
//! We recommend you source control this folder via `git init` and back it up
//! periodically.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod lifecycle;
pub mod store;
pub mod task;
pub mod theme;
pub mod tui {
    pub mod board;
    pub mod colors;
    pub mod input;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use store::Store;

fn main() {
    let cli = Cli::parse();

    // Determine the data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".taskboard")
    });
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
        std::process::exit(1);
    }

    // Completions don't touch the store at all
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let mut store = Store::open(&data_dir);

    match cli.command {
        Commands::Ui => cmd_ui(&data_dir),

        Commands::Add { title } => cmd_add(&mut store, &title),

        Commands::List { status, sort, limit } => cmd_list(&store, status, sort, limit),

        Commands::View { id } => cmd_view(&store, &id),

        Commands::Forward { id } => cmd_forward(&mut store, &id),

        Commands::Back { id } => cmd_back(&mut store, &id),

        Commands::Freeze { id } => cmd_freeze(&mut store, &id),

        Commands::Unfreeze { id } => cmd_unfreeze(&mut store, &id),

        Commands::Move { id, status } => cmd_move(&mut store, &id, status),

        Commands::Delete { id } => cmd_delete(&mut store, &id),

        Commands::Theme { mode } => cmd_theme(&data_dir, mode),

        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}
