use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed kanban task tracker.
/// State lives under ~/.taskboard or a directory passed via --data-dir.
#[derive(Parser)]
#[command(name = "tb", version, about = "Kanban task tracker with freezable tasks")]
pub struct Cli {
    /// Directory holding the todos and theme slots.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
