//! Persistent task store and shared display helpers.
//!
//! The `Store` owns the in-memory task collection as the single source of
//! truth and mirrors the whole collection to the `todos` slot (a JSON array
//! file) on every change. There is no incremental write path: callers build a
//! new collection and hand it to [`Store::replace`], which persists before
//! returning, so the durable copy never lags behind memory.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use uuid::Uuid;

use crate::fields::Status;
use crate::task::Task;

/// File name of the task collection slot inside the data directory.
pub const TODOS_SLOT: &str = "todos.json";

/// File-backed store for the task collection.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl Store {
    /// Open the store for a data directory, rehydrating the task collection
    /// from the `todos` slot. A missing or unparseable slot yields an empty
    /// collection; corruption is logged and never fatal.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(TODOS_SLOT);
        let tasks = load_slot(&path);
        Store { path, tasks }
    }

    /// Read-only snapshot of the current collection.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by ID.
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Swap in a new collection and persist it immediately.
    ///
    /// Uses an atomic-ish write (temp file + rename) so a crash mid-write
    /// leaves the previous slot contents intact.
    pub fn replace(&mut self, tasks: Vec<Task>) -> io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(&tasks).unwrap();
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        // Memory only moves forward once the slot is durable.
        self.tasks = tasks;
        Ok(())
    }
}

fn load_slot(path: &Path) -> Vec<Task> {
    if !path.exists() {
        return Vec::new();
    }
    let mut buf = String::new();
    match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
        Ok(_) => match serde_json::from_str(&buf) {
            Ok(tasks) => tasks,
            Err(e) => {
                eprintln!("Error parsing {}, starting fresh: {e}", path.display());
                Vec::new()
            }
        },
        Err(e) => {
            eprintln!("Error reading {}, starting fresh: {e}", path.display());
            Vec::new()
        }
    }
}

/// Resolve a task identifier (full UUID, UUID prefix, or title) to a task ID.
/// Titles match case-insensitively; ambiguous matches suggest using the ID.
pub fn resolve_task_identifier(identifier: &str, store: &Store) -> Result<Uuid, String> {
    // Try parsing as a full UUID first
    if let Ok(id) = identifier.parse::<Uuid>() {
        if store.get(id).is_some() {
            return Ok(id);
        }
        return Err(format!("Task with ID {} not found", id));
    }

    // UUID prefix, as printed by `list`
    if identifier.len() >= 4 && identifier.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        let prefix = identifier.to_lowercase();
        let matches: Vec<&Task> = store
            .tasks()
            .iter()
            .filter(|t| t.id.to_string().starts_with(&prefix))
            .collect();
        match matches.len() {
            0 => {}
            1 => return Ok(matches[0].id),
            _ => return Err(format!("ID prefix '{}' is ambiguous", identifier)),
        }
    }

    // Search by title (case-insensitive)
    let matches: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| t.title.to_lowercase() == identifier.to_lowercase())
        .collect();

    match matches.len() {
        0 => Err(format!("No task found matching '{}'", identifier)),
        1 => Ok(matches[0].id),
        _ => {
            let mut error_msg = format!("Multiple tasks found with title '{}':\n", identifier);
            for task in matches {
                error_msg.push_str(&format!(
                    "  {}: {} ({})\n",
                    short_id(task.id),
                    task.title,
                    format_status(task.status)
                ));
            }
            error_msg.push_str("Please use the specific ID instead.");
            Err(error_msg)
        }
    }
}

/// First segment of a UUID, enough to identify a task on a small board.
pub fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Todo => "To Do",
        Status::InProgress => "In Progress",
        Status::Done => "Done",
        Status::Frozen => "Frozen",
    }
}

/// Format a creation timestamp in local time.
pub fn format_created(task: &Task) -> String {
    task.created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<10} {:<12} {:<17} {}",
        "ID", "Status", "Created", "Title"
    );
    for t in tasks {
        println!(
            "{:<10} {:<12} {:<17} {}",
            short_id(t.id),
            format_status(t.status),
            format_created(t),
            t.title
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = vec![
            Task::new("Buy milk".to_string()),
            Task::new("Walk dog".to_string()),
        ];

        let mut store = Store::open(dir.path());
        store.replace(tasks.clone()).unwrap();

        let reloaded = Store::open(dir.path());
        assert_eq!(reloaded.tasks(), tasks.as_slice());
    }

    #[test]
    fn test_open_missing_slot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_open_corrupt_slot_recovers_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TODOS_SLOT), "{not json!").unwrap();
        let store = Store::open(dir.path());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_resolve_by_title_and_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let task = Task::new("Buy milk".to_string());
        let id = task.id;
        let mut store = Store::open(dir.path());
        store.replace(vec![task]).unwrap();

        assert_eq!(resolve_task_identifier("buy MILK", &store), Ok(id));
        assert_eq!(resolve_task_identifier(&id.to_string(), &store), Ok(id));
        assert_eq!(resolve_task_identifier(&short_id(id), &store), Ok(id));
        assert!(resolve_task_identifier("no such task", &store).is_err());
    }

    #[test]
    fn test_resolve_ambiguous_title_asks_for_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path());
        store
            .replace(vec![
                Task::new("Dup".to_string()),
                Task::new("dup".to_string()),
            ])
            .unwrap();

        let err = resolve_task_identifier("dup", &store).unwrap_err();
        assert!(err.contains("Multiple tasks"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a longe…");
    }
}
