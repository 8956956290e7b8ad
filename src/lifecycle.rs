//! Task lifecycle engine.
//!
//! Every sanctioned mutation of the task collection lives here: create,
//! advance/regress along the `todo -> inProgress -> done` line, freeze and
//! unfreeze through the generic [`set_status`], and delete. Each operation
//! reads the current collection from the [`Store`], computes a new one, and
//! hands it back through `replace`, so the persisted slot is up to date by the
//! time the operation returns.
//!
//! Transition legality is a single table ([`transition`]) keyed on the
//! (current, requested) status pair; an illegal request is a lookup miss and
//! therefore a no-op, never a panic or a missed branch. Operations on an
//! unknown ID are likewise no-ops: the caller's view may be stale, and that is
//! treated as benign rather than an error.

use std::io;

use thiserror::Error;
use uuid::Uuid;

use crate::fields::Status;
use crate::store::Store;
use crate::task::Task;

/// Why a create request failed. Refusals leave the collection unchanged.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("a task titled '{0}' already exists")]
    DuplicateTitle(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What a legal status request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Plain move to the requested status.
    Enter(Status),
    /// Park the task; the current status must be remembered first.
    Freeze,
    /// Resume the task at its remembered status.
    Unfreeze,
}

/// Look up the (current, requested) pair in the transition table.
/// `None` means the request is illegal and must be ignored.
pub fn transition(current: Status, requested: Status) -> Option<Transition> {
    use Status::*;
    match (current, requested) {
        // Done tasks can never be frozen.
        (Done, Frozen) => None,
        (Todo | InProgress, Frozen) => Some(Transition::Freeze),
        // The only way out of frozen is the unfreeze request.
        (Frozen, Todo) => Some(Transition::Unfreeze),
        (Frozen, _) => None,
        (cur, req) if cur == req => None,
        (_, req) => Some(Transition::Enter(req)),
    }
}

/// Append a new task at the start of the line.
///
/// The title is trimmed; an empty result or a case-insensitive match against
/// an existing task's title refuses the request without touching the
/// collection. Titles of previously deleted tasks are free for reuse.
pub fn create(store: &mut Store, title: &str) -> Result<Uuid, CreateError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CreateError::EmptyTitle);
    }
    let is_duplicate = store
        .tasks()
        .iter()
        .any(|t| t.title.trim().to_lowercase() == title.to_lowercase());
    if is_duplicate {
        return Err(CreateError::DuplicateTitle(title.to_string()));
    }

    let task = Task::new(title.to_string());
    let id = task.id;
    let mut tasks = store.tasks().to_vec();
    tasks.push(task);
    store.replace(tasks)?;
    Ok(id)
}

/// Move a task one step forward along the line.
/// No-op at `done`, while frozen, or for an unknown ID.
pub fn advance(store: &mut Store, id: Uuid) -> io::Result<bool> {
    match store.get(id).and_then(|t| t.status.next_on_line()) {
        Some(next) => set_status(store, id, next),
        None => Ok(false),
    }
}

/// Move a task one step backward along the line.
/// No-op at `todo`, while frozen, or for an unknown ID.
pub fn regress(store: &mut Store, id: Uuid) -> io::Result<bool> {
    match store.get(id).and_then(|t| t.status.prev_on_line()) {
        Some(prev) => set_status(store, id, prev),
        None => Ok(false),
    }
}

/// Apply a status request through the transition table.
///
/// Freezing records the current status in `previous_status`; unfreezing (a
/// `todo` request against a frozen task) restores it. Returns whether the
/// collection changed.
pub fn set_status(store: &mut Store, id: Uuid, requested: Status) -> io::Result<bool> {
    let Some(current) = store.get(id).map(|t| t.status) else {
        return Ok(false);
    };
    let Some(step) = transition(current, requested) else {
        return Ok(false);
    };

    let tasks = store
        .tasks()
        .iter()
        .map(|t| {
            if t.id != id {
                return t.clone();
            }
            let mut t = t.clone();
            match step {
                Transition::Enter(status) => t.status = status,
                Transition::Freeze => {
                    t.previous_status = t.status;
                    t.status = Status::Frozen;
                }
                Transition::Unfreeze => t.status = t.previous_status,
            }
            t
        })
        .collect();
    store.replace(tasks)?;
    Ok(true)
}

/// Remove a task from the collection. Idempotent; unknown IDs are no-ops.
pub fn delete(store: &mut Store, id: Uuid) -> io::Result<bool> {
    if store.get(id).is_none() {
        return Ok(false);
    }
    let tasks = store.tasks().iter().filter(|t| t.id != id).cloned().collect();
    store.replace(tasks)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        (dir, store)
    }

    fn status_of(store: &Store, id: Uuid) -> Status {
        store.get(id).unwrap().status
    }

    #[test]
    fn test_create_starts_at_todo() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "  Buy milk  ").unwrap();
        let task = store.get(id).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.previous_status, Status::Todo);
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let (_dir, mut store) = empty_store();
        assert!(matches!(
            create(&mut store, "   "),
            Err(CreateError::EmptyTitle)
        ));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_title_variants() {
        let (_dir, mut store) = empty_store();
        create(&mut store, "Buy milk").unwrap();

        for variant in ["Buy milk", "buy milk", "BUY MILK", "  Buy Milk  "] {
            assert!(
                matches!(
                    create(&mut store, variant),
                    Err(CreateError::DuplicateTitle(_))
                ),
                "variant {variant:?} should be rejected"
            );
        }
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_deleted_title_is_reusable() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Buy milk").unwrap();
        delete(&mut store, id).unwrap();
        assert!(create(&mut store, "buy milk").is_ok());
    }

    #[test]
    fn test_advance_stops_at_done() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Task").unwrap();

        assert!(advance(&mut store, id).unwrap());
        assert_eq!(status_of(&store, id), Status::InProgress);
        assert!(advance(&mut store, id).unwrap());
        assert_eq!(status_of(&store, id), Status::Done);

        // Further advances never move past done.
        assert!(!advance(&mut store, id).unwrap());
        assert_eq!(status_of(&store, id), Status::Done);
    }

    #[test]
    fn test_regress_stops_at_todo() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Task").unwrap();
        advance(&mut store, id).unwrap();
        advance(&mut store, id).unwrap();

        assert!(regress(&mut store, id).unwrap());
        assert!(regress(&mut store, id).unwrap());
        assert_eq!(status_of(&store, id), Status::Todo);
        assert!(!regress(&mut store, id).unwrap());
        assert_eq!(status_of(&store, id), Status::Todo);
    }

    #[test]
    fn test_frozen_tasks_do_not_move_on_the_line() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Task").unwrap();
        set_status(&mut store, id, Status::Frozen).unwrap();

        assert!(!advance(&mut store, id).unwrap());
        assert!(!regress(&mut store, id).unwrap());
        assert_eq!(status_of(&store, id), Status::Frozen);
    }

    #[test]
    fn test_freeze_remembers_and_unfreeze_restores() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Task").unwrap();
        advance(&mut store, id).unwrap(); // inProgress

        assert!(set_status(&mut store, id, Status::Frozen).unwrap());
        let task = store.get(id).unwrap();
        assert_eq!(task.status, Status::Frozen);
        assert_eq!(task.previous_status, Status::InProgress);

        // The unfreeze request is a plain `todo` target; it restores the
        // remembered status, not the start of the line.
        assert!(set_status(&mut store, id, Status::Todo).unwrap());
        assert_eq!(status_of(&store, id), Status::InProgress);
    }

    #[test]
    fn test_refreezing_overwrites_previous_status() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Task").unwrap();

        set_status(&mut store, id, Status::Frozen).unwrap();
        set_status(&mut store, id, Status::Todo).unwrap();
        advance(&mut store, id).unwrap(); // inProgress
        set_status(&mut store, id, Status::Frozen).unwrap();

        assert_eq!(store.get(id).unwrap().previous_status, Status::InProgress);
    }

    #[test]
    fn test_done_is_freeze_proof() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Task").unwrap();
        set_status(&mut store, id, Status::Done).unwrap();

        assert!(!set_status(&mut store, id, Status::Frozen).unwrap());
        assert_eq!(status_of(&store, id), Status::Done);
    }

    #[test]
    fn test_frozen_cannot_jump_off_the_line() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Task").unwrap();
        set_status(&mut store, id, Status::Frozen).unwrap();

        assert!(!set_status(&mut store, id, Status::Done).unwrap());
        assert!(!set_status(&mut store, id, Status::InProgress).unwrap());
        assert_eq!(status_of(&store, id), Status::Frozen);
    }

    #[test]
    fn test_unknown_id_is_a_no_op_everywhere() {
        let (_dir, mut store) = empty_store();
        create(&mut store, "Task").unwrap();
        let ghost = Uuid::new_v4();

        assert!(!advance(&mut store, ghost).unwrap());
        assert!(!regress(&mut store, ghost).unwrap());
        assert!(!set_status(&mut store, ghost, Status::Done).unwrap());
        assert!(!delete(&mut store, ghost).unwrap());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Task").unwrap();

        assert!(delete(&mut store, id).unwrap());
        assert!(!delete(&mut store, id).unwrap());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_full_scenario() {
        let (_dir, mut store) = empty_store();
        let id = create(&mut store, "Buy milk").unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(status_of(&store, id), Status::Todo);

        advance(&mut store, id).unwrap();
        assert_eq!(status_of(&store, id), Status::InProgress);

        set_status(&mut store, id, Status::Frozen).unwrap();
        assert_eq!(status_of(&store, id), Status::Frozen);
        assert_eq!(store.get(id).unwrap().previous_status, Status::InProgress);

        set_status(&mut store, id, Status::Todo).unwrap();
        assert_eq!(status_of(&store, id), Status::InProgress);

        advance(&mut store, id).unwrap();
        assert_eq!(status_of(&store, id), Status::Done);

        set_status(&mut store, id, Status::Frozen).unwrap();
        assert_eq!(status_of(&store, id), Status::Done);
    }

    #[test]
    fn test_mutations_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let mut store = Store::open(dir.path());
            let id = create(&mut store, "Persisted").unwrap();
            advance(&mut store, id).unwrap();
            set_status(&mut store, id, Status::Frozen).unwrap();
            id
        };

        let mut store = Store::open(dir.path());
        let task = store.get(id).unwrap();
        assert_eq!(task.status, Status::Frozen);
        assert_eq!(task.previous_status, Status::InProgress);

        // Unfreeze still restores after a reload.
        set_status(&mut store, id, Status::Todo).unwrap();
        assert_eq!(store.get(id).unwrap().status, Status::InProgress);
    }
}
