//! Task List State
//!
//! The one in-memory collection a list view renders from, kept in a
//! `reactive_stores` store for field-level reactivity.
//!
//! The collection mirrors the last accepted fetch plus optimistic patches
//! applied since. Every patch bumps `mutation_seq`; a fetch that was issued
//! before the latest patch is dropped instead of overwriting it, and the
//! next poll reconciles.

use std::future::Future;

use leptos::prelude::{RwSignal, Update};
use reactive_stores::Store;

use crate::models::{fallback_key, Task, TaskId, TaskPatch};

/// Transient inline message. The token lets a delayed clear target only
/// the message it was scheduled for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flash {
    message: Option<String>,
    token: u64,
}

impl Flash {
    /// Show a message, returning the token to clear it with
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.token += 1;
        self.message = Some(message.into());
        self.token
    }

    /// Clear the message if it is still the one `token` refers to
    pub fn clear(&mut self, token: u64) -> bool {
        if self.token == token && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    /// Drop any message immediately
    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Somewhere a [`Flash`] lives. `None` means the owner is gone (a
/// disposed view) and the write was skipped.
pub trait FlashSlot {
    fn try_flash<R>(&self, f: impl FnOnce(&mut Flash) -> R) -> Option<R>;
}

impl FlashSlot for RwSignal<Flash> {
    fn try_flash<R>(&self, f: impl FnOnce(&mut Flash) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl FlashSlot for Store<TaskListState> {
    fn try_flash<R>(&self, f: impl FnOnce(&mut Flash) -> R) -> Option<R> {
        self.try_update(|state| f(&mut state.error))
    }
}

#[cfg(test)]
impl FlashSlot for std::cell::RefCell<Flash> {
    fn try_flash<R>(&self, f: impl FnOnce(&mut Flash) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Show `message`, wait out `delay`, then clear it unless a newer message
/// has replaced it in the meantime.
///
/// Returns whether this call cleared its own message.
pub async fn flash_message<S: FlashSlot>(
    slot: &S,
    message: impl Into<String>,
    delay: impl Future<Output = ()>,
) -> bool {
    let message = message.into();
    let Some(token) = slot.try_flash(|flash| flash.show(message)) else {
        return false;
    };
    delay.await;
    slot.try_flash(|flash| flash.clear(token)).unwrap_or(false)
}

/// Task currently open in the inline editor, with its unsaved buffers
#[derive(Clone, Debug, PartialEq)]
pub struct EditSession {
    pub id: TaskId,
    pub title: String,
    pub description: String,
}

/// A confirmed change to mirror locally
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    Patch { id: TaskId, patch: TaskPatch },
    Remove { id: TaskId },
}

/// Issued when a fetch starts; stamps the mutation sequence it saw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    seen_seq: u64,
}

#[derive(Clone, Debug, Default, Store)]
pub struct TaskListState {
    /// Newest first
    pub tasks: Vec<Task>,
    pub error: Flash,
    pub editing: Option<EditSession>,
    /// Count of optimistic mutations applied so far
    pub mutation_seq: u64,
}

impl TaskListState {
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket {
            seen_seq: self.mutation_seq,
        }
    }

    /// Replace the collection with a fetch result.
    ///
    /// Returns `false` (and keeps the current collection) when a mutation
    /// was applied after the ticket was issued.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, tasks: Vec<Task>, now_millis: i64) -> bool {
        if ticket.seen_seq != self.mutation_seq {
            return false;
        }
        let mut tasks: Vec<Task> = tasks
            .into_iter()
            .enumerate()
            .map(|(index, mut task)| {
                task.unique_key = match &task.id {
                    Some(id) => id.to_string(),
                    None => fallback_key(index, now_millis),
                };
                task
            })
            .collect();
        tasks.reverse();
        self.tasks = tasks;
        true
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id.as_ref() == Some(id))
    }

    /// Mirror a confirmed mutation into the local collection
    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::Patch { id, patch } => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id.as_ref() == Some(&id)) {
                    task.apply(&patch);
                }
            }
            Mutation::Remove { id } => {
                self.tasks.retain(|t| t.id.as_ref() != Some(&id));
                if self.editing.as_ref().is_some_and(|s| s.id == id) {
                    self.editing = None;
                }
            }
        }
        self.mutation_seq += 1;
    }

    /// Open the editor on `task`, discarding any other open session.
    ///
    /// Tasks the store has not assigned an id to cannot be edited.
    pub fn start_editing(&mut self, task: &Task) -> bool {
        match &task.id {
            Some(id) => {
                self.editing = Some(EditSession {
                    id: id.clone(),
                    title: task.title.clone(),
                    description: task.description.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    pub fn set_edit_title(&mut self, title: String) {
        if let Some(session) = self.editing.as_mut() {
            session.title = title;
        }
    }

    pub fn set_edit_description(&mut self, description: String) {
        if let Some(session) = self.editing.as_mut() {
            session.description = description;
        }
    }

    pub fn is_editing(&self, id: &TaskId) -> bool {
        self.editing.as_ref().is_some_and(|s| &s.id == id)
    }

    /// Close the session for `id`, if it is the open one
    pub fn finish_editing(&mut self, id: &TaskId) {
        if self.is_editing(id) {
            self.editing = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::cell::RefCell;
    use std::time::Duration;
    use tokio::time::sleep;

    /// Owner that has already been dropped
    struct Disposed;

    impl FlashSlot for Disposed {
        fn try_flash<R>(&self, _f: impl FnOnce(&mut Flash) -> R) -> Option<R> {
            None
        }
    }

    fn shown(slot: &RefCell<Flash>) -> Option<String> {
        let flash = slot.borrow();
        flash.message().map(str::to_string)
    }

    fn make_task(id: Option<&str>, title: &str) -> Task {
        Task {
            id: id.map(TaskId::new),
            title: title.to_string(),
            description: format!("{} details", title),
            done: false,
            created_at: None,
            completed_date: None,
            unique_key: String::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-05-02T10:00:00Z".parse().unwrap()
    }

    fn loaded(tasks: Vec<Task>) -> TaskListState {
        let mut state = TaskListState::default();
        let ticket = state.begin_fetch();
        assert!(state.apply_fetch(ticket, tasks, 1000));
        state
    }

    #[test]
    fn test_fetch_replaces_newest_first_with_keys() {
        let mut state = loaded(vec![make_task(Some("1"), "old")]);
        let ticket = state.begin_fetch();
        let applied = state.apply_fetch(
            ticket,
            vec![make_task(Some("1"), "first"), make_task(None, "second"), make_task(Some("3"), "third")],
            1700,
        );

        assert!(applied);
        let titles: Vec<_> = state.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
        let keys: Vec<_> = state.tasks.iter().map(|t| t.unique_key.as_str()).collect();
        assert_eq!(keys, vec!["3", "todo-1-1700", "1"]);
    }

    #[test]
    fn test_stale_fetch_does_not_overwrite_patch() {
        let mut state = loaded(vec![make_task(Some("1"), "Buy milk")]);
        let ticket = state.begin_fetch();

        state.apply(Mutation::Patch {
            id: TaskId::new("1"),
            patch: TaskPatch::status(true, now()),
        });

        // Response still shows the pre-toggle record
        let applied = state.apply_fetch(ticket, vec![make_task(Some("1"), "Buy milk")], 2000);
        assert!(!applied);
        assert!(state.tasks[0].done);

        let ticket = state.begin_fetch();
        assert!(state.apply_fetch(ticket, vec![make_task(Some("1"), "Buy milk")], 3000));
        assert!(!state.tasks[0].done);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut state = loaded(vec![make_task(Some("1"), "Buy milk")]);
        let id = TaskId::new("1");

        state.apply(Mutation::Patch { id: id.clone(), patch: TaskPatch::status(true, now()) });
        let task = state.task(&id).unwrap();
        assert!(task.done);
        assert_eq!(task.completed_date, Some(now()));

        state.apply(Mutation::Patch { id: id.clone(), patch: TaskPatch::status(false, now()) });
        let task = state.task(&id).unwrap();
        assert!(!task.done);
        assert_eq!(task.completed_date, None);
        assert_eq!(state.mutation_seq, 2);
    }

    #[test]
    fn test_remove_drops_task_and_its_edit_session() {
        let mut state = loaded(vec![make_task(Some("1"), "a"), make_task(Some("2"), "b")]);
        let target = state.task(&TaskId::new("2")).cloned().unwrap();
        assert!(state.start_editing(&target));

        state.apply(Mutation::Remove { id: TaskId::new("2") });
        assert!(state.task(&TaskId::new("2")).is_none());
        assert_eq!(state.tasks.len(), 1);
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_edit_session_moves_between_tasks() {
        let mut state = loaded(vec![make_task(Some("1"), "a"), make_task(Some("2"), "b")]);
        let first = state.task(&TaskId::new("1")).cloned().unwrap();
        let second = state.task(&TaskId::new("2")).cloned().unwrap();

        state.start_editing(&first);
        state.set_edit_title("unsaved".to_string());
        state.start_editing(&second);

        let session = state.editing.clone().unwrap();
        assert_eq!(session.id, TaskId::new("2"));
        assert_eq!(session.title, "b");
        assert!(!state.is_editing(&TaskId::new("1")));

        state.set_edit_description("new details".to_string());
        assert_eq!(state.editing.as_ref().unwrap().description, "new details");

        state.cancel_editing();
        assert!(state.editing.is_none());
        // Cancel leaves the record alone
        assert_eq!(state.task(&TaskId::new("2")).unwrap().title, "b");
    }

    #[test]
    fn test_task_without_id_is_not_editable() {
        let mut state = loaded(vec![make_task(None, "pending")]);
        let task = state.tasks[0].clone();
        assert!(!state.start_editing(&task));
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_flash_clear_only_matches_its_token() {
        let mut flash = Flash::default();
        let first = flash.show("Could not delete the task. Please try again.");
        let second = flash.show("Could not update the task. Please try again.");

        assert!(!flash.clear(first));
        assert_eq!(flash.message(), Some("Could not update the task. Please try again."));
        assert!(flash.clear(second));
        assert_eq!(flash.message(), None);
        assert!(!flash.clear(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flash_message_clears_after_delay() {
        let slot = RefCell::new(Flash::default());

        let flashed = flash_message(&slot, "Could not load tasks.", sleep(Duration::from_millis(3000)));
        let during = async {
            sleep(Duration::from_millis(2900)).await;
            shown(&slot)
        };
        let (cleared, during) = tokio::join!(flashed, during);

        assert_eq!(during.as_deref(), Some("Could not load tasks."));
        assert!(cleared);
        assert_eq!(shown(&slot), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_older_timer_keeps_newer_message() {
        let slot = RefCell::new(Flash::default());

        let first = flash_message(&slot, "first", sleep(Duration::from_millis(3000)));
        let second = async {
            sleep(Duration::from_millis(1000)).await;
            flash_message(&slot, "second", sleep(Duration::from_millis(3000))).await
        };
        let after_first_timer = async {
            sleep(Duration::from_millis(3500)).await;
            shown(&slot)
        };
        let (first_cleared, second_cleared, after_first_timer) = tokio::join!(first, second, after_first_timer);

        assert!(!first_cleared);
        assert_eq!(after_first_timer.as_deref(), Some("second"));
        assert!(second_cleared);
        assert_eq!(shown(&slot), None);
    }

    #[tokio::test]
    async fn test_flash_message_on_disposed_owner_is_noop() {
        assert!(!flash_message(&Disposed, "late", async {}).await);
    }
}
