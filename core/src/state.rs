//! Client-side list and form state as explicit, I/O-free values.
//!
//! # Design
//! Every network-backed operation is split in two, mirroring the
//! `build_*`/`parse_*` split of `TodoClient`:
//!
//! - `begin_*` checks and sets the operation's marker, then returns a ticket
//!   describing the request to send.
//! - `finish_*` consumes that ticket together with the request's outcome,
//!   reconciles the local list, and clears the marker on every path.
//!
//! Nothing here awaits, so the async drivers in `controller` only hold the
//! state lock inside `begin_*`/`finish_*` and never across a request.
//!
//! Markers are single slots: at most one delete, one toggle, and one save in
//! flight, and at most one edit buffer. A `begin_*` whose slot is taken is
//! rejected with `ActionError::Busy` rather than queued. `Busy` is returned to
//! the caller only; the control it came from is disabled anyway, so it never
//! lands in the error slot.
//!
//! The current error is one string. Every failure overwrites it and every
//! operation that reaches the network clears it when it starts.

use tracing::debug;

use crate::error::{ActionError, ApiError};
use crate::types::{Todo, TodoId, UpdateTodo};

pub const LOAD_FAILED: &str = "Failed to load todos";
pub const TOGGLE_FAILED: &str = "Failed to update todo";
pub const DELETE_FAILED: &str = "Failed to delete todo";
pub const SAVE_FAILED: &str = "Failed to save todo";
pub const CREATE_FAILED: &str = "Failed to create todo";
pub const TITLE_REQUIRED: &str = "Title is required";

/// Working copy of one todo's text while it is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub id: TodoId,
    pub title: String,
    pub description: String,
}

/// Issued by `TaskList::begin_load`. Loads are sequenced so that a response
/// overtaken by a newer load is dropped instead of clobbering fresher data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ToggleTicket {
    pub id: TodoId,
    /// The locally computed new value; applied whatever the server echoes.
    pub completed: bool,
}

impl ToggleTicket {
    pub fn patch(&self) -> UpdateTodo {
        UpdateTodo::completed(self.completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RemoveTicket {
    pub id: TodoId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct CommitTicket {
    pub id: TodoId,
    pub title: String,
    pub description: String,
}

impl CommitTicket {
    pub fn patch(&self) -> UpdateTodo {
        UpdateTodo::content(self.title.clone(), self.description.clone())
    }
}

/// An in-flight operation's claim on a `TaskList` slot, used to release the
/// slot when the operation is abandoned before its response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Load(LoadTicket),
    Toggle(TodoId),
    Remove(TodoId),
    Save,
}

impl LoadTicket {
    pub fn marker(&self) -> Marker {
        Marker::Load(*self)
    }
}

impl ToggleTicket {
    pub fn marker(&self) -> Marker {
        Marker::Toggle(self.id)
    }
}

impl RemoveTicket {
    pub fn marker(&self) -> Marker {
        Marker::Remove(self.id)
    }
}

impl CommitTicket {
    pub fn marker(&self) -> Marker {
        Marker::Save
    }
}

/// The list view's state: the synced todos plus per-operation markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Todo>,
    loading: bool,
    error: Option<String>,
    deleting: Option<TodoId>,
    toggling: Option<TodoId>,
    saving: bool,
    editing: Option<EditBuffer>,
    load_seq: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Todo] {
        &self.tasks
    }

    pub fn task(&self, id: TodoId) -> Option<&Todo> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn deleting(&self) -> Option<TodoId> {
        self.deleting
    }

    pub fn toggling(&self) -> Option<TodoId> {
        self.toggling
    }

    pub fn is_deleting(&self, id: TodoId) -> bool {
        self.deleting == Some(id)
    }

    pub fn is_toggling(&self, id: TodoId) -> bool {
        self.toggling == Some(id)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn editing(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: TodoId) -> bool {
        self.editing.as_ref().is_some_and(|b| b.id == id)
    }

    /// Number of todos not yet completed.
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    fn reject<T>(&mut self, err: ActionError, context: &str) -> Result<T, ActionError> {
        self.error = Some(err.user_message(context));
        Err(err)
    }

    fn fail(&mut self, err: ApiError, context: &str) -> Result<(), ActionError> {
        self.reject(ActionError::Api(err), context)
    }

    /// Frees the slot held by an abandoned operation without touching the
    /// list or the current error.
    pub fn release(&mut self, marker: Marker) {
        match marker {
            Marker::Load(ticket) => {
                if ticket.seq == self.load_seq {
                    self.loading = false;
                }
            }
            Marker::Toggle(id) => {
                if self.toggling == Some(id) {
                    self.toggling = None;
                }
            }
            Marker::Remove(id) => {
                if self.deleting == Some(id) {
                    self.deleting = None;
                }
            }
            Marker::Save => self.saving = false,
        }
    }

    // --- load ---

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.loading = true;
        self.error = None;
        LoadTicket { seq: self.load_seq }
    }

    /// Replaces the list wholesale on success. On failure the previous list
    /// stays in place. A response overtaken by a newer load leaves the state
    /// alone, but its own failure is still returned.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Todo>, ApiError>) -> Result<(), ActionError> {
        if ticket.seq != self.load_seq {
            debug!(seq = ticket.seq, latest = self.load_seq, "dropping stale list response");
            return result.map(drop).map_err(ActionError::Api);
        }
        self.loading = false;

        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                let orphaned = self.editing.as_ref().is_some_and(|b| self.task(b.id).is_none());
                if orphaned {
                    self.editing = None;
                }
                Ok(())
            }
            Err(err) => self.fail(err, LOAD_FAILED),
        }
    }

    // --- toggle ---

    pub fn begin_toggle(&mut self, id: TodoId) -> Result<ToggleTicket, ActionError> {
        if self.toggling.is_some() {
            return Err(ActionError::Busy);
        }
        let Some(task) = self.task(id) else {
            return self.reject(ActionError::UnknownTask(id), TOGGLE_FAILED);
        };
        let ticket = ToggleTicket {
            id,
            completed: !task.completed,
        };
        self.toggling = Some(id);
        self.error = None;
        Ok(ticket)
    }

    pub fn finish_toggle(&mut self, ticket: ToggleTicket, result: Result<Todo, ApiError>) -> Result<(), ActionError> {
        if self.toggling == Some(ticket.id) {
            self.toggling = None;
        }

        match result {
            Ok(_echo) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == ticket.id) {
                    task.completed = ticket.completed;
                }
                Ok(())
            }
            Err(err) => self.fail(err, TOGGLE_FAILED),
        }
    }

    // --- remove ---

    pub fn begin_remove(&mut self, id: TodoId) -> Result<RemoveTicket, ActionError> {
        if self.deleting.is_some() {
            return Err(ActionError::Busy);
        }
        if self.task(id).is_none() {
            return self.reject(ActionError::UnknownTask(id), DELETE_FAILED);
        }
        self.deleting = Some(id);
        self.error = None;
        Ok(RemoveTicket { id })
    }

    /// Drops the todo only once the server confirmed the delete.
    pub fn finish_remove(&mut self, ticket: RemoveTicket, result: Result<(), ApiError>) -> Result<(), ActionError> {
        if self.deleting == Some(ticket.id) {
            self.deleting = None;
        }

        match result {
            Ok(()) => {
                self.tasks.retain(|t| t.id != ticket.id);
                if self.is_editing(ticket.id) {
                    self.editing = None;
                }
                Ok(())
            }
            Err(err) => self.fail(err, DELETE_FAILED),
        }
    }

    // --- edit ---

    /// Snapshots the todo's text into the edit buffer. Re-entering the edit
    /// already in progress is a no-op; starting a second one is rejected and
    /// leaves the current target untouched.
    pub fn begin_edit(&mut self, id: TodoId) -> Result<(), ActionError> {
        if let Some(buffer) = &self.editing {
            if buffer.id == id {
                return Ok(());
            }
            let current = buffer.id;
            return self.reject(ActionError::EditInProgress(current), SAVE_FAILED);
        }
        let Some(task) = self.task(id) else {
            return self.reject(ActionError::UnknownTask(id), SAVE_FAILED);
        };
        let buffer = EditBuffer {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
        };
        self.editing = Some(buffer);
        Ok(())
    }

    /// Returns false when no edit is active.
    pub fn edit_title(&mut self, title: impl Into<String>) -> bool {
        match &mut self.editing {
            Some(buffer) => {
                buffer.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Returns false when no edit is active.
    pub fn edit_description(&mut self, description: impl Into<String>) -> bool {
        match &mut self.editing {
            Some(buffer) => {
                buffer.description = description.into();
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn begin_commit(&mut self, id: TodoId) -> Result<CommitTicket, ActionError> {
        let Some(buffer) = self.editing.as_ref().filter(|b| b.id == id) else {
            return self.reject(ActionError::NotEditing(id), SAVE_FAILED);
        };
        let title = buffer.title.trim().to_string();
        let description = buffer.description.trim().to_string();

        if title.is_empty() {
            return self.reject(ActionError::Validation(TITLE_REQUIRED.to_string()), SAVE_FAILED);
        }
        if self.saving {
            return Err(ActionError::Busy);
        }

        self.saving = true;
        self.error = None;
        Ok(CommitTicket { id, title, description })
    }

    /// Applies the server's echo, not the buffer. The buffer survives a
    /// failure so the edit can be retried or cancelled.
    pub fn finish_commit(&mut self, ticket: CommitTicket, result: Result<Todo, ApiError>) -> Result<(), ActionError> {
        self.saving = false;

        match result {
            Ok(saved) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == ticket.id) {
                    task.title = saved.title;
                    task.description = saved.description;
                }
                if self.is_editing(ticket.id) {
                    self.editing = None;
                }
                Ok(())
            }
            Err(err) => self.fail(err, SAVE_FAILED),
        }
    }
}

/// Text typed into the creation form but not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SubmitTicket {
    pub title: String,
    pub description: String,
}

/// The creation form's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    draft: Draft,
    submitting: bool,
    error: Option<String>,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.draft.title.trim().is_empty()
    }

    fn reject<T>(&mut self, err: ActionError) -> Result<T, ActionError> {
        self.error = Some(err.user_message(CREATE_FAILED));
        Err(err)
    }

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, ActionError> {
        if self.submitting {
            return Err(ActionError::Busy);
        }
        let title = self.draft.title.trim();
        if title.is_empty() {
            return self.reject(ActionError::Validation(TITLE_REQUIRED.to_string()));
        }

        let ticket = SubmitTicket {
            title: title.to_string(),
            description: self.draft.description.trim().to_string(),
        };
        self.submitting = true;
        self.error = None;
        Ok(ticket)
    }

    /// Frees the in-flight flag of an abandoned submission; the draft stays.
    pub fn release(&mut self) {
        self.submitting = false;
    }

    /// Clears the draft on success; keeps it on failure so no input is lost.
    pub fn finish_submit(&mut self, _ticket: SubmitTicket, result: Result<Todo, ApiError>) -> Result<Todo, ActionError> {
        self.submitting = false;

        match result {
            Ok(created) => {
                self.draft = Draft::default();
                Ok(created)
            }
            Err(err) => self.reject(ActionError::Api(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn todo(id: TodoId, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: format!("{title} details"),
            completed,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    fn loaded(tasks: Vec<Todo>) -> TaskList {
        let mut list = TaskList::new();
        let ticket = list.begin_load();
        list.finish_load(ticket, Ok(tasks)).unwrap();
        list
    }

    fn server_down() -> ApiError {
        ApiError::Http {
            status: 500,
            body: String::new(),
        }
    }

    #[test]
    fn load_sets_and_clears_loading_flag() {
        let mut list = TaskList::new();
        let ticket = list.begin_load();
        assert!(list.is_loading());
        list.finish_load(ticket, Ok(vec![todo(1, "A", false)])).unwrap();
        assert!(!list.is_loading());
        assert_eq!(list.tasks().len(), 1);
    }

    #[test]
    fn failed_load_keeps_previous_list() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        let ticket = list.begin_load();
        assert!(list.finish_load(ticket, Err(server_down())).is_err());
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.error(), Some(LOAD_FAILED));
        assert!(!list.is_loading());
    }

    #[test]
    fn stale_load_response_is_dropped() {
        let mut list = TaskList::new();
        let older = list.begin_load();
        let newer = list.begin_load();

        list.finish_load(newer, Ok(vec![todo(2, "fresh", false)])).unwrap();
        list.finish_load(older, Ok(vec![todo(1, "stale", false)])).unwrap();

        assert_eq!(list.tasks()[0].title, "fresh");
        assert!(!list.is_loading());
    }

    #[test]
    fn stale_load_failure_is_reported_without_touching_state() {
        let mut list = TaskList::new();
        let older = list.begin_load();
        let newer = list.begin_load();
        list.finish_load(newer, Ok(vec![todo(2, "fresh", false)])).unwrap();

        assert_eq!(
            list.finish_load(older, Err(server_down())),
            Err(ActionError::Api(server_down()))
        );
        assert_eq!(list.error(), None);
        assert_eq!(list.tasks()[0].title, "fresh");
    }

    #[test]
    fn loading_stays_set_until_newest_load_finishes() {
        let mut list = TaskList::new();
        let older = list.begin_load();
        let newer = list.begin_load();
        list.finish_load(older, Ok(Vec::new())).unwrap();
        assert!(list.is_loading());
        list.finish_load(newer, Ok(Vec::new())).unwrap();
        assert!(!list.is_loading());
    }

    #[test]
    fn reload_drops_edit_buffer_of_vanished_task() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        list.begin_edit(1).unwrap();
        let ticket = list.begin_load();
        list.finish_load(ticket, Ok(vec![todo(2, "B", false)])).unwrap();
        assert!(list.editing().is_none());
    }

    #[test]
    fn toggle_applies_local_negation_over_server_echo() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        let ticket = list.begin_toggle(1).unwrap();
        assert!(list.is_toggling(1));
        assert_eq!(ticket.patch(), UpdateTodo::completed(true));

        // Server echoes a stale value; the local negation still wins.
        list.finish_toggle(ticket, Ok(todo(1, "A", false))).unwrap();
        assert!(list.task(1).unwrap().completed);
        assert_eq!(list.toggling(), None);
    }

    #[test]
    fn failed_toggle_leaves_task_and_clears_marker() {
        let mut list = loaded(vec![todo(1, "A", true)]);
        let ticket = list.begin_toggle(1).unwrap();
        assert!(list.finish_toggle(ticket, Err(ApiError::NotFound)).is_err());
        assert!(list.task(1).unwrap().completed);
        assert_eq!(list.toggling(), None);
        assert_eq!(list.error(), Some(TOGGLE_FAILED));
    }

    #[test]
    fn second_toggle_while_one_in_flight_is_busy() {
        let mut list = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        let _first = list.begin_toggle(1).unwrap();
        assert_eq!(list.begin_toggle(2), Err(ActionError::Busy));
        assert_eq!(list.toggling(), Some(1));
        assert_eq!(list.error(), None);
    }

    #[test]
    fn busy_rejection_leaves_no_error_after_success() {
        let mut list = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        let first = list.begin_remove(1).unwrap();
        assert_eq!(list.begin_remove(2), Err(ActionError::Busy));
        list.finish_remove(first, Ok(())).unwrap();
        assert_eq!(list.error(), None);
        assert!(list.task(2).is_some());
    }

    #[test]
    fn toggle_unknown_task_is_rejected() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        assert_eq!(list.begin_toggle(8), Err(ActionError::UnknownTask(8)));
        assert_eq!(list.toggling(), None);
        assert!(list.error().is_some());
    }

    #[test]
    fn remove_drops_task_only_on_success() {
        let mut list = loaded(vec![todo(1, "A", false), todo(5, "E", false)]);

        let ticket = list.begin_remove(5).unwrap();
        assert!(list.is_deleting(5));
        assert!(list.finish_remove(ticket, Err(server_down())).is_err());
        assert!(list.task(5).is_some());
        assert_eq!(list.deleting(), None);
        assert_eq!(list.error(), Some(DELETE_FAILED));

        let ticket = list.begin_remove(5).unwrap();
        assert_eq!(list.error(), None);
        list.finish_remove(ticket, Ok(())).unwrap();
        assert!(list.task(5).is_none());
        assert_eq!(list.tasks().len(), 1);
    }

    #[test]
    fn edit_snapshots_current_text() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        list.begin_edit(1).unwrap();
        assert_eq!(
            list.editing(),
            Some(&EditBuffer {
                id: 1,
                title: "A".to_string(),
                description: "A details".to_string(),
            })
        );
    }

    #[test]
    fn second_edit_does_not_replace_target() {
        let mut list = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        list.begin_edit(1).unwrap();
        list.edit_title("A2");

        assert_eq!(list.begin_edit(2), Err(ActionError::EditInProgress(1)));
        let buffer = list.editing().unwrap();
        assert_eq!(buffer.id, 1);
        assert_eq!(buffer.title, "A2");
    }

    #[test]
    fn reentering_same_edit_keeps_buffer() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        list.begin_edit(1).unwrap();
        list.edit_title("typed");
        list.begin_edit(1).unwrap();
        assert_eq!(list.editing().unwrap().title, "typed");
    }

    #[test]
    fn cancel_discards_buffer() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        list.begin_edit(1).unwrap();
        list.edit_title("changed");
        list.cancel_edit();
        assert!(list.editing().is_none());
        assert_eq!(list.task(1).unwrap().title, "A");
        assert!(!list.edit_title("orphan"));
    }

    #[test]
    fn blank_title_commit_is_rejected_without_touching_task() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        list.begin_edit(1).unwrap();
        list.edit_title("   ");
        let before = list.task(1).cloned();

        let err = list.begin_commit(1).unwrap_err();
        assert!(err.is_validation());
        assert!(!list.is_saving());
        assert_eq!(list.task(1).cloned(), before);
        assert_eq!(list.error(), Some(TITLE_REQUIRED));
        assert!(list.is_editing(1));
    }

    #[test]
    fn commit_applies_server_echo_not_buffer() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        list.begin_edit(1).unwrap();
        list.edit_title("  Mine  ");
        list.edit_description("local");

        let ticket = list.begin_commit(1).unwrap();
        assert_eq!(ticket.patch(), UpdateTodo::content("Mine", "local"));
        assert!(list.is_saving());

        let mut echoed = todo(1, "Theirs", false);
        echoed.description = "server".to_string();
        list.finish_commit(ticket, Ok(echoed)).unwrap();

        let task = list.task(1).unwrap();
        assert_eq!(task.title, "Theirs");
        assert_eq!(task.description, "server");
        assert!(list.editing().is_none());
        assert!(!list.is_saving());
    }

    #[test]
    fn failed_commit_keeps_buffer_for_retry() {
        let mut list = loaded(vec![todo(1, "A", false)]);
        list.begin_edit(1).unwrap();
        list.edit_title("B");
        let ticket = list.begin_commit(1).unwrap();
        assert!(list.finish_commit(ticket, Err(server_down())).is_err());

        assert!(list.is_editing(1));
        assert_eq!(list.editing().unwrap().title, "B");
        assert_eq!(list.task(1).unwrap().title, "A");
        assert!(!list.is_saving());
        assert_eq!(list.error(), Some(SAVE_FAILED));
    }

    #[test]
    fn commit_for_other_task_is_not_editing() {
        let mut list = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        list.begin_edit(1).unwrap();
        assert_eq!(list.begin_commit(2), Err(ActionError::NotEditing(2)));
    }

    #[test]
    fn delete_and_edit_of_different_tasks_coexist() {
        let mut list = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        list.begin_edit(1).unwrap();
        let ticket = list.begin_remove(2).unwrap();
        list.finish_remove(ticket, Ok(())).unwrap();
        assert!(list.is_editing(1));
        assert_eq!(list.tasks().len(), 1);
    }

    #[test]
    fn release_frees_abandoned_slots() {
        let mut list = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        let toggle = list.begin_toggle(1).unwrap();
        let remove = list.begin_remove(2).unwrap();
        let load = list.begin_load();

        list.release(toggle.marker());
        list.release(remove.marker());
        list.release(load.marker());

        assert_eq!(list.toggling(), None);
        assert_eq!(list.deleting(), None);
        assert!(!list.is_loading());
        assert_eq!(list.tasks().len(), 2);
        assert_eq!(list.error(), None);
    }

    #[test]
    fn releasing_superseded_load_keeps_loading() {
        let mut list = TaskList::new();
        let older = list.begin_load();
        let _newer = list.begin_load();
        list.release(older.marker());
        assert!(list.is_loading());
    }

    #[test]
    fn remaining_counts_open_tasks() {
        let list = loaded(vec![todo(1, "A", false), todo(2, "B", true), todo(3, "C", false)]);
        assert_eq!(list.remaining(), 2);
    }

    #[test]
    fn form_rejects_blank_title() {
        let mut form = CreateForm::new();
        form.set_title("  ");
        form.set_description("x");
        assert!(!form.can_submit());
        let err = form.begin_submit().unwrap_err();
        assert!(err.is_validation());
        assert!(!form.is_submitting());
        assert_eq!(form.error(), Some(TITLE_REQUIRED));
    }

    #[test]
    fn form_submission_trims_and_clears_draft() {
        let mut form = CreateForm::new();
        form.set_title("  Buy milk ");
        form.set_description(" 2 litres ");
        let ticket = form.begin_submit().unwrap();
        assert_eq!(ticket.title, "Buy milk");
        assert_eq!(ticket.description, "2 litres");
        assert!(form.is_submitting());
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(ActionError::Busy));

        form.finish_submit(ticket, Ok(todo(3, "Buy milk", false))).unwrap();
        assert_eq!(form.draft(), &Draft::default());
        assert!(!form.is_submitting());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn failed_submission_preserves_draft() {
        let mut form = CreateForm::new();
        form.set_title("Walk dog");
        let ticket = form.begin_submit().unwrap();
        assert!(form.finish_submit(ticket, Err(server_down())).is_err());
        assert_eq!(form.draft().title, "Walk dog");
        assert_eq!(form.error(), Some(CREATE_FAILED));
        assert!(!form.is_submitting());
    }
}
