//! Async drivers that run `state` operations against a `TodoApi`.
//!
//! # Design
//! Each operation locks the shared state only to call `begin_*` and then
//! `finish_*`; the request itself runs unlocked. Operations on different
//! todos therefore overlap freely, and their completions apply in whatever
//! order the responses arrive.
//!
//! A `ReleaseOnDrop` guard is armed for the duration of every request. If
//! the operation's future is dropped mid-flight (a caller-side timeout or
//! `select!`), the guard frees the marker so the control is usable again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::api::TodoApi;
use crate::error::ActionError;
use crate::state::{CreateForm, Marker, SubmitTicket, TaskList};
use crate::types::{Todo, TodoId};

fn lock<S>(state: &Mutex<S>) -> MutexGuard<'_, S> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

struct ReleaseOnDrop<'a, S, M: Copy> {
    state: &'a Mutex<S>,
    marker: M,
    release: fn(&mut S, M),
    armed: bool,
}

impl<'a, S, M: Copy> ReleaseOnDrop<'a, S, M> {
    fn new(state: &'a Mutex<S>, marker: M, release: fn(&mut S, M)) -> Self {
        Self {
            state,
            marker,
            release,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S, M: Copy> Drop for ReleaseOnDrop<'_, S, M> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = lock(self.state);
            (self.release)(&mut *state, self.marker);
        }
    }
}

fn release_list(list: &mut TaskList, marker: Marker) {
    debug!(?marker, "releasing abandoned operation");
    list.release(marker);
}

/// Drives the list view's state. Cloning yields another handle to the same
/// state and adapter.
pub struct ListController<A: ?Sized> {
    api: Arc<A>,
    state: Arc<Mutex<TaskList>>,
}

impl<A: ?Sized> Clone for ListController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: TodoApi + ?Sized> ListController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(TaskList::new())),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// A copy of the current state for rendering.
    pub fn snapshot(&self) -> TaskList {
        lock(&self.state).clone()
    }

    /// Full refresh; safe to call any number of times.
    pub async fn load(&self) -> Result<(), ActionError> {
        let ticket = lock(&self.state).begin_load();
        let guard = ReleaseOnDrop::new(&*self.state, ticket.marker(), release_list);

        let result = self.api.list().await;
        guard.disarm();
        if let Ok(tasks) = &result {
            debug!(count = tasks.len(), "list loaded");
        }
        lock(&self.state).finish_load(ticket, result)
    }

    pub async fn toggle_complete(&self, id: TodoId) -> Result<(), ActionError> {
        let ticket = lock(&self.state).begin_toggle(id)?;
        let guard = ReleaseOnDrop::new(&*self.state, ticket.marker(), release_list);
        debug!(id, completed = ticket.completed, "toggling todo");

        let result = self.api.update(id, ticket.patch()).await;
        guard.disarm();
        lock(&self.state).finish_toggle(ticket, result)
    }

    pub async fn remove(&self, id: TodoId) -> Result<(), ActionError> {
        let ticket = lock(&self.state).begin_remove(id)?;
        let guard = ReleaseOnDrop::new(&*self.state, ticket.marker(), release_list);
        debug!(id, "deleting todo");

        let result = self.api.delete(id).await;
        guard.disarm();
        let outcome = lock(&self.state).finish_remove(ticket, result);
        if outcome.is_ok() {
            info!(id, "todo deleted");
        }
        outcome
    }

    pub fn begin_edit(&self, id: TodoId) -> Result<(), ActionError> {
        lock(&self.state).begin_edit(id)
    }

    pub fn edit_title(&self, title: impl Into<String>) -> bool {
        lock(&self.state).edit_title(title)
    }

    pub fn edit_description(&self, description: impl Into<String>) -> bool {
        lock(&self.state).edit_description(description)
    }

    /// Discards the edit buffer. Never touches the network.
    pub fn cancel_edit(&self) {
        lock(&self.state).cancel_edit();
    }

    pub async fn commit_edit(&self, id: TodoId) -> Result<(), ActionError> {
        let ticket = lock(&self.state).begin_commit(id)?;
        let guard = ReleaseOnDrop::new(&*self.state, ticket.marker(), release_list);
        debug!(id, "saving todo");

        let result = self.api.update(id, ticket.patch()).await;
        guard.disarm();
        lock(&self.state).finish_commit(ticket, result)
    }
}

/// Drives the creation form. A successful submission reloads the list it
/// was built with.
pub struct FormController<A: ?Sized> {
    list: ListController<A>,
    form: Arc<Mutex<CreateForm>>,
}

impl<A: ?Sized> Clone for FormController<A> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            form: Arc::clone(&self.form),
        }
    }
}

impl<A: TodoApi + ?Sized> FormController<A> {
    pub fn new(list: ListController<A>) -> Self {
        Self {
            list,
            form: Arc::new(Mutex::new(CreateForm::new())),
        }
    }

    pub fn list(&self) -> &ListController<A> {
        &self.list
    }

    pub fn snapshot(&self) -> CreateForm {
        lock(&self.form).clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        lock(&self.form).set_title(title);
    }

    pub fn set_description(&self, description: impl Into<String>) {
        lock(&self.form).set_description(description);
    }

    /// Replaces the draft with the given text and submits it. While another
    /// submission is in flight the draft is left untouched.
    pub async fn submit(&self, title: &str, description: &str) -> Result<Todo, ActionError> {
        let ticket = {
            let mut form = lock(&self.form);
            if form.is_submitting() {
                return Err(ActionError::Busy);
            }
            form.set_title(title);
            form.set_description(description);
            form.begin_submit()?
        };
        self.send(ticket).await
    }

    pub async fn submit_draft(&self) -> Result<Todo, ActionError> {
        let ticket = lock(&self.form).begin_submit()?;
        self.send(ticket).await
    }

    async fn send(&self, ticket: SubmitTicket) -> Result<Todo, ActionError> {
        let guard = ReleaseOnDrop::new(&*self.form, (), |form: &mut CreateForm, ()| form.release());

        let result = self.list.api().create(&ticket.title, &ticket.description).await;
        guard.disarm();
        let created = lock(&self.form).finish_submit(ticket, result)?;
        info!(id = created.id, "todo created");

        // The list records its own failure; the creation itself succeeded.
        if let Err(err) = self.list.load().await {
            warn!(error = %err, "reload after create failed");
        }
        Ok(created)
    }
}
