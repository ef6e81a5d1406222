//! Error types for the todo client.
//!
//! # Design
//! `ApiError` covers everything that can go wrong once a request is about to
//! leave the process: serialization, transport, timeouts, and non-2xx
//! statuses. `NotFound` gets a dedicated variant because callers frequently
//! distinguish "the resource does not exist" from "the server returned an
//! unexpected status."
//!
//! `ActionError` is what a user-triggered state operation returns. It wraps
//! `ApiError` and adds the failures that are detected locally, before any
//! request is built. The view only ever sees `ActionError::user_message`.

use std::time::Duration;

use thiserror::Error;

use crate::types::TodoId;

/// Errors produced by the HTTP adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (bad URL, refused connection).
    #[error("transport failed: {0}")]
    Transport(String),

    /// No response arrived within the configured bound.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors returned by list and form operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    /// Rejected locally; no request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The single slot for this kind of operation is already taken.
    #[error("another operation of this kind is in flight")]
    Busy,

    #[error("todo {0} is not in the list")]
    UnknownTask(TodoId),

    /// A different todo is already being edited.
    #[error("todo {0} is already being edited")]
    EditInProgress(TodoId),

    #[error("todo {0} is not being edited")]
    NotEditing(TodoId),
}

impl ActionError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ActionError::Validation(_))
    }

    /// Human-readable text for the current-error slot. Transport details are
    /// logged, not shown.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            ActionError::Validation(msg) => msg.clone(),
            ActionError::Api(_) => context.to_string(),
            ActionError::Busy => "Please wait for the current operation to finish".to_string(),
            ActionError::UnknownTask(id) => format!("Todo {id} no longer exists"),
            ActionError::EditInProgress(_) => "Finish the current edit first".to_string(),
            ActionError::NotEditing(id) => format!("Todo {id} is not being edited"),
        }
    }
}
