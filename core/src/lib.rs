//! Async client for the todo service, with the list and form state a view
//! renders from.
//!
//! # Overview
//! - `client` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network; `transport` executes them.
//! - `api` pairs the two behind the `TodoApi` trait, the seam everything
//!   above is written against.
//! - `state` holds the list and creation-form state as plain values with
//!   synchronous `begin_*`/`finish_*` transitions.
//! - `controller` drives those transitions around real requests.
//!
//! # Design
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//! - No retries. Every request is time-bounded by `TimeoutTransport`.

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod state;
pub mod transport;
pub mod types;

pub use api::{HttpTodoApi, TodoApi};
pub use client::TodoClient;
pub use config::{ClientConfig, ReqwestTodoApi};
pub use controller::{FormController, ListController};
pub use error::{ActionError, ApiError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{CreateForm, Draft, EditBuffer, TaskList};
pub use transport::{ReqwestTransport, TimeoutTransport, Transport};
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
