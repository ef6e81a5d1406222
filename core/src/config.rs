//! Environment-driven client configuration.
//!
//! The base URL is taken as-is. A missing value yields an empty base, and
//! every request then fails at the transport; nothing is validated up front.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::api::HttpTodoApi;
use crate::controller::{FormController, ListController};
use crate::transport::{ReqwestTransport, TimeoutTransport};

pub const BASE_URL_VAR: &str = "TODO_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "TODO_API_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The adapter `ClientConfig::connect` produces.
pub type ReqwestTodoApi = HttpTodoApi<TimeoutTransport<ReqwestTransport>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(env::var(BASE_URL_VAR).ok(), env::var(TIMEOUT_VAR).ok())
    }

    fn from_vars(base_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let request_timeout = timeout_secs
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            base_url: base_url.map(|v| v.trim().to_string()).unwrap_or_default(),
            request_timeout,
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn connect(&self) -> ReqwestTodoApi {
        let transport = TimeoutTransport::new(ReqwestTransport::new(), self.request_timeout);
        HttpTodoApi::new(&self.base_url, transport)
    }

    /// Wires a list controller and a form controller over one adapter.
    pub fn controllers(&self) -> (ListController<ReqwestTodoApi>, FormController<ReqwestTodoApi>) {
        let list = ListController::new(Arc::new(self.connect()));
        let form = FormController::new(list.clone());
        (list, form)
    }
}
