//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the only place that performs I/O. Non-2xx responses come
//! back as data so `TodoClient::parse_*` keeps sole ownership of status
//! interpretation; only failures that produce no response at all become
//! `ApiError`s here.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `reqwest`-backed transport. Uses the client's default settings; the
/// time bound is applied by `TimeoutTransport`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .http
            .request(reqwest_method(request.method), request.path.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Bounds every request of the wrapped transport so a hung call resolves to
/// `ApiError::Timeout` instead of pending forever.
#[derive(Debug, Clone)]
pub struct TimeoutTransport<T> {
    inner: T,
    limit: Duration,
}

impl<T> TimeoutTransport<T> {
    pub fn new(inner: T, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

#[async_trait]
impl<T: Transport> Transport for TimeoutTransport<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tokio::time::timeout(self.limit, self.inner.execute(request))
            .await
            .map_err(|_| ApiError::Timeout(self.limit))?
    }
}
