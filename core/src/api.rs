//! The HTTP client adapter: four CRUD calls plus single-item fetch.
//!
//! `TodoApi` is the seam the controllers are written against; tests swap in
//! scripted fakes. `HttpTodoApi` is the real implementation, pairing the
//! stateless `TodoClient` with a `Transport`. Failures propagate immediately;
//! nothing is retried.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;

    async fn get(&self, id: TodoId) -> Result<Todo, ApiError>;

    /// Creates an incomplete todo; the server assigns `id` and `created_at`.
    async fn create(&self, title: &str, description: &str) -> Result<Todo, ApiError>;

    async fn update(&self, id: TodoId, patch: UpdateTodo) -> Result<Todo, ApiError>;

    async fn delete(&self, id: TodoId) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpTodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> HttpTodoApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send<R>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        debug!(%method, %path, "sending request");

        let result = self
            .transport
            .execute(request)
            .await
            .and_then(|response| parse(&self.client, response));
        if let Err(err) = &result {
            warn!(%method, %path, error = %err, "request failed");
        }
        result
    }
}

#[async_trait]
impl<T: Transport> TodoApi for HttpTodoApi<T> {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let req = self.client.build_list_todos();
        self.send(req, TodoClient::parse_list_todos).await
    }

    async fn get(&self, id: TodoId) -> Result<Todo, ApiError> {
        let req = self.client.build_get_todo(id);
        self.send(req, TodoClient::parse_get_todo).await
    }

    async fn create(&self, title: &str, description: &str) -> Result<Todo, ApiError> {
        let req = self.client.build_create_todo(&CreateTodo::new(title, description))?;
        self.send(req, TodoClient::parse_create_todo).await
    }

    async fn update(&self, id: TodoId, patch: UpdateTodo) -> Result<Todo, ApiError> {
        let req = self.client.build_update_todo(id, &patch)?;
        self.send(req, TodoClient::parse_update_todo).await
    }

    async fn delete(&self, id: TodoId) -> Result<(), ApiError> {
        let req = self.client.build_delete_todo(id);
        self.send(req, TodoClient::parse_delete_todo).await
    }
}
