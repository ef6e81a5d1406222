//! In-memory implementation of the todo HTTP contract.
//!
//! Ids are assigned as one past the highest id ever stored in the current
//! map (or 1 when empty), matching the production backend. List order is
//! ascending by id.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Default)]
pub struct Store {
    todos: BTreeMap<i64, Todo>,
}

impl Store {
    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        Self {
            todos: todos.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    fn next_id(&self) -> i64 {
        self.todos.keys().next_back().map_or(1, |max| max + 1)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error body shaped like the production backend's `{"detail": ...}`.
#[derive(Debug)]
pub enum MockError {
    NotFound,
    Invalid(&'static str),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            MockError::NotFound => (StatusCode::NOT_FOUND, "Todo not found"),
            MockError::Invalid(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

const SEED_EPOCH: i64 = 1_705_312_800; // 2024-01-15T10:00:00Z

fn seeded_at(hours: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(SEED_EPOCH + hours * 3600, 0).unwrap_or_default()
}

/// The two todos the production backend ships with.
pub fn seed_todos() -> Vec<Todo> {
    vec![
        Todo {
            id: 1,
            title: "Aprender FastAPI".to_string(),
            description: "Crear una API REST con Python".to_string(),
            completed: false,
            created_at: seeded_at(0),
        },
        Todo {
            id: 2,
            title: "Configurar Supabase".to_string(),
            description: "Conectar la base de datos".to_string(),
            completed: true,
            created_at: seeded_at(1),
        },
    ]
}

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_todos(todos)));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).patch(update_todo).delete(delete_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), MockError> {
    if input.title.trim().is_empty() {
        return Err(MockError::Invalid("title must not be empty"));
    }
    let mut store = db.write().await;
    let todo = Todo {
        id: store.next_id(),
        title: input.title,
        description: input.description,
        completed: input.completed,
        created_at: Utc::now(),
    };
    store.todos.insert(todo.id, todo.clone());
    info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Todo>, MockError> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(MockError::NotFound)
}

/// Applies only the fields present. Empty strings leave the stored text
/// unchanged, as the production backend does.
async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, MockError> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(MockError::NotFound)?;
    if let Some(title) = input.title.filter(|t| !t.is_empty()) {
        todo.title = title;
    }
    if let Some(description) = input.description.filter(|d| !d.is_empty()) {
        todo.description = description;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, MockError> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(MockError::NotFound)
}
