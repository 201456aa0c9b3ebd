//! In-memory implementation of the `/api/todos` REST surface.
//!
//! Ids are sequential integers starting at 1. Single-item responses and lists
//! are wrapped in `{"data": ...}`; the paginated listing also carries a
//! `pagination` object.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Completed,
    Pending,
}

impl Status {
    fn matches(self, todo: &Todo) -> bool {
        match self {
            Status::Completed => todo.completed,
            Status::Pending => !todo.completed,
        }
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<Status>,
}

#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub status: Option<Status>,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl Store {
    fn filtered(&self, status: Option<Status>) -> Vec<Todo> {
        self.todos
            .values()
            .filter(|t| status.map_or(true, |s| s.matches(t)))
            .cloned()
            .collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/stats", get(todo_stats))
        .route("/api/todos/paginated", get(paginated_todos))
        .route("/api/todos/test", get(test_connection))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Value> {
    let store = db.read().await;
    Json(json!({ "data": store.filtered(params.status) }))
}

async fn todo_stats(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let total = store.todos.len();
    let completed = store.todos.values().filter(|t| t.completed).count();
    Json(json!({
        "data": { "total": total, "completed": completed, "pending": total - completed }
    }))
}

async fn paginated_todos(State(db): State<Db>, Query(params): Query<PageParams>) -> Json<Value> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).max(1);
    let store = db.read().await;
    let all = store.filtered(params.status);
    let total = all.len();
    let items: Vec<Todo> = all
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();
    Json(json!({
        "data": items,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "totalPages": total.div_ceil(limit),
        }
    }))
}

async fn test_connection() -> Json<Value> {
    Json(json!({ "message": "API is working", "timestamp": Utc::now() }))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Value>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let now = Utc::now();
    let todo = Todo {
        id: store.next_id,
        title: input.title,
        description: input.description,
        completed: input.completed,
        created_at: now,
        updated_at: now,
    };
    store.todos.insert(todo.id, todo.clone());
    tracing::debug!(id = todo.id, "created todo");
    (StatusCode::CREATED, Json(json!({ "data": todo })))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .map(|todo| Json(json!({ "data": todo })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = Some(description);
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    todo.updated_at = Utc::now();
    Ok(Json(json!({ "data": todo })))
}

async fn toggle_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.completed = !todo.completed;
    todo.updated_at = Utc::now();
    Ok(Json(json!({ "data": todo })))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
