use std::{collections::BTreeMap, future::Future, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub status: Status,
    pub version: i32,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<Status>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

/// In-memory task table. Ids are sequential and never reused.
#[derive(Debug, Default)]
pub struct Store {
    last_id: i64,
    tasks: BTreeMap<i64, Task>,
}

impl Store {
    pub fn insert(&mut self, input: CreateTask) -> Task {
        self.last_id += 1;
        let task = Task {
            id: self.last_id,
            created_at: Utc::now(),
            title: input.title,
            content: input.content,
            status: Status::Pending,
            version: 1,
        };
        self.tasks.insert(task.id, task.clone());
        task
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    env: String,
}

/// JSON error body: `{"error": message}`.
struct ErrorResponse {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

fn not_found() -> ErrorResponse {
    ErrorResponse {
        status: StatusCode::NOT_FOUND,
        message: "the requested resource could not be found".to_string(),
    }
}

pub fn app() -> Router {
    app_for_env("development")
}

pub fn app_for_env(env: &str) -> Router {
    let state = AppState {
        db: Db::default(),
        env: env.to_string(),
    };
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/tasks", get(list_tasks).post(create_task))
        .route("/v1/tasks/{id}", get(get_task).put(update_task).delete(delete_task))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app(), std::future::pending()).await
}

pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Allow any origin; preflight requests are answered here.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}

fn parse_id(raw: &str) -> Result<i64, ErrorResponse> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(bad_request("invalid id parameter")),
    }
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "available",
        "env": state.env,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_tasks(State(state): State<AppState>) -> Json<TaskList> {
    let store = state.db.read().await;
    Json(TaskList {
        tasks: store.tasks.values().cloned().collect(),
    })
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ErrorResponse> {
    let Json(input) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;
    let task = state.db.write().await.insert(input);
    info!(id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ErrorResponse> {
    let id = parse_id(&id)?;
    let store = state.db.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<Task>, ErrorResponse> {
    let id = parse_id(&id)?;
    let mut store = state.db.write().await;
    let task = store.tasks.get_mut(&id).ok_or_else(not_found)?;
    let Json(input) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;
    if let Some(title) = input.title {
        task.title = title;
    }
    if let Some(content) = input.content {
        task.content = content;
    }
    if let Some(status) = input.status {
        task.status = status;
    }
    task.version += 1;
    debug!(id, version = task.version, "task updated");
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    let id = parse_id(&id)?;
    let mut store = state.db.write().await;
    store.tasks.remove(&id).ok_or_else(not_found)?;
    info!(id, "task deleted");
    Ok(Json(json!({ "message": "task deleted" })))
}
