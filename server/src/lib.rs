pub mod config;
pub mod error;
pub mod logging;

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use todo_core::{payload, Health, Todo, TodoId, TodoService};

use crate::error::{ApiError, ErrorBody};

/// Query string accepted by `GET /todos`. Values are interpreted by the service.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pub window: Option<String>,
    pub completed: Option<String>,
}

impl ListParams {
    /// Repeated keys keep their first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "window" => &mut params.window,
                "completed" => &mut params.completed,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// `Path` whose rejection is answered with a JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
struct ApiPath<T>(T);

/// Router backed by a fresh in-memory store.
pub fn app() -> Router {
    router(TodoService::in_memory())
}

pub fn router(service: TodoService) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        );
    Router::new()
        .nest("/api/v1", api)
        .fallback(not_found)
        .with_state(service)
}

pub async fn run(listener: TcpListener, service: TodoService) -> Result<(), std::io::Error> {
    axum::serve(listener, router(service)).await
}

async fn health(State(service): State<TodoService>) -> Json<Health> {
    Json(service.health())
}

async fn list_todos(
    State(service): State<TodoService>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let params = ListParams::from_pairs(pairs);
    let todos = service
        .list(params.window.as_deref(), params.completed.as_deref())
        .await?;
    Ok(Json(todos))
}

async fn get_todo(
    State(service): State<TodoService>,
    ApiPath(id): ApiPath<TodoId>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(service.get(id).await?))
}

async fn create_todo(
    State(service): State<TodoService>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let payload = payload::parse_body(&body)?;
    let todo = service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(service): State<TodoService>,
    ApiPath(id): ApiPath<TodoId>,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let payload = payload::parse_body(&body)?;
    Ok(Json(service.update(id, &payload).await?))
}

async fn delete_todo(
    State(service): State<TodoService>,
    ApiPath(id): ApiPath<TodoId>,
) -> Result<Response, ApiError> {
    let response = match service.delete(id).await? {
        Some(todo) => Json(todo).into_response(),
        None => Json(json!({})).into_response(),
    };
    Ok(response)
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
}
