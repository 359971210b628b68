//! HTTP handlers for `/todos`.
//!
//! Bodies are taken as raw bytes and decoded here so that any decoding
//! failure maps to `AppError::MalformedRequest` before the store sees the
//! request. No Content-Type header is required.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::error::AppError;
use crate::store::Db;
use crate::types::{CreateTodo, Todo, TodoPatch};

pub async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    Json(todos.list().to_vec())
}

pub async fn create_todo(
    State(db): State<Db>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let body = read_body(body)?;
    let todo = db.write().await.create(CreateTodo::from_json(&body))?;
    tracing::debug!(id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Todo>, AppError> {
    let body = read_body(body)?;
    let todo = db.write().await.update(&id, TodoPatch::from_json(&body))?;
    tracing::debug!(%id, completed = todo.completed, "todo updated");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, AppError> {
    let todo = db.write().await.delete(&id)?;
    tracing::debug!(%id, "todo deleted");
    Ok(Json(todo))
}

pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// A body axum could not buffer (over the size limit, broken stream) is as
/// malformed as one that is not JSON.
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Value, AppError> {
    match body {
        Ok(bytes) => decode_body(&bytes),
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable request body");
            Err(AppError::MalformedRequest)
        }
    }
}

/// Decode a JSON body. A literal `null` counts as malformed: it has no
/// fields to read.
fn decode_body(bytes: &[u8]) -> Result<Value, AppError> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Null) => Err(AppError::MalformedRequest),
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::debug!(%err, "undecodable request body");
            Err(AppError::MalformedRequest)
        }
    }
}
