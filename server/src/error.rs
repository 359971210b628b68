//! Error types for the todo service.
//!
//! # Design
//! `TodoError` is what the store reports: a domain rule was broken or an id
//! matched nothing. `AppError` is what a handler returns; it adds the
//! transport-level failure of an undecodable body and renders every variant
//! as `{"error": "..."}` with a fixed, client-facing message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::ErrorBody;

/// Errors returned by `TodoList` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// Input failed a domain rule, e.g. blank text on create.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No todo with this id exists.
    #[error("todo {0} not found")]
    NotFound(String),
}

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Todo(#[from] TodoError),

    /// The request body could not be decoded as JSON.
    #[error("malformed request body")]
    MalformedRequest,

    /// No route matches the request path.
    #[error("no such route")]
    RouteNotFound,

    /// The path exists but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Todo(TodoError::Validation(_)) | AppError::MalformedRequest => {
                StatusCode::BAD_REQUEST
            }
            AppError::Todo(TodoError::NotFound(_)) | AppError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// The message sent to the client. Internal detail such as the missing
    /// id stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Todo(TodoError::Validation(_)) => "Text is required",
            AppError::Todo(TodoError::NotFound(_)) => "Todo not found",
            AppError::MalformedRequest => "Invalid request body",
            AppError::RouteNotFound => "Not found",
            AppError::MethodNotAllowed => "Method not allowed",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(error = %self, status = status.as_u16(), "request failed");
        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
