//! In-memory todo list service.
//!
//! # Overview
//! Serves `GET /todos`, `POST /todos`, `PUT /todos/{id}` and
//! `DELETE /todos/{id}` over JSON. State lives in a single `TodoList` behind
//! one `RwLock`; nothing is persisted across restarts.
//!
//! # Design
//! - `store` owns the collection and its invariants.
//! - `handlers` decode bodies and map store results to responses.
//! - `error` turns failures into `{"error": "..."}` with the right status.

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;
pub mod types;

use std::future::Future;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{AppError, TodoError};
pub use store::{Db, TodoList};
pub use types::{CreateTodo, ErrorBody, Todo, TodoPatch};

use handlers::{
    create_todo, delete_todo, list_todos, method_not_allowed, route_not_found, update_todo,
};

/// Router over a freshly seeded store.
pub fn app() -> Router {
    router(TodoList::seeded().into_shared())
}

/// Router over an existing store.
pub fn router(db: Db) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve `db` until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, db: Db, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(db))
        .with_graceful_shutdown(shutdown)
        .await
}
