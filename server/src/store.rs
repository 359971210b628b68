//! In-memory todo collection.
//!
//! # Design
//! `TodoList` owns the items and is only mutated through `create`, `update`
//! and `delete`, so the id-uniqueness and non-blank-text invariants are
//! enforced in this module alone. Lookups are linear scans over a `Vec`;
//! insertion order is the display order.
//!
//! The list itself is not synchronized. The server wraps it in a single
//! `RwLock` (`Db`) and holds the lock for the whole operation.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TodoError;
use crate::types::{CreateTodo, Todo, TodoPatch};

/// Process-wide store shared by every handler.
pub type Db = Arc<RwLock<TodoList>>;

const SEED: [(&str, &str); 2] = [
    ("1", "Welcome to your todo list!"),
    ("2", "Click the checkbox to mark items as complete"),
];

/// Ordered collection of todo items.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    todos: Vec<Todo>,
}

impl TodoList {
    /// The list a fresh process starts with: two welcome items.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let todos = SEED
            .iter()
            .map(|(id, text)| Todo {
                id: (*id).to_string(),
                text: (*text).to_string(),
                completed: false,
                created_at: now,
            })
            .collect();
        Self { todos }
    }

    pub fn into_shared(self) -> Db {
        Arc::new(RwLock::new(self))
    }

    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Append a new item built from trimmed `input.text`.
    ///
    /// Fails with `TodoError::Validation` if the text is missing or blank;
    /// the list is left untouched in that case.
    pub fn create(&mut self, input: CreateTodo) -> Result<Todo, TodoError> {
        let text = input
            .text
            .as_deref()
            .and_then(non_blank)
            .ok_or_else(|| TodoError::Validation("text is required".to_string()))?;

        let todo = Todo {
            id: self.fresh_id(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        self.todos.push(todo.clone());
        Ok(todo)
    }

    /// Apply the fields present in `patch` to the item with `id`.
    ///
    /// Blank text in the patch is ignored rather than rejected.
    pub fn update(&mut self, id: &str, patch: TodoPatch) -> Result<Todo, TodoError> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;

        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(text) = patch.text.as_deref().and_then(non_blank) {
            todo.text = text.to_string();
        }
        Ok(todo.clone())
    }

    /// Remove the item with `id`, keeping the order of the rest.
    pub fn delete(&mut self, id: &str) -> Result<Todo, TodoError> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        Ok(self.todos.remove(index))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.todos.iter().any(|todo| todo.id == id) {
                return id;
            }
        }
    }
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
