//! Local copy of the server's list, kept in step with API responses.
//!
//! Each `apply_*` method takes the value the server returned for a
//! successful call, so the mirror never invents state the server did not
//! confirm.

use crate::types::Todo;

#[derive(Debug, Clone, Default)]
pub struct TodoMirror {
    todos: Vec<Todo>,
}

impl TodoMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Replace everything with a fresh `GET /todos` result.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    pub fn apply_created(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Swap in the server's copy of an updated item. Unknown ids are ignored.
    pub fn apply_updated(&mut self, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }

    pub fn apply_deleted(&mut self, id: &str) {
        self.todos.retain(|t| t.id != id);
    }

    pub fn total_count(&self) -> usize {
        self.todos.len()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}
