//! In-memory UI state.
//!
//! # Design
//! `TodoStore` is a cache of whatever the server said last. It never invents
//! a todo: every insertion or replacement takes a value decoded from a
//! response. Todo-list fetches carry a generation so that a response for a
//! superseded filter cannot overwrite a newer one when the host delivers
//! responses out of order.

use tracing::warn;

use crate::filter::TodoFilter;
use crate::presentation::{category_color, priority_color};
use crate::types::{Category, Stats, Todo, TodoDraft};

#[derive(Debug, Default)]
pub struct TodoStore {
    pub todos: Vec<Todo>,
    pub categories: Vec<Category>,
    pub stats: Option<Stats>,
    pub filter: TodoFilter,
    pub draft: TodoDraft,
    /// Message from the most recent failed operation, cleared on the next success.
    pub last_error: Option<String>,
    todos_generation: u64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of a todo-list fetch and returns its generation.
    pub fn begin_todos_fetch(&mut self) -> u64 {
        self.todos_generation += 1;
        self.todos_generation
    }

    /// Replaces the todo list if `generation` is the latest issued fetch.
    /// Returns whether the response was applied.
    pub fn apply_todos(&mut self, generation: u64, todos: Vec<Todo>) -> bool {
        if generation != self.todos_generation {
            warn!(generation, latest = self.todos_generation, "dropping stale todo list response");
            return false;
        }
        self.todos = todos;
        true
    }

    pub fn replace_todos(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn replace_stats(&mut self, stats: Stats) {
        self.stats = Some(stats);
    }

    pub fn prepend_todo(&mut self, todo: Todo) {
        self.todos.insert(0, todo);
    }

    /// Swaps in the server's copy of a todo, matched by id.
    pub fn replace_todo(&mut self, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }

    pub fn remove_todo(&mut self, id: i64) {
        self.todos.retain(|t| t.id != id);
    }

    pub fn todo(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_color(&self, id: i64) -> &str {
        category_color(&self.categories, id)
    }

    pub fn priority_color(&self, todo: &Todo) -> &'static str {
        priority_color(&todo.priority)
    }

    pub fn reset_draft(&mut self) {
        self.draft = TodoDraft::default();
    }
}
