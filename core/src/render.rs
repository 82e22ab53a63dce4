//! Plain-text view of a `TodoStore`.

use std::fmt::Write;

use crate::filter::{CompletedFilter, TodoFilter};
use crate::store::TodoStore;

pub const EMPTY_LIST: &str = "No todos found. Add one above!";

pub fn render(store: &TodoStore) -> String {
    let mut out = String::new();

    if let Some(stats) = &store.stats {
        let _ = writeln!(
            out,
            "Total: {}  Completed: {}  Pending: {}",
            stats.total, stats.completed, stats.pending
        );
    }
    if !store.filter.is_default() {
        let _ = writeln!(out, "Filter: {}", describe_filter(store, &store.filter));
    }
    if let Some(err) = &store.last_error {
        let _ = writeln!(out, "Error: {err}");
    }
    out.push('\n');

    if store.todos.is_empty() {
        out.push_str(EMPTY_LIST);
        out.push('\n');
        return out;
    }

    for todo in &store.todos {
        let check = if todo.completed { "[x]" } else { "[ ]" };
        let _ = write!(
            out,
            "{check} #{} {}  ({} {})",
            todo.id,
            todo.title,
            todo.priority,
            store.priority_color(todo)
        );
        if let Some(category_id) = todo.category_id {
            let name = store.category(category_id).map(|c| c.name.as_str()).unwrap_or("?");
            let _ = write!(out, "  [{name} {}]", store.category_color(category_id));
        }
        let _ = writeln!(out, "  {}", todo.created_at.format("%Y-%m-%d"));
        if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "      {description}");
        }
    }
    out
}

fn describe_filter(store: &TodoStore, filter: &TodoFilter) -> String {
    let mut parts = Vec::new();
    if filter.completed != CompletedFilter::All {
        parts.push(filter.completed.as_str().to_string());
    }
    if let Some(priority) = &filter.priority {
        parts.push(format!("priority {priority}"));
    }
    if let Some(id) = filter.category_id {
        match store.category(id) {
            Some(c) => parts.push(format!("category {}", c.name)),
            None => parts.push(format!("category #{id}")),
        }
    }
    parts.join(", ")
}
