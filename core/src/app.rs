//! A client session: request builder, UI store and a host transport.
//!
//! # Design
//! Every operation is one round-trip through `Transport`. Failures are
//! logged and recorded in `TodoStore::last_error`; they never propagate to
//! the caller and never modify the cached collections, since nothing is
//! applied before the server answers.

use tracing::{debug, error, info, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::filter::TodoFilter;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::store::TodoStore;
use crate::types::UpdateTodo;

pub struct TodoApp<T> {
    client: TodoClient,
    transport: T,
    pub store: TodoStore,
}

impl<T: Transport> TodoApp<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            store: TodoStore::new(),
        }
    }

    /// Reloads todos, categories and stats. A failure in any of the three
    /// stays in `last_error` even when the later reads succeed.
    pub fn refresh(&mut self) {
        self.store.last_error = None;
        self.fetch_todos();
        self.fetch_categories();
        self.fetch_stats();
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.store.filter = filter;
        self.refresh();
    }

    pub fn list_todos(&mut self) {
        self.store.last_error = None;
        self.fetch_todos();
    }

    pub fn list_categories(&mut self) {
        self.store.last_error = None;
        self.fetch_categories();
    }

    pub fn load_stats(&mut self) {
        self.store.last_error = None;
        self.fetch_stats();
    }

    /// Submits the store's draft. A blank title is rejected without a request.
    pub fn create_todo(&mut self) {
        let Some(input) = self.store.draft.to_create() else {
            warn!("refusing to create a todo without a title");
            return;
        };
        self.store.last_error = None;
        let result = self
            .client
            .build_create_todo(&input)
            .and_then(|req| self.round_trip(req))
            .and_then(|resp| self.client.parse_create_todo(resp));
        if let Some(todo) = self.settle("adding todo", result) {
            info!(id = todo.id, title = %todo.title, "todo created");
            self.store.prepend_todo(todo);
            self.store.reset_draft();
            self.fetch_stats();
        }
    }

    /// Flips `completed` on the cached todo with `id`.
    pub fn toggle_todo(&mut self, id: i64) {
        let Some(current) = self.store.todo(id) else {
            warn!(id, "toggle requested for a todo that is not loaded");
            return;
        };
        let input = UpdateTodo::completed(!current.completed);
        self.update_todo(id, &input);
    }

    pub fn update_todo(&mut self, id: i64, input: &UpdateTodo) {
        self.store.last_error = None;
        let result = self
            .client
            .build_update_todo(id, input)
            .and_then(|req| self.round_trip(req))
            .and_then(|resp| self.client.parse_update_todo(resp));
        if let Some(todo) = self.settle("updating todo", result) {
            info!(id = todo.id, completed = todo.completed, "todo updated");
            self.store.replace_todo(todo);
            self.fetch_stats();
        }
    }

    pub fn delete_todo(&mut self, id: i64) {
        self.store.last_error = None;
        let req = self.client.build_delete_todo(id);
        let result = self
            .round_trip(req)
            .and_then(|resp| self.client.parse_delete_todo(resp));
        if self.settle("deleting todo", result).is_some() {
            info!(id, "todo deleted");
            self.store.remove_todo(id);
            self.fetch_stats();
        }
    }

    fn fetch_todos(&mut self) {
        let generation = self.store.begin_todos_fetch();
        let req = self.client.build_list_todos(&self.store.filter);
        let result = self
            .round_trip(req)
            .and_then(|resp| self.client.parse_list_todos(resp));
        if let Some(todos) = self.settle("fetching todos", result) {
            debug!(count = todos.len(), "todos loaded");
            self.store.apply_todos(generation, todos);
        }
    }

    fn fetch_categories(&mut self) {
        let req = self.client.build_list_categories();
        let result = self
            .round_trip(req)
            .and_then(|resp| self.client.parse_list_categories(resp));
        if let Some(categories) = self.settle("fetching categories", result) {
            self.store.replace_categories(categories);
        }
    }

    fn fetch_stats(&mut self) {
        let req = self.client.build_stats();
        let result = self
            .round_trip(req)
            .and_then(|resp| self.client.parse_stats(resp));
        if let Some(stats) = self.settle("fetching stats", result) {
            self.store.replace_stats(stats);
        }
    }

    fn round_trip(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %req.method, path = %req.path, "sending request");
        self.transport.execute(req)
    }

    /// Records a failure; clearing is done once per public operation so the
    /// first error of a compound reload survives the reads that follow it.
    fn settle<V>(&mut self, action: &str, result: Result<V, ApiError>) -> Option<V> {
        result
            .map_err(|err| {
                error!(error = %err, "error {action}");
                if self.store.last_error.is_none() {
                    self.store.last_error = Some(format!("error {action}: {err}"));
                }
            })
            .ok()
    }
}
