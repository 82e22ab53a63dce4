//! Synchronous client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), keeps the UI state in a
//! `TodoStore`, and ties both to a host-supplied `Transport` in `TodoApp`.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoApp` swallows and logs failures; the store only ever holds values
//!   the server returned.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod presentation;
pub mod render;
pub mod store;
pub mod types;

pub use app::TodoApp;
pub use client::TodoClient;
pub use error::ApiError;
pub use filter::{CompletedFilter, TodoFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use presentation::{category_color, priority_color};
pub use render::render;
pub use store::TodoStore;
pub use types::{Category, CreateTodo, Priority, Stats, Todo, TodoDraft, UpdateTodo};
