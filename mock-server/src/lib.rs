use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";
const DEFAULT_LIMIT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: String,
    pub category_id: Option<i64>,
    pub due_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub by_priority: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category_id: Option<i64>,
    pub due_date: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub category_id: Option<i64>,
    pub due_date: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub category_id: Option<i64>,
}

/// In-memory backing store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct Db {
    todos: BTreeMap<i64, Todo>,
    categories: Vec<Category>,
    last_todo_id: i64,
    last_category_id: i64,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_category(&mut self, name: &str, color: Option<&str>) -> Category {
        self.last_category_id += 1;
        let category = Category {
            id: self.last_category_id,
            name: name.to_string(),
            color: color.unwrap_or(DEFAULT_CATEGORY_COLOR).to_string(),
            created_at: now(),
        };
        self.categories.push(category.clone());
        category
    }

    fn insert(&mut self, input: CreateTodo) -> Todo {
        self.last_todo_id += 1;
        let ts = now();
        let todo = Todo {
            id: self.last_todo_id,
            title: input.title,
            description: input.description,
            completed: false,
            priority: input.priority.unwrap_or_else(|| "medium".to_string()),
            category_id: input.category_id,
            due_date: input.due_date,
            created_at: ts,
            updated_at: ts,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }

    /// Filtered todos, newest first. Empty `priority` and zero `category_id`
    /// are treated as "no filter".
    fn query(&self, params: &ListParams) -> Vec<Todo> {
        let mut todos: Vec<Todo> = self
            .todos
            .values()
            .filter(|t| params.completed.map_or(true, |c| t.completed == c))
            .filter(|t| match params.priority.as_deref() {
                Some(p) if !p.is_empty() => t.priority == p,
                _ => true,
            })
            .filter(|t| match params.category_id {
                Some(c) if c != 0 => t.category_id == Some(c),
                _ => true,
            })
            .cloned()
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        todos
            .into_iter()
            .skip(params.skip.unwrap_or(0))
            .take(params.limit.unwrap_or(DEFAULT_LIMIT))
            .collect()
    }

    fn stats(&self) -> Stats {
        let total = self.todos.len();
        let completed = self.todos.values().filter(|t| t.completed).count();
        let mut by_priority = BTreeMap::new();
        let mut by_category = BTreeMap::new();
        for todo in self.todos.values() {
            *by_priority.entry(todo.priority.clone()).or_insert(0) += 1;
            let key = match todo.category_id {
                Some(id) if id != 0 => id.to_string(),
                _ => "None".to_string(),
            };
            *by_category.entry(key).or_insert(0) += 1;
        }
        Stats {
            total,
            completed,
            pending: total - completed,
            by_priority,
            by_category,
        }
    }
}

pub type SharedDb = Arc<RwLock<Db>>;

pub fn app() -> Router {
    app_with(Db::new())
}

pub fn app_with(db: Db) -> Router {
    let db: SharedDb = Arc::new(RwLock::new(db));
    Router::new()
        .route("/categories", get(list_categories))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/stats", get(stats))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Todo not found" })))
}

async fn list_categories(State(db): State<SharedDb>) -> Json<Vec<Category>> {
    Json(db.read().await.categories.clone())
}

async fn list_todos(State(db): State<SharedDb>, Query(params): Query<ListParams>) -> Json<Vec<Todo>> {
    debug!(?params, "listing todos");
    Json(db.read().await.query(&params))
}

async fn stats(State(db): State<SharedDb>) -> Json<Stats> {
    Json(db.read().await.stats())
}

async fn create_todo(State(db): State<SharedDb>, Json(input): Json<CreateTodo>) -> Json<Todo> {
    let todo = db.write().await.insert(input);
    info!(id = todo.id, "created todo");
    Json(todo)
}

async fn update_todo(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    let mut db = db.write().await;
    let todo = db.todos.get_mut(&id).ok_or_else(not_found)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = Some(description);
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    if let Some(priority) = input.priority {
        todo.priority = priority;
    }
    if let Some(category_id) = input.category_id {
        todo.category_id = Some(category_id);
    }
    if let Some(due_date) = input.due_date {
        todo.due_date = Some(due_date);
    }
    todo.updated_at = now();
    info!(id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut db = db.write().await;
    db.todos.remove(&id).ok_or_else(not_found)?;
    info!(id, "deleted todo");
    Ok(Json(json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str, priority: Option<&str>, category_id: Option<i64>) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            description: None,
            priority: priority.map(str::to_string),
            category_id,
            due_date: None,
        }
    }

    #[test]
    fn create_todo_defaults_priority_to_medium() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"No priority"}"#).unwrap();
        let todo = Db::new().insert(input);
        assert_eq!(todo.priority, "medium");
        assert!(!todo.completed);
        assert_eq!(todo.id, 1);
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"priority":"high"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_all_fields_optional() {
        let input: UpdateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.completed.is_none());
        assert!(input.priority.is_none());
    }

    #[test]
    fn query_orders_newest_first() {
        let mut db = Db::new();
        db.insert(create("a", None, None));
        db.insert(create("b", None, None));
        db.insert(create("c", None, None));
        let ids: Vec<i64> = db.query(&ListParams::default()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn query_ignores_empty_priority_and_zero_category() {
        let mut db = Db::new();
        db.insert(create("a", Some("high"), Some(1)));
        db.insert(create("b", Some("low"), None));
        let params = ListParams {
            priority: Some(String::new()),
            category_id: Some(0),
            ..ListParams::default()
        };
        assert_eq!(db.query(&params).len(), 2);
    }

    #[test]
    fn query_applies_skip_and_limit() {
        let mut db = Db::new();
        for i in 0..5 {
            db.insert(create(&format!("t{i}"), None, None));
        }
        let params = ListParams {
            skip: Some(1),
            limit: Some(2),
            ..ListParams::default()
        };
        let ids: Vec<i64> = db.query(&params).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[test]
    fn stats_group_by_priority_and_category() {
        let mut db = Db::new();
        db.insert(create("a", Some("high"), Some(1)));
        db.insert(create("b", Some("high"), None));
        db.insert(create("c", Some("low"), Some(1)));
        db.todos.get_mut(&1).unwrap().completed = true;

        let stats = db.stats();
        assert_eq!((stats.total, stats.completed, stats.pending), (3, 1, 2));
        assert_eq!(stats.by_priority["high"], 2);
        assert_eq!(stats.by_priority["low"], 1);
        assert_eq!(stats.by_category["1"], 2);
        assert_eq!(stats.by_category["None"], 1);
    }

    #[test]
    fn seeded_categories_get_default_color() {
        let mut db = Db::new();
        let work = db.seed_category("Work", None);
        let home = db.seed_category("Home", Some("#10b981"));
        assert_eq!(work.id, 1);
        assert_eq!(work.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(home.id, 2);
        assert_eq!(home.color, "#10b981");
    }
}
