//! Display hints derived from todo and category data.

use crate::types::{Category, Priority};

pub const HIGH_COLOR: &str = "#ef4444";
pub const MEDIUM_COLOR: &str = "#f59e0b";
pub const LOW_COLOR: &str = "#10b981";
pub const UNKNOWN_PRIORITY_COLOR: &str = "#6b7280";
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";

pub fn priority_color(priority: &Priority) -> &'static str {
    match priority {
        Priority::High => HIGH_COLOR,
        Priority::Medium => MEDIUM_COLOR,
        Priority::Low => LOW_COLOR,
        Priority::Other(_) => UNKNOWN_PRIORITY_COLOR,
    }
}

/// Color of the category with `id`, or the default when it is not cached
/// (categories not loaded yet, or a stale id) or has no color set.
pub fn category_color(categories: &[Category], id: i64) -> &str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.color.as_str())
        .filter(|color| !color.is_empty())
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}
