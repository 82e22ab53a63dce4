//! Client-side filter selection and its query-string form.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::Priority;

/// Characters left unescaped in query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Completion status to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletedFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl CompletedFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(CompletedFilter::All),
            "completed" => Some(CompletedFilter::Completed),
            "pending" => Some(CompletedFilter::Pending),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompletedFilter::All => "all",
            CompletedFilter::Completed => "completed",
            CompletedFilter::Pending => "pending",
        }
    }
}

/// Which todos are requested from the server. The default selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub completed: CompletedFilter,
    pub priority: Option<Priority>,
    pub category_id: Option<i64>,
}

impl TodoFilter {
    pub fn is_default(&self) -> bool {
        *self == TodoFilter::default()
    }

    /// Renders the active parameters as `k=v&k=v`, in the order
    /// `completed`, `priority`, `category_id`. Inactive filters are omitted;
    /// an all-default filter yields an empty string.
    pub fn to_query(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        match self.completed {
            CompletedFilter::All => {}
            CompletedFilter::Completed => params.push(("completed", "true".to_string())),
            CompletedFilter::Pending => params.push(("completed", "false".to_string())),
        }
        if let Some(priority) = &self.priority {
            params.push(("priority", priority.as_str().to_string()));
        }
        if let Some(category_id) = self.category_id {
            params.push(("category_id", category_id.to_string()));
        }
        params
            .iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_filters() -> Vec<TodoFilter> {
        let completed = [CompletedFilter::All, CompletedFilter::Completed, CompletedFilter::Pending];
        let priority = [None, Some(Priority::Low), Some(Priority::Medium), Some(Priority::High)];
        let category = [None, Some(4)];
        let mut out = Vec::new();
        for c in completed {
            for p in &priority {
                for cat in category {
                    out.push(TodoFilter {
                        completed: c,
                        priority: p.clone(),
                        category_id: cat,
                    });
                }
            }
        }
        out
    }

    #[test]
    fn parameter_present_iff_filter_active() {
        for filter in all_filters() {
            let query = filter.to_query();
            let keys: Vec<&str> = query
                .split('&')
                .filter(|s| !s.is_empty())
                .map(|kv| kv.split('=').next().unwrap())
                .collect();
            assert_eq!(
                keys.contains(&"completed"),
                filter.completed != CompletedFilter::All,
                "{filter:?}"
            );
            assert_eq!(keys.contains(&"priority"), filter.priority.is_some(), "{filter:?}");
            assert_eq!(keys.contains(&"category_id"), filter.category_id.is_some(), "{filter:?}");
        }
    }

    #[test]
    fn default_filter_yields_empty_query() {
        assert!(TodoFilter::default().is_default());
        assert_eq!(TodoFilter::default().to_query(), "");
    }

    #[test]
    fn full_filter_orders_parameters() {
        let filter = TodoFilter {
            completed: CompletedFilter::Pending,
            priority: Some(Priority::High),
            category_id: Some(3),
        };
        assert_eq!(filter.to_query(), "completed=false&priority=high&category_id=3");
    }

    #[test]
    fn other_priority_is_percent_encoded() {
        let filter = TodoFilter {
            priority: Some(Priority::Other("very high&more".to_string())),
            ..TodoFilter::default()
        };
        assert_eq!(filter.to_query(), "priority=very%20high%26more");
    }

    #[test]
    fn completed_filter_parses_labels() {
        assert_eq!(CompletedFilter::parse("pending"), Some(CompletedFilter::Pending));
        assert_eq!(CompletedFilter::parse("done"), None);
    }
}
