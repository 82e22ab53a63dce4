//! Line commands understood by the interactive front-end.

use todo_core::{CompletedFilter, Priority};

pub const USAGE: &str = "\
commands:
  title <text>             set the draft title
  desc <text>              set the draft description (empty clears it)
  priority <low|medium|high>
  category <id|none>       set the draft category
  add [title]              submit the draft
  toggle <id>              flip completed
  rename <id> <title>
  rm <id>                  delete
  filter status <all|completed|pending>
  filter priority <low|medium|high|all>
  filter category <id|all>
  filter clear
  refresh | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Description(String),
    Priority(Priority),
    Category(Option<i64>),
    Add(Option<String>),
    Toggle(i64),
    Rename(i64, String),
    Delete(i64),
    FilterStatus(CompletedFilter),
    FilterPriority(Option<Priority>),
    FilterCategory(Option<i64>),
    FilterClear,
    Refresh,
    Help,
    Quit,
}

fn parse_id(s: &str) -> Result<i64, String> {
    s.parse().map_err(|_| format!("not a todo id: {s:?}"))
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse_known(s).ok_or_else(|| format!("unknown priority: {s:?}"))
}

/// `none`/`all` clear the selection; anything else must be an id.
fn parse_optional_id(s: &str) -> Result<Option<i64>, String> {
    match s {
        "none" | "all" => Ok(None),
        other => parse_id(other).map(Some),
    }
}

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "title" if !rest.is_empty() => Ok(Command::Title(rest.to_string())),
        "title" => Err("usage: title <text>".to_string()),
        "desc" => Ok(Command::Description(rest.to_string())),
        "priority" => parse_priority(rest).map(Command::Priority),
        "category" => parse_optional_id(rest).map(Command::Category),
        "add" if rest.is_empty() => Ok(Command::Add(None)),
        "add" => Ok(Command::Add(Some(rest.to_string()))),
        "toggle" => parse_id(rest).map(Command::Toggle),
        "rm" | "delete" => parse_id(rest).map(Command::Delete),
        "rename" => {
            let (id, title) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: rename <id> <title>".to_string())?;
            Ok(Command::Rename(parse_id(id)?, title.trim().to_string()))
        }
        "filter" => parse_filter(rest),
        "refresh" if rest.is_empty() => Ok(Command::Refresh),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command: {other:?}")),
    }
}

fn parse_filter(rest: &str) -> Result<Command, String> {
    let (what, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let value = value.trim();
    match what {
        "status" => CompletedFilter::parse(value)
            .map(Command::FilterStatus)
            .ok_or_else(|| format!("unknown status: {value:?}")),
        "priority" if value == "all" => Ok(Command::FilterPriority(None)),
        "priority" => parse_priority(value).map(|p| Command::FilterPriority(Some(p))),
        "category" => parse_optional_id(value).map(Command::FilterCategory),
        "clear" => Ok(Command::FilterClear),
        _ => Err("usage: filter <status|priority|category|clear> [value]".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_commands() {
        assert_eq!(parse("title Buy milk"), Ok(Command::Title("Buy milk".to_string())));
        assert_eq!(parse("desc"), Ok(Command::Description(String::new())));
        assert_eq!(parse("priority high"), Ok(Command::Priority(Priority::High)));
        assert_eq!(parse("category 3"), Ok(Command::Category(Some(3))));
        assert_eq!(parse("category none"), Ok(Command::Category(None)));
    }

    #[test]
    fn add_with_and_without_title() {
        assert_eq!(parse("add"), Ok(Command::Add(None)));
        assert_eq!(parse("  add  Walk dog  "), Ok(Command::Add(Some("Walk dog".to_string()))));
    }

    #[test]
    fn todo_commands_need_numeric_ids() {
        assert_eq!(parse("toggle 4"), Ok(Command::Toggle(4)));
        assert_eq!(parse("rm 9"), Ok(Command::Delete(9)));
        assert_eq!(parse("rename 2 Walk cat"), Ok(Command::Rename(2, "Walk cat".to_string())));
        assert!(parse("toggle four").is_err());
        assert!(parse("rename 2").is_err());
    }

    #[test]
    fn filter_commands() {
        assert_eq!(parse("filter status pending"), Ok(Command::FilterStatus(CompletedFilter::Pending)));
        assert_eq!(parse("filter priority all"), Ok(Command::FilterPriority(None)));
        assert_eq!(parse("filter priority low"), Ok(Command::FilterPriority(Some(Priority::Low))));
        assert_eq!(parse("filter category 2"), Ok(Command::FilterCategory(Some(2))));
        assert_eq!(parse("filter clear"), Ok(Command::FilterClear));
        assert!(parse("filter priority urgent").is_err());
        assert!(parse("filter").is_err());
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert!(parse("").is_err());
        assert!(parse("frobnicate").is_err());
        assert!(parse("priority").is_err());
    }
}
