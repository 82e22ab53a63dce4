//! Interactive terminal front-end for the todo service.
//!
//! Reads one command per line from stdin and re-renders the store after
//! each. Logs go to stderr so they don't interleave with the view.

mod command;
mod settings;
mod transport;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use todo_core::{render, TodoApp, TodoClient, TodoFilter, Transport, UpdateTodo};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, USAGE};
use crate::settings::CliConfig;
use crate::transport::UreqTransport;

enum Flow {
    Continue,
    Quit,
}

fn apply<T: Transport>(app: &mut TodoApp<T>, command: Command) -> Flow {
    match command {
        Command::Title(title) => app.store.draft.title = title,
        Command::Description(description) => app.store.draft.description = description,
        Command::Priority(priority) => app.store.draft.priority = priority,
        Command::Category(category_id) => app.store.draft.category_id = category_id,
        Command::Add(title) => {
            if let Some(title) = title {
                app.store.draft.title = title;
            }
            app.create_todo();
        }
        Command::Toggle(id) => app.toggle_todo(id),
        Command::Rename(id, title) => app.update_todo(
            id,
            &UpdateTodo {
                title: Some(title),
                ..UpdateTodo::default()
            },
        ),
        Command::Delete(id) => app.delete_todo(id),
        Command::FilterStatus(completed) => {
            let filter = TodoFilter {
                completed,
                ..app.store.filter.clone()
            };
            app.set_filter(filter);
        }
        Command::FilterPriority(priority) => {
            let filter = TodoFilter {
                priority,
                ..app.store.filter.clone()
            };
            app.set_filter(filter);
        }
        Command::FilterCategory(category_id) => {
            let filter = TodoFilter {
                category_id,
                ..app.store.filter.clone()
            };
            app.set_filter(filter);
        }
        Command::FilterClear => app.set_filter(TodoFilter::default()),
        Command::Refresh => app.refresh(),
        Command::Help => println!("{USAGE}"),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn draft_line<T>(app: &TodoApp<T>) -> String {
    let draft = &app.store.draft;
    let category = match draft.category_id {
        Some(id) => app
            .store
            .category(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{id}")),
        None => "no category".to_string(),
    };
    format!("draft: {:?} ({}, {category})", draft.title, draft.priority)
}

fn main() -> anyhow::Result<()> {
    let cfg = CliConfig::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)))
        .init();
    tracing::info!(base_url = %cfg.base_url, "starting todo client");

    let mut app = TodoApp::new(TodoClient::new(&cfg.base_url), UreqTransport::new(cfg.timeout()));
    app.refresh();
    print!("{}", render(&app.store));
    println!("{USAGE}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{}\n> ", draft_line(&app));
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match command::parse(&line) {
            Ok(cmd) => {
                if let Flow::Quit = apply(&mut app, cmd) {
                    break;
                }
                print!("{}", render(&app.store));
            }
            Err(msg) => println!("{msg} (type `help` for commands)"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use todo_core::{ApiError, HttpRequest, HttpResponse, Priority};

    use super::*;

    /// Counts requests and fails every one of them.
    #[derive(Default)]
    struct Offline {
        calls: Cell<usize>,
    }

    impl Transport for Offline {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.calls.set(self.calls.get() + 1);
            Err(ApiError::Transport("offline".to_string()))
        }
    }

    #[test]
    fn draft_edits_stay_local() {
        let transport = Offline::default();
        let mut app = TodoApp::new(TodoClient::new("http://api"), &transport);

        apply(&mut app, Command::Title("Walk dog".to_string()));
        apply(&mut app, Command::Priority(Priority::Low));
        apply(&mut app, Command::Category(Some(2)));

        assert_eq!(transport.calls.get(), 0);
        assert_eq!(app.store.draft.title, "Walk dog");
        assert_eq!(app.store.draft.priority, Priority::Low);
        assert_eq!(draft_line(&app), "draft: \"Walk dog\" (low, #2)");
    }

    #[test]
    fn filter_commands_merge_and_refresh() {
        let transport = Offline::default();
        let mut app = TodoApp::new(TodoClient::new("http://api"), &transport);

        apply(&mut app, Command::FilterPriority(Some(Priority::High)));
        apply(&mut app, Command::FilterCategory(Some(4)));

        assert_eq!(app.store.filter.priority, Some(Priority::High));
        assert_eq!(app.store.filter.category_id, Some(4));
        assert_eq!(transport.calls.get(), 6, "each filter change reloads todos, categories and stats");

        apply(&mut app, Command::FilterClear);
        assert!(app.store.filter.is_default());
    }

    #[test]
    fn quit_stops_the_loop() {
        let transport = Offline::default();
        let mut app = TodoApp::new(TodoClient::new("http://api"), &transport);
        assert!(matches!(apply(&mut app, Command::Quit), Flow::Quit));
    }
}
