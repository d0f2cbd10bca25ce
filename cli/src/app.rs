//! Interactive loop: show the list, read a selection, show the post.

use std::io::{BufRead, Write};

use anyhow::Result;
use posts_core::{Effect, NavigationError, View, ViewCoordinator};

use crate::transport::Transport;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(u64),
    Back,
    List,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "q" | "quit" | "exit" => Some(Command::Quit),
            "b" | "back" => Some(Command::Back),
            "l" | "list" | "" => Some(Command::List),
            other => other.parse().ok().map(Command::Select),
        }
    }
}

pub struct App<T> {
    coordinator: ViewCoordinator,
    transport: T,
}

impl<T: Transport> App<T> {
    pub fn new(coordinator: ViewCoordinator, transport: T) -> Self {
        Self {
            coordinator,
            transport,
        }
    }

    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        let effects: Vec<Effect> = self.coordinator.mount().into_iter().collect();
        self.execute(effects);
        self.draw(&mut output)?;

        for line in input.lines() {
            let line = line?;
            match Command::parse(&line) {
                Some(Command::Quit) => break,
                Some(Command::Select(id)) => {
                    let effects = self.coordinator.select(id);
                    self.execute(effects);
                }
                Some(Command::Back) => match self.coordinator.back() {
                    Ok(effects) => self.execute(effects),
                    Err(NavigationError::BackNavigationDisabled) => {
                        writeln!(output, "back navigation is off (start with --back)")?;
                        continue;
                    }
                    Err(NavigationError::AlreadyAtList) => {}
                },
                Some(Command::List) => {}
                None => {
                    writeln!(output, "unknown command: {}", line.trim())?;
                    continue;
                }
            }
            self.draw(&mut output)?;
        }

        let effects = self.coordinator.teardown();
        self.execute(effects);
        Ok(())
    }

    /// Run fetches one at a time and resolve them immediately.
    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch {
                    token,
                    request,
                    cancel,
                } => {
                    if cancel.is_cancelled() {
                        continue;
                    }
                    let outcome = self.transport.execute(&request);
                    let resolution = self.coordinator.resolve(token, outcome);
                    tracing::debug!(%token, ?resolution, "fetch resolved");
                }
                Effect::Cancel { token } => {
                    tracing::debug!(%token, "cancel");
                }
            }
        }
    }

    fn draw(&mut self, output: &mut impl Write) -> Result<()> {
        match self.coordinator.render() {
            View::List { entries } => {
                if self.coordinator.collection().is_failed() {
                    writeln!(output, "(could not load posts)")?;
                } else if entries.is_empty() {
                    writeln!(output, "(no posts)")?;
                }
                for entry in &entries {
                    writeln!(output, "{}", entry.label)?;
                }
                writeln!(output, "select a post id, or q to quit")?;
            }
            View::Loading { id } => writeln!(output, "loading post {id}...")?,
            View::Detail { text, .. } => writeln!(output, "{text}")?,
        }
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posts_core::{CoordinatorConfig, FetchError, HttpRequest, HttpResponse, PostsClient};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers from a fixed url -> (status, body) table; anything else is a
    /// transport error.
    #[derive(Default)]
    struct FakeTransport {
        routes: HashMap<String, (u16, String)>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        fn route(mut self, path: &str, status: u16, body: &str) -> Self {
            self.routes
                .insert(format!("http://test{path}"), (status, body.to_string()));
            self
        }
    }

    impl Transport for &FakeTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
            self.calls.borrow_mut().push(request.url.clone());
            self.routes
                .get(&request.url)
                .map(|(status, body)| HttpResponse::new(*status, body.clone()))
                .ok_or_else(|| FetchError::Transport("connection refused".to_string()))
        }
    }

    const LIST: &str = r#"[{"userId":1,"id":1,"title":"first","body":""},{"userId":1,"id":5,"title":"Foo","body":""}]"#;

    fn run(transport: &FakeTransport, back: bool, input: &str) -> String {
        let coordinator = ViewCoordinator::new(
            PostsClient::new("http://test"),
            CoordinatorConfig {
                back_navigation: back,
            },
        );
        let mut app = App::new(coordinator, transport);
        let mut out = Vec::new();
        app.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(" 12 "), Some(Command::Select(12)));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("back"), Some(Command::Back));
        assert_eq!(Command::parse(""), Some(Command::List));
        assert_eq!(Command::parse("-3"), None);
        assert_eq!(Command::parse("what"), None);
    }

    #[test]
    fn shows_list_then_detail() {
        let transport = FakeTransport::default()
            .route("/posts", 200, LIST)
            .route("/posts/5", 200, r#"{"userId":1,"id":5,"title":"Foo","body":"..."}"#);
        let out = run(&transport, false, "5\nq\n");
        assert_eq!(
            out,
            "1: first\n5: Foo\nselect a post id, or q to quit\n5: Foo\n"
        );
        assert_eq!(
            *transport.calls.borrow(),
            vec!["http://test/posts", "http://test/posts/5"]
        );
    }

    #[test]
    fn failed_list_is_reported_separately() {
        let transport = FakeTransport::default().route("/posts", 500, "boom");
        let out = run(&transport, false, "q\n");
        assert!(out.starts_with("(could not load posts)\n"), "{out}");
    }

    #[test]
    fn unreachable_list_is_reported_separately() {
        let out = run(&FakeTransport::default(), false, "q\n");
        assert!(out.starts_with("(could not load posts)\n"), "{out}");
    }

    #[test]
    fn empty_list_shows_no_posts() {
        let transport = FakeTransport::default().route("/posts", 200, "[]");
        let out = run(&transport, false, "q\n");
        assert!(out.starts_with("(no posts)\n"), "{out}");
    }

    #[test]
    fn failed_detail_stays_loading() {
        let transport = FakeTransport::default().route("/posts", 200, LIST);
        let out = run(&transport, false, "9\n\n");
        assert!(out.ends_with("loading post 9...\nloading post 9...\n"), "{out}");
    }

    #[test]
    fn back_requires_opt_in() {
        let transport = FakeTransport::default()
            .route("/posts", 200, LIST)
            .route("/posts/1", 200, r#"{"userId":1,"id":1,"title":"first","body":""}"#);
        let out = run(&transport, false, "1\nb\n");
        assert!(out.ends_with("back navigation is off (start with --back)\n"), "{out}");

        let out = run(&transport, true, "1\nb\n");
        assert!(out.ends_with("1: first\n5: Foo\nselect a post id, or q to quit\n"), "{out}");
    }

    #[test]
    fn unknown_command_is_reported() {
        let transport = FakeTransport::default().route("/posts", 200, "[]");
        let out = run(&transport, false, "hello\nq\n");
        assert!(out.contains("unknown command: hello"));
    }
}
