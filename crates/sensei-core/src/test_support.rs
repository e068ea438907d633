//! Hand-written doubles shared by the unit tests in this crate.

use std::collections::VecDeque;

use sensei_types::llm::{Reply, TransportError};

use crate::chat::input::{LineEvent, LineSource};
use crate::render::{Notice, Prompt, Renderer};
use crate::transport::provider::ChatTransport;

/// Transport that replays scripted results and records every call.
pub struct MockTransport {
    script: VecDeque<Result<Reply, TransportError>>,
    fallback: Result<Reply, TransportError>,
    pub calls: Vec<(String, bool)>,
}

impl MockTransport {
    /// Always answers with `text`.
    pub fn replying(text: &str) -> Self {
        Self::always(Ok(Reply::text(text)))
    }

    /// Always returns `result`.
    pub fn always(result: Result<Reply, TransportError>) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: result,
            calls: Vec::new(),
        }
    }

    /// Returns the scripted results in order, then `Ok("ok")`.
    pub fn scripted(results: Vec<Result<Reply, TransportError>>) -> Self {
        Self {
            script: results.into(),
            fallback: Ok(Reply::text("ok")),
            calls: Vec::new(),
        }
    }

    /// Replace what is returned once the script runs out.
    pub fn then_always(mut self, result: Result<Reply, TransportError>) -> Self {
        self.fallback = result;
        self
    }
}

impl ChatTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(
        &mut self,
        message: &str,
        new_conversation: bool,
    ) -> Result<Reply, TransportError> {
        self.calls.push((message.to_string(), new_conversation));
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Line source replaying scripted events.
///
/// When the script runs out it reports `Closed`, or blocks forever if
/// built with [`ScriptedLines::hanging`].
pub struct ScriptedLines {
    events: VecDeque<LineEvent>,
    hang_when_empty: bool,
}

impl ScriptedLines {
    pub fn new(lines: &[&str]) -> Self {
        Self::from_events(
            lines
                .iter()
                .map(|line| LineEvent::Line(line.to_string()))
                .collect(),
        )
    }

    pub fn from_events(events: Vec<LineEvent>) -> Self {
        Self {
            events: events.into(),
            hang_when_empty: false,
        }
    }

    pub fn hanging(lines: &[&str]) -> Self {
        Self {
            hang_when_empty: true,
            ..Self::new(lines)
        }
    }
}

impl LineSource for ScriptedLines {
    async fn next_line(&mut self) -> LineEvent {
        match self.events.pop_front() {
            Some(event) => event,
            None if self.hang_when_empty => std::future::pending().await,
            None => LineEvent::Closed,
        }
    }
}

/// Everything a renderer was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Clear,
    Banner,
    Prompt(Prompt),
    Message(String),
    Notice(Notice),
    ThinkingStart,
    ThinkingStop,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub events: Vec<Rendered>,
}

impl RecordingRenderer {
    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Rendered::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Rendered::Message(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear_screen(&mut self) {
        self.events.push(Rendered::Clear);
    }

    fn banner(&mut self) {
        self.events.push(Rendered::Banner);
    }

    fn prompt(&mut self, prompt: Prompt) {
        self.events.push(Rendered::Prompt(prompt));
    }

    fn message(&mut self, _reply: &Reply, text: &str) {
        self.events.push(Rendered::Message(text.to_string()));
    }

    fn notice(&mut self, notice: Notice) {
        self.events.push(Rendered::Notice(notice));
    }

    fn start_thinking(&mut self) {
        self.events.push(Rendered::ThinkingStart);
    }

    fn stop_thinking(&mut self) {
        self.events.push(Rendered::ThinkingStop);
    }
}
