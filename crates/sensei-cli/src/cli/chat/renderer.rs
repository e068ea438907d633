//! Console implementation of the core `Renderer`.
//!
//! Replies are rendered as markdown through `termimad`, wrapped to the
//! terminal width. Prompts and notices use `console` styles, the screen is
//! cleared with `crossterm`, and an `indicatif` spinner runs while a message
//! is in flight.

use std::io::Write;
use std::time::Duration;

use console::style;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};
use termimad::MadSkin;

use sensei_core::render::{Notice, Prompt, Renderer};
use sensei_types::llm::Reply;

use super::banner::print_welcome_banner;

/// How a notice is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Farewell,
    Error,
}

/// Pick the tone for a notice.
pub fn tone(notice: &Notice) -> Tone {
    match notice {
        Notice::StartingConversation | Notice::MultilineEnabled => Tone::Info,
        Notice::EndingConversation | Notice::InputClosed => Tone::Farewell,
        Notice::StartFailed
        | Notice::InvalidInput
        | Notice::UnexpectedFormat
        | Notice::DeliveryFailed
        | Notice::NoResponse { .. }
        | Notice::Interrupted => Tone::Error,
    }
}

/// Footer text for a reply: model and token usage, when reported.
pub fn footer_text(reply: &Reply) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(model) = &reply.model {
        parts.push(model.clone());
    }
    if let Some(usage) = &reply.usage {
        parts.push(format!(
            "{} in \u{00b7} {} out tokens",
            usage.input_tokens, usage.output_tokens
        ));
    }
    (!parts.is_empty()).then(|| parts.join(" \u{00b7} "))
}

/// Terminal renderer for the chat session.
pub struct ConsoleRenderer {
    skin: MadSkin,
    spinner: Option<ProgressBar>,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code.set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            spinner: None,
        }
    }

    /// Render markdown wrapped to `width` columns.
    pub fn render_markdown(&self, markdown: &str, width: usize) -> String {
        self.skin.text(markdown, Some(width)).to_string()
    }

    fn terminal_width() -> usize {
        crossterm::terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(80)
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ConsoleRenderer {
    fn clear_screen(&mut self) {
        let mut stdout = std::io::stdout();
        if let Err(err) = crossterm::execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)) {
            tracing::debug!(error = %err, "could not clear the screen");
        }
    }

    fn banner(&mut self) {
        print_welcome_banner();
    }

    fn prompt(&mut self, prompt: Prompt) {
        print!("{}", style(prompt.text()).green().bold());
        let _ = std::io::stdout().flush();
    }

    fn message(&mut self, reply: &Reply, text: &str) {
        let rendered = self.render_markdown(text, Self::terminal_width());
        println!();
        println!("{}", rendered.trim_end());
        if let Some(footer) = footer_text(reply) {
            println!("  {} {}", style("|").dim(), style(footer).dim());
        }
        println!();
    }

    fn notice(&mut self, notice: Notice) {
        let text = notice.text();
        match tone(&notice) {
            Tone::Info => println!("{}\n", style(text).cyan().bold()),
            Tone::Farewell => println!("{}\n", style(text).yellow().bold()),
            Tone::Error if notice == Notice::Interrupted => {
                println!("\n{}", style(text).red().bold());
            }
            Tone::Error => println!("{}", style(text).red().bold()),
        }
    }

    fn start_thinking(&mut self) {
        let spinner = ProgressBar::new_spinner();
        let template = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}");
        if let Ok(spinner_style) = template {
            spinner.set_style(spinner_style);
        }
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn stop_thinking(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensei_types::llm::Usage;

    #[test]
    fn test_footer_text() {
        let reply = Reply {
            message: Some("hi".to_string()),
            model: Some("claude-sonnet-4-20250514".to_string()),
            usage: Some(Usage {
                input_tokens: 42,
                output_tokens: 7,
            }),
        };
        assert_eq!(
            footer_text(&reply).as_deref(),
            Some("claude-sonnet-4-20250514 \u{00b7} 42 in \u{00b7} 7 out tokens")
        );
        assert!(footer_text(&Reply::text("hi")).is_none());
    }

    #[test]
    fn test_notice_tones() {
        assert_eq!(tone(&Notice::StartingConversation), Tone::Info);
        assert_eq!(tone(&Notice::EndingConversation), Tone::Farewell);
        assert_eq!(tone(&Notice::NoResponse { attempts: 3 }), Tone::Error);
        assert_eq!(tone(&Notice::UnexpectedFormat), Tone::Error);
    }

    #[test]
    fn test_render_markdown_keeps_text() {
        let renderer = ConsoleRenderer::new();
        let rendered = renderer.render_markdown("Welcome to the **dojo**, grasshopper.", 80);
        let plain = console::strip_ansi_codes(&rendered);
        assert!(plain.contains("Welcome to the"));
        assert!(plain.contains("dojo"));
        assert!(!plain.contains("**"));
    }

    #[test]
    fn test_stop_thinking_without_spinner_is_noop() {
        let mut renderer = ConsoleRenderer::new();
        renderer.stop_thinking();
        assert!(renderer.spinner.is_none());
    }
}
