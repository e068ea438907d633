//! Input Controller.
//!
//! Turns raw lines into tagged `UserInput` values. Single-line mode
//! recognizes the reserved command tokens; multiline mode accumulates lines
//! until the `END` sentinel and treats the whole block as message text.

use sensei_types::chat::{Command, InputMode, UserInput};
use sensei_types::error::InputError;

use crate::render::{Prompt, Renderer};

/// Line terminating a multiline message (compared trimmed, case-insensitive).
pub const SENTINEL: &str = "END";

/// Events produced by a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// One raw line, without its line terminator.
    Line(String),
    /// End of input.
    Closed,
    /// The source saw an interrupt (e.g. Ctrl+C while reading).
    Interrupted,
}

/// A line-oriented raw input source.
pub trait LineSource: Send {
    /// Wait for the next line.
    fn next_line(&mut self) -> impl std::future::Future<Output = LineEvent> + Send;
}

/// Parse one single-line input.
///
/// Blank input is `Invalid`; reserved tokens are commands; anything else is
/// a message equal to the trimmed text.
pub fn parse_single_line(line: &str) -> UserInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return UserInput::Invalid;
    }

    match trimmed.parse::<Command>() {
        Ok(command) => UserInput::Command(command),
        Err(_) => UserInput::Message(trimmed.to_string()),
    }
}

/// Whether `line` is the multiline sentinel.
pub fn is_sentinel(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(SENTINEL)
}

/// Join captured multiline lines: newline separated, outer edges trimmed.
pub fn join_multiline(lines: &[String]) -> String {
    lines.join("\n").trim().to_string()
}

/// Reads logical inputs from a [`LineSource`].
pub struct InputController<L> {
    source: L,
}

impl<L: LineSource> InputController<L> {
    pub fn new(source: L) -> Self {
        Self { source }
    }

    /// Read the next logical input in the given mode, prompting first.
    pub async fn read_next<R: Renderer>(
        &mut self,
        mode: InputMode,
        renderer: &mut R,
    ) -> Result<UserInput, InputError> {
        match mode {
            InputMode::SingleLine => {
                renderer.prompt(Prompt::Message);
                let line = self.read_line().await?;
                Ok(parse_single_line(&line))
            }
            InputMode::Multiline => {
                renderer.prompt(Prompt::Multiline);
                let mut lines = Vec::new();
                loop {
                    let line = self.read_line().await?;
                    if is_sentinel(&line) {
                        break;
                    }
                    lines.push(line);
                }
                Ok(UserInput::Message(join_multiline(&lines)))
            }
        }
    }

    /// Ask for exit confirmation.
    ///
    /// Returns `Command(ConfirmExit)` for `yes` in any case; any other
    /// answer is `Invalid`, i.e. the exit is declined.
    pub async fn read_confirmation<R: Renderer>(
        &mut self,
        renderer: &mut R,
    ) -> Result<UserInput, InputError> {
        renderer.prompt(Prompt::ConfirmExit);
        let line = self.read_line().await?;
        if line.trim().eq_ignore_ascii_case("yes") {
            Ok(UserInput::Command(Command::ConfirmExit))
        } else {
            Ok(UserInput::Invalid)
        }
    }

    async fn read_line(&mut self) -> Result<String, InputError> {
        match self.source.next_line().await {
            LineEvent::Line(line) => Ok(line),
            LineEvent::Closed => Err(InputError::Closed),
            LineEvent::Interrupted => Err(InputError::Interrupted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingRenderer, Rendered, ScriptedLines};

    fn controller(lines: &[&str]) -> InputController<ScriptedLines> {
        InputController::new(ScriptedLines::new(lines))
    }

    #[test]
    fn test_parse_commands_case_insensitive() {
        assert_eq!(parse_single_line("exit"), UserInput::Command(Command::Exit));
        assert_eq!(parse_single_line("  ExIt  "), UserInput::Command(Command::Exit));
        assert_eq!(parse_single_line("NEWCHAT"), UserInput::Command(Command::NewChat));
        assert_eq!(
            parse_single_line("multiline"),
            UserInput::Command(Command::ToggleMultiline)
        );
    }

    #[test]
    fn test_parse_blank_is_invalid() {
        assert_eq!(parse_single_line(""), UserInput::Invalid);
        assert_eq!(parse_single_line("   \t "), UserInput::Invalid);
    }

    #[test]
    fn test_parse_message_is_trimmed() {
        for raw in ["  teach me about ports  ", "exit please", "yes", "END", "new chat"] {
            assert_eq!(parse_single_line(raw), UserInput::Message(raw.trim().to_string()));
        }
    }

    #[test]
    fn test_sentinel_detection() {
        assert!(is_sentinel("END"));
        assert!(is_sentinel("  end  "));
        assert!(is_sentinel("End"));
        assert!(!is_sentinel("ENDING"));
        assert!(!is_sentinel("the end"));
    }

    #[tokio::test]
    async fn test_single_line_prompts_and_parses() {
        let mut input = controller(&["  what is nmap? "]);
        let mut renderer = RecordingRenderer::default();

        let result = input.read_next(InputMode::SingleLine, &mut renderer).await;
        assert_eq!(result, Ok(UserInput::Message("what is nmap?".to_string())));
        assert_eq!(renderer.events, vec![Rendered::Prompt(Prompt::Message)]);
    }

    #[tokio::test]
    async fn test_multiline_joins_until_sentinel() {
        let mut input = controller(&["", "  first line", "", "second line  ", "end", "after"]);
        let mut renderer = RecordingRenderer::default();

        let result = input.read_next(InputMode::Multiline, &mut renderer).await;
        assert_eq!(
            result,
            Ok(UserInput::Message("first line\n\nsecond line".to_string()))
        );
        assert_eq!(renderer.events, vec![Rendered::Prompt(Prompt::Multiline)]);

        // The line after the sentinel is left for the next read.
        let next = input.read_next(InputMode::SingleLine, &mut renderer).await;
        assert_eq!(next, Ok(UserInput::Message("after".to_string())));
    }

    #[tokio::test]
    async fn test_multiline_does_not_recognize_commands() {
        let mut input = controller(&["exit", "newchat", "END"]);
        let mut renderer = RecordingRenderer::default();

        let result = input.read_next(InputMode::Multiline, &mut renderer).await;
        assert_eq!(result, Ok(UserInput::Message("exit\nnewchat".to_string())));
    }

    #[tokio::test]
    async fn test_empty_multiline_is_an_empty_message() {
        let mut input = controller(&["   ", "END"]);
        let mut renderer = RecordingRenderer::default();

        let result = input.read_next(InputMode::Multiline, &mut renderer).await;
        assert_eq!(result, Ok(UserInput::Message(String::new())));
    }

    #[tokio::test]
    async fn test_multiline_closed_before_sentinel() {
        let mut input = controller(&["half a thought"]);
        let mut renderer = RecordingRenderer::default();

        let result = input.read_next(InputMode::Multiline, &mut renderer).await;
        assert_eq!(result, Err(InputError::Closed));
    }

    #[tokio::test]
    async fn test_confirmation() {
        let mut renderer = RecordingRenderer::default();
        for answer in ["yes", "YES", " Yes "] {
            let mut input = controller(&[answer]);
            assert_eq!(
                input.read_confirmation(&mut renderer).await,
                Ok(UserInput::Command(Command::ConfirmExit))
            );
        }
        for answer in ["no", "", "y", "yes!"] {
            let mut input = controller(&[answer]);
            assert_eq!(
                input.read_confirmation(&mut renderer).await,
                Ok(UserInput::Invalid)
            );
        }
        assert!(renderer
            .events
            .iter()
            .all(|e| *e == Rendered::Prompt(Prompt::ConfirmExit)));
    }

    #[tokio::test]
    async fn test_interrupted_source() {
        let mut input =
            InputController::new(ScriptedLines::from_events(vec![LineEvent::Interrupted]));
        let mut renderer = RecordingRenderer::default();

        let result = input.read_next(InputMode::SingleLine, &mut renderer).await;
        assert_eq!(result, Err(InputError::Interrupted));
    }
}
