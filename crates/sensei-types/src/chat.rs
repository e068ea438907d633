//! Conversation-level types: input modes, commands, user input and session state.

use std::fmt;
use std::str::FromStr;

/// How the Input Controller gathers the next logical input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// One line per input; reserved command tokens are recognized.
    #[default]
    SingleLine,
    /// Lines are accumulated until the `END` sentinel; everything is message text.
    Multiline,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::SingleLine => write!(f, "single_line"),
            InputMode::Multiline => write!(f, "multiline"),
        }
    }
}

/// Reserved in-band commands typed at the message prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reset the conversation and start a fresh one.
    NewChat,
    /// Ask to leave; gated by a confirmation prompt.
    Exit,
    /// Capture the next message in multiline mode.
    ToggleMultiline,
    /// Affirmative answer to the exit confirmation prompt.
    ConfirmExit,
}

impl Command {
    /// The literal token that produces this command, if it can be typed directly.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Command::NewChat => Some("newchat"),
            Command::Exit => Some("exit"),
            Command::ToggleMultiline => Some("multiline"),
            Command::ConfirmExit => None,
        }
    }
}

impl FromStr for Command {
    type Err = String;

    /// Parse a single-line command token (case-insensitive, surrounding
    /// whitespace ignored). `ConfirmExit` is never produced here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newchat" => Ok(Command::NewChat),
            "exit" => Ok(Command::Exit),
            "multiline" => Ok(Command::ToggleMultiline),
            other => Err(format!("not a command: '{other}'")),
        }
    }
}

/// One logical unit of user input, as produced by the Input Controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// A reserved command.
    Command(Command),
    /// Free text to forward to the remote service.
    Message(String),
    /// A blank single line (or a declined confirmation).
    Invalid,
}

/// Lifecycle state of the single live session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No conversation has been opened with the remote service yet (or it was reset).
    #[default]
    Uninitialized,
    /// A conversation is open; the mode says how the next input is captured.
    Active(InputMode),
    /// The interactive loop is over.
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::Active(mode) => write!(f, "active({mode})"),
            SessionState::Terminated => write!(f, "terminated"),
        }
    }
}

/// Why the interactive loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `exit` and confirmed with `yes`.
    Exited,
    /// An external interrupt (Ctrl+C) arrived.
    Interrupted,
    /// The input stream reached end of file.
    InputClosed,
}
