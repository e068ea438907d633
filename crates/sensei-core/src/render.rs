//! Renderer port.
//!
//! The core never prints. Everything the user sees goes through a
//! `Renderer` handed to the orchestrator at construction.

use sensei_types::llm::Reply;

/// Prompts shown before reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Single-line message prompt.
    Message,
    /// Multiline capture, terminated by `END`.
    Multiline,
    /// Exit confirmation (yes/no).
    ConfirmExit,
}

impl Prompt {
    pub fn text(&self) -> &'static str {
        match self {
            Prompt::Message => "Your message: ",
            Prompt::Multiline => "Your message (send with 'END' on a new line): ",
            Prompt::ConfirmExit => "Are you sure you want to exit? (yes/no): ",
        }
    }
}

/// User-facing notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A new conversation is being opened.
    StartingConversation,
    /// The opening exchange failed; chatting continues anyway.
    StartFailed,
    /// Multiline capture is armed for the next message.
    MultilineEnabled,
    /// Blank single-line input.
    InvalidInput,
    /// A reply arrived without a displayable message.
    UnexpectedFormat,
    /// Delivery failed with a non-transient error.
    DeliveryFailed,
    /// Every delivery attempt failed transiently.
    NoResponse { attempts: u32 },
    /// Confirmed exit.
    EndingConversation,
    /// Ctrl+C or a source-reported abort.
    Interrupted,
    /// The input stream closed.
    InputClosed,
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::StartingConversation => "Starting a new conversation...".to_string(),
            Notice::StartFailed => {
                "Unable to start a new conversation. You can keep typing or try 'newchat'."
                    .to_string()
            }
            Notice::MultilineEnabled => {
                "Switched to multiline mode. Type your message and end with 'END'.".to_string()
            }
            Notice::InvalidInput => {
                "Invalid input. Please type a valid message or command.".to_string()
            }
            Notice::UnexpectedFormat => "Unexpected response format.".to_string(),
            Notice::DeliveryFailed => {
                "Something went wrong while sending your message.".to_string()
            }
            Notice::NoResponse { attempts } => {
                format!("No response after {attempts} attempts. Please try again.")
            }
            Notice::EndingConversation => "Ending the conversation...".to_string(),
            Notice::Interrupted => {
                "Keyboard interrupt detected. Exiting the conversation...".to_string()
            }
            Notice::InputClosed => "Input closed. Ending the conversation...".to_string(),
        }
    }
}

/// Presents replies, prompts and notices to the user.
pub trait Renderer {
    /// Clear the terminal.
    fn clear_screen(&mut self);

    /// Show the banner and the command instructions.
    fn banner(&mut self);

    /// Show a prompt before input is read.
    fn prompt(&mut self, prompt: Prompt);

    /// Display the text of a reply.
    fn message(&mut self, reply: &Reply, text: &str);

    /// Display a notice.
    fn notice(&mut self, notice: Notice);

    /// A delivery is in flight.
    fn start_thinking(&mut self) {}

    /// The in-flight delivery finished (successfully or not).
    fn stop_thinking(&mut self) {}

    /// Display a reply, or the unexpected-format notice when it has no message.
    fn reply(&mut self, reply: &Reply) {
        match reply.message() {
            Some(text) => self.message(reply, text),
            None => self.notice(Notice::UnexpectedFormat),
        }
    }
}
