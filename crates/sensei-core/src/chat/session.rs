//! Session state for the single live conversation.
//!
//! Wraps a `SessionState` with the allowed transitions. Transitions that do
//! not apply in the current state are ignored.

use sensei_types::chat::{InputMode, SessionState};
use tracing::debug;

/// The one session the process holds for its lifetime.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// A fresh, uninitialized session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a conversation has been opened with the remote service.
    pub fn started(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// How the next input is captured. Single-line unless multiline is armed.
    pub fn input_mode(&self) -> InputMode {
        match self.state {
            SessionState::Active(mode) => mode,
            _ => InputMode::SingleLine,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// `Uninitialized -> Active(SingleLine)`.
    pub fn activate(&mut self) {
        if self.state == SessionState::Uninitialized {
            self.transition(SessionState::Active(InputMode::SingleLine));
        }
    }

    /// `Active(SingleLine) -> Active(Multiline)`.
    pub fn enter_multiline(&mut self) {
        if self.state == SessionState::Active(InputMode::SingleLine) {
            self.transition(SessionState::Active(InputMode::Multiline));
        }
    }

    /// `Active(Multiline) -> Active(SingleLine)`, after one multiline capture.
    pub fn leave_multiline(&mut self) {
        if self.state == SessionState::Active(InputMode::Multiline) {
            self.transition(SessionState::Active(InputMode::SingleLine));
        }
    }

    /// `Active(*) -> Uninitialized`. The input mode is not preserved.
    pub fn reset(&mut self) {
        if self.started() {
            self.transition(SessionState::Uninitialized);
        }
    }

    /// Any state `-> Terminated`.
    pub fn terminate(&mut self) {
        self.transition(SessionState::Terminated);
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "session transition");
        self.state = next;
    }
}
