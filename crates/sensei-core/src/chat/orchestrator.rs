//! Session state machine driving the interactive loop.
//!
//! Coordinates the conversation lifecycle: opening a conversation with the
//! standing instruction, reading inputs through the Input Controller,
//! dispatching commands, delivering messages through the Delivery Policy,
//! and handing results to the Renderer. An external interrupt ends the loop
//! from any await point, bypassing the exit confirmation.

use sensei_types::chat::{Command, InputMode, SessionEnd, UserInput};
use sensei_types::error::InputError;
use sensei_types::llm::{DeliveryOutcome, Reply};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::delivery::DeliveryPolicy;
use crate::render::{Notice, Renderer};
use crate::transport::provider::ChatTransport;

use super::input::{InputController, LineSource};
use super::session::Session;

/// What the loop does after handling one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    End(SessionEnd),
}

/// Owns the session and its collaborators for the lifetime of the process.
pub struct ChatOrchestrator<T, L, R> {
    transport: T,
    input: InputController<L>,
    renderer: R,
    policy: DeliveryPolicy,
    instruction: String,
    session: Session,
}

impl<T, L, R> ChatOrchestrator<T, L, R>
where
    T: ChatTransport,
    L: LineSource,
    R: Renderer,
{
    /// Wire a new orchestrator. The session starts uninitialized.
    pub fn new(
        transport: T,
        source: L,
        renderer: R,
        policy: DeliveryPolicy,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            input: InputController::new(source),
            renderer,
            policy,
            instruction: instruction.into(),
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run until the user exits, the input closes, or `shutdown` fires.
    pub async fn run(&mut self, shutdown: &CancellationToken) -> SessionEnd {
        loop {
            let flow = tokio::select! {
                biased;
                _ = shutdown.cancelled() => Flow::End(SessionEnd::Interrupted),
                flow = self.step() => flow,
            };

            if let Flow::End(end) = flow {
                return self.finish(end);
            }
        }
    }

    /// One loop iteration: open a conversation if needed, read one input, handle it.
    pub async fn step(&mut self) -> Flow {
        if !self.session.started() {
            self.start_conversation().await;
        }

        let mode = self.session.input_mode();
        let input = match self.input.read_next(mode, &mut self.renderer).await {
            Ok(input) => input,
            Err(err) => return Flow::End(Self::end_for(err)),
        };

        if mode == InputMode::Multiline {
            self.session.leave_multiline();
        }

        self.handle_input(input).await
    }

    /// Dispatch one logical input.
    pub async fn handle_input(&mut self, input: UserInput) -> Flow {
        match input {
            UserInput::Command(Command::ToggleMultiline) => {
                self.session.enter_multiline();
                self.renderer.notice(Notice::MultilineEnabled);
                Flow::Continue
            }
            UserInput::Command(Command::NewChat) => {
                info!("new chat requested");
                self.session.reset();
                self.start_conversation().await;
                Flow::Continue
            }
            UserInput::Command(Command::Exit) => self.confirm_exit().await,
            UserInput::Message(text) => {
                self.deliver(&text).await;
                Flow::Continue
            }
            UserInput::Command(Command::ConfirmExit) | UserInput::Invalid => {
                self.renderer.notice(Notice::InvalidInput);
                Flow::Continue
            }
        }
    }

    /// Open a new conversation with the standing instruction.
    ///
    /// A failure is logged and reported, but the session still becomes
    /// active so the user can keep typing.
    pub async fn start_conversation(&mut self) {
        self.renderer.clear_screen();
        self.renderer.banner();
        self.renderer.notice(Notice::StartingConversation);

        self.renderer.start_thinking();
        let result = self.transport.send(&self.instruction, true).await;
        self.renderer.stop_thinking();

        match result {
            Ok(reply) => {
                info!(transport = self.transport.name(), "conversation started");
                self.show_reply(&reply);
            }
            Err(err) => {
                error!(error = %err, "Unable to start a new conversation");
                self.renderer.notice(Notice::StartFailed);
            }
        }

        self.session.activate();
    }

    async fn confirm_exit(&mut self) -> Flow {
        match self.input.read_confirmation(&mut self.renderer).await {
            Ok(UserInput::Command(Command::ConfirmExit)) => {
                self.renderer.clear_screen();
                self.renderer.notice(Notice::EndingConversation);
                Flow::End(SessionEnd::Exited)
            }
            Ok(_) => {
                debug!("exit declined");
                Flow::Continue
            }
            Err(err) => Flow::End(Self::end_for(err)),
        }
    }

    async fn deliver(&mut self, text: &str) {
        self.renderer.start_thinking();
        let outcome = self.policy.deliver(&mut self.transport, text).await;
        self.renderer.stop_thinking();

        match outcome {
            DeliveryOutcome::Success(reply) => self.show_reply(&reply),
            DeliveryOutcome::FatalFailure(_) | DeliveryOutcome::RetryableFailure(_) => {
                self.renderer.notice(Notice::DeliveryFailed);
            }
            DeliveryOutcome::Exhausted { attempts, .. } => {
                self.renderer.notice(Notice::NoResponse { attempts });
            }
        }
    }

    fn show_reply(&mut self, reply: &Reply) {
        if reply.message().is_none() {
            warn!("reply has no message field");
        }
        self.renderer.reply(reply);
    }

    fn finish(&mut self, end: SessionEnd) -> SessionEnd {
        self.renderer.stop_thinking();
        match end {
            SessionEnd::Interrupted => self.renderer.notice(Notice::Interrupted),
            SessionEnd::InputClosed => self.renderer.notice(Notice::InputClosed),
            SessionEnd::Exited => {}
        }
        self.session.terminate();
        info!(reason = ?end, "chat session ended");
        end
    }

    fn end_for(err: InputError) -> SessionEnd {
        match err {
            InputError::Closed => SessionEnd::InputClosed,
            InputError::Interrupted => SessionEnd::Interrupted,
        }
    }
}
