//! ChatTransport trait definition.
//!
//! The single operation the core needs from the remote service:
//! `send(message, new_conversation) -> Reply | TransportError`.

use sensei_types::llm::{Reply, TransportError};

/// Trait for transport adapters (Anthropic, OpenAI-compatible, mocks).
///
/// `send` takes `&mut self`: the adapter owns the conversation history and
/// at most one message is ever in flight. Implementations must tolerate
/// being called again with the same message after a transient failure.
///
/// Implementations live in sensei-infra.
pub trait ChatTransport: Send {
    /// Human-readable backend name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Deliver one message.
    ///
    /// With `new_conversation = true` the adapter drops any prior history
    /// and opens a fresh conversation whose first turn is `message`.
    fn send(
        &mut self,
        message: &str,
        new_conversation: bool,
    ) -> impl std::future::Future<Output = Result<Reply, TransportError>> + Send;
}
