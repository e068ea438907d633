//! BoxTransport -- object-safe dynamic dispatch wrapper for ChatTransport.
//!
//! 1. Define an object-safe `ChatTransportDyn` trait with boxed futures
//! 2. Blanket-impl `ChatTransportDyn` for all `T: ChatTransport`
//! 3. `BoxTransport` wraps `Box<dyn ChatTransportDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use sensei_types::llm::{Reply, TransportError};

use super::provider::ChatTransport;

/// Object-safe version of [`ChatTransport`] with a boxed future.
pub trait ChatTransportDyn: Send {
    fn name(&self) -> &str;

    fn send_boxed<'a>(
        &'a mut self,
        message: &'a str,
        new_conversation: bool,
    ) -> Pin<Box<dyn Future<Output = Result<Reply, TransportError>> + Send + 'a>>;
}

impl<T: ChatTransport> ChatTransportDyn for T {
    fn name(&self) -> &str {
        ChatTransport::name(self)
    }

    fn send_boxed<'a>(
        &'a mut self,
        message: &'a str,
        new_conversation: bool,
    ) -> Pin<Box<dyn Future<Output = Result<Reply, TransportError>> + Send + 'a>> {
        Box::pin(self.send(message, new_conversation))
    }
}

/// Type-erased transport, chosen at runtime from configuration.
///
/// Since `ChatTransport` uses RPITIT it cannot be a trait object directly;
/// `BoxTransport` implements `ChatTransport` itself by delegating to the
/// inner `ChatTransportDyn`, so generic code accepts it unchanged.
pub struct BoxTransport {
    inner: Box<dyn ChatTransportDyn>,
}

impl BoxTransport {
    /// Wrap a concrete transport.
    pub fn new<T: ChatTransport + 'static>(transport: T) -> Self {
        Self {
            inner: Box::new(transport),
        }
    }
}

impl ChatTransport for BoxTransport {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn send(
        &mut self,
        message: &str,
        new_conversation: bool,
    ) -> Result<Reply, TransportError> {
        self.inner.send_boxed(message, new_conversation).await
    }
}
