//! Chat session wiring.
//!
//! Builds the orchestrator from configuration and the terminal adapters,
//! hooks Ctrl+C up to a cancellation token and runs the session to its end.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use sensei_core::chat::orchestrator::ChatOrchestrator;
use sensei_core::delivery::DeliveryPolicy;
use sensei_core::transport::box_transport::BoxTransport;
use sensei_types::chat::SessionEnd;
use sensei_types::config::SenseiConfig;

use super::input::ThreadedLines;
use super::renderer::ConsoleRenderer;

/// Run one interactive session against `transport` until it ends.
///
/// An interrupt that arrived during start-up ends the session before the
/// terminal is touched.
pub async fn run_chat(
    config: &SenseiConfig,
    transport: BoxTransport,
    shutdown: &CancellationToken,
) -> SessionEnd {
    if shutdown.is_cancelled() {
        info!("interrupted before the session started");
        return SessionEnd::Interrupted;
    }

    let policy = DeliveryPolicy::from_config(&config.delivery);
    info!(
        max_attempts = policy.max_attempts(),
        retry_delay_ms = policy.delay().as_millis() as u64,
        "starting chat session"
    );

    let mut orchestrator = ChatOrchestrator::new(
        transport,
        ThreadedLines::stdin(),
        ConsoleRenderer::new(),
        policy,
        config.persona.instruction.clone(),
    );
    orchestrator.run(shutdown).await
}

/// Cancel `token` on the first Ctrl+C.
pub fn spawn_interrupt_listener(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received");
                token.cancel();
            }
            Err(err) => tracing::warn!(error = %err, "could not listen for Ctrl+C"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensei_core::transport::provider::ChatTransport;
    use sensei_types::llm::{Reply, TransportError};

    struct Unreachable;

    impl ChatTransport for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn send(
            &mut self,
            _message: &str,
            _new_conversation: bool,
        ) -> Result<Reply, TransportError> {
            Err(TransportError::Other("no session should start".to_string()))
        }
    }

    #[tokio::test]
    async fn test_interrupt_during_startup_skips_session() {
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let end = run_chat(
            &SenseiConfig::default(),
            BoxTransport::new(Unreachable),
            &shutdown,
        )
        .await;

        assert_eq!(end, SessionEnd::Interrupted);
    }

    #[tokio::test]
    async fn test_interrupt_listener_can_be_aborted() {
        let shutdown = CancellationToken::new();
        let listener = spawn_interrupt_listener(shutdown.clone());
        listener.abort();

        assert!(listener.await.unwrap_err().is_cancelled());
        assert!(!shutdown.is_cancelled());
    }
}
