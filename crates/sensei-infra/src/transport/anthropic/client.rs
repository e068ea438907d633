//! AnthropicTransport -- [`ChatTransport`] over the Anthropic Messages API.
//!
//! Sends the full conversation to `/v1/messages` on every call with the
//! authentication headers the API expects.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use sensei_core::transport::provider::ChatTransport;
use sensei_types::llm::{Reply, TransportError};

use super::types::{AnthropicMessage, AnthropicRequest, AnthropicResponse};
use crate::transport::conversation::Conversation;
use crate::transport::http::post_json;
use crate::transport::{chat_span, record_usage};

/// Transport for the Anthropic Messages API.
///
/// Does NOT derive Debug; the key only leaves its `SecretString` when the
/// request headers are built.
pub struct AnthropicTransport {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
    conversation: Conversation,
}

impl AnthropicTransport {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";

    pub fn new(
        client: reqwest::Client,
        api_key: SecretString,
        model: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
            max_tokens,
            conversation: Conversation::new(),
        }
    }

    /// Override the base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Build the request for `message` on top of the current history.
    pub fn build_request(&self, message: &str) -> AnthropicRequest {
        let messages = self
            .conversation
            .with_user_turn(message)
            .into_iter()
            .map(|m| AnthropicMessage {
                role: m.role.to_string(),
                content: m.content,
            })
            .collect();

        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages,
        }
    }

    async fn exchange(&self, message: &str) -> Result<Reply, TransportError> {
        let body = self.build_request(message);
        let request = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION);

        let text = post_json(request, &body).await?;
        let response: AnthropicResponse = serde_json::from_str(&text)
            .map_err(|e| TransportError::Decode(format!("failed to parse response: {e}")))?;
        Ok(response.into_reply())
    }
}

impl ChatTransport for AnthropicTransport {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn send(
        &mut self,
        message: &str,
        new_conversation: bool,
    ) -> Result<Reply, TransportError> {
        if new_conversation {
            self.conversation.restart();
        }

        let span = chat_span(
            self.name(),
            &self.model,
            self.max_tokens,
            self.conversation.id(),
        );

        let reply = self.exchange(message).instrument(span.clone()).await?;

        record_usage(&span, &reply);
        self.conversation.commit(message, &reply);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedServer;
    use sensei_types::llm::FailureKind;

    fn ok_body(text: &str) -> String {
        serde_json::json!({
            "id": "msg_01",
            "model": "claude-sonnet-4-20250514",
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
        .to_string()
    }

    fn transport(base_url: &str) -> AnthropicTransport {
        AnthropicTransport::new(
            reqwest::Client::new(),
            SecretString::from("test-key-not-real"),
            "claude-sonnet-4-20250514".to_string(),
            1024,
        )
        .with_base_url(base_url)
    }

    #[test]
    fn test_build_request_appends_user_turn() {
        let transport = transport("http://localhost");
        let request = transport.build_request("hello");
        assert_eq!(request.model, "claude-sonnet-4-20250514");
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content, "hello");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let transport = transport("http://localhost:8080/");
        assert_eq!(transport.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_send_posts_messages_with_headers() {
        let server = ScriptedServer::new(vec![(200, ok_body("Welcome, grasshopper"))]).await;
        let mut transport = transport(&server.base_url);

        let reply = transport.send("You are Hax.", true).await.unwrap();

        assert_eq!(reply.message(), Some("Welcome, grasshopper"));
        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].request_line().starts_with("POST /v1/messages"));
        assert_eq!(requests[0].header("x-api-key").as_deref(), Some("test-key-not-real"));
        assert_eq!(
            requests[0].header("anthropic-version").as_deref(),
            Some("2023-06-01")
        );
        assert_eq!(requests[0].body["messages"][0]["content"], "You are Hax.");
    }

    #[tokio::test]
    async fn test_history_is_replayed_and_reset() {
        let server = ScriptedServer::new(vec![
            (200, ok_body("welcome")),
            (200, ok_body("lesson one")),
            (200, ok_body("welcome back")),
        ])
        .await;
        let mut transport = transport(&server.base_url);

        transport.send("instruction", true).await.unwrap();
        transport.send("teach me", false).await.unwrap();
        assert_eq!(transport.conversation().turns().len(), 4);
        let first_id = transport.conversation().id();

        transport.send("instruction", true).await.unwrap();
        assert_eq!(transport.conversation().turns().len(), 2);
        assert_ne!(transport.conversation().id(), first_id);

        let requests = server.requests();
        let second = requests[1].body["messages"].as_array().unwrap();
        assert_eq!(second.len(), 3);
        assert_eq!(second[1]["role"], "assistant");
        assert_eq!(second[1]["content"], "welcome");
        assert_eq!(second[2]["content"], "teach me");
        assert_eq!(requests[2].body["messages"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_overloaded_is_transient_and_keeps_history() {
        let server = ScriptedServer::new(vec![
            (200, ok_body("welcome")),
            (
                529,
                r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#
                    .to_string(),
            ),
        ])
        .await;
        let mut transport = transport(&server.base_url);
        transport.send("instruction", true).await.unwrap();

        let err = transport.send("hello", false).await.unwrap_err();

        assert_eq!(err, TransportError::Unavailable { status: 529 });
        assert_eq!(err.kind(), FailureKind::Transient);
        assert_eq!(transport.conversation().turns().len(), 2);
    }

    #[tokio::test]
    async fn test_unauthorized_is_fatal() {
        let server = ScriptedServer::new(vec![(
            401,
            r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#
                .to_string(),
        )])
        .await;
        let mut transport = transport(&server.base_url);

        let err = transport.send("hello", true).await.unwrap_err();
        assert_eq!(err, TransportError::Authentication);
        assert_eq!(err.kind(), FailureKind::Fatal);
    }

    #[tokio::test]
    async fn test_bad_request_carries_error_message() {
        let server = ScriptedServer::new(vec![(
            400,
            r#"{"type":"error","error":{"type":"invalid_request_error","message":"messages: text content blocks must be non-empty"}}"#
                .to_string(),
        )])
        .await;
        let mut transport = transport(&server.base_url);

        let err = transport.send("", false).await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Rejected {
                status: 400,
                message: "messages: text content blocks must be non-empty".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = ScriptedServer::new(vec![(200, "<html>gateway</html>".to_string())]).await;
        let mut transport = transport(&server.base_url);

        let err = transport.send("hello", true).await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
        assert!(transport.conversation().turns().is_empty());
    }
}
