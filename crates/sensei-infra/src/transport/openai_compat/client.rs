//! OpenAiCompatibleTransport -- [`ChatTransport`] over `/chat/completions`.

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use sensei_core::transport::provider::ChatTransport;
use sensei_types::llm::{Reply, TransportError};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::transport::conversation::Conversation;
use crate::transport::http::post_json;
use crate::transport::{chat_span, record_usage};

/// Transport for OpenAI-compatible chat completion APIs.
///
/// Authenticates with a bearer token. Same no-`Debug` rule as
/// [`AnthropicTransport`](crate::transport::anthropic::AnthropicTransport).
pub struct OpenAiCompatibleTransport {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
    conversation: Conversation,
}

impl OpenAiCompatibleTransport {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

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

    /// Point at another compatible server, e.g. `http://localhost:11434/v1`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn build_request(&self, message: &str) -> ChatCompletionRequest {
        let messages = self
            .conversation
            .with_user_turn(message)
            .into_iter()
            .map(|m| ChatMessage {
                role: m.role.to_string(),
                content: Some(m.content),
            })
            .collect();

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
        }
    }

    async fn exchange(&self, message: &str) -> Result<Reply, TransportError> {
        let body = self.build_request(message);
        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret());

        let text = post_json(request, &body).await?;
        let response: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| TransportError::Decode(format!("failed to parse response: {e}")))?;
        Ok(response.into_reply())
    }
}

impl ChatTransport for OpenAiCompatibleTransport {
    fn name(&self) -> &str {
        "openai_compatible"
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
