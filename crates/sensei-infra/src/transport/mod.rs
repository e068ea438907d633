//! Transport implementations.
//!
//! Concrete [`ChatTransport`](sensei_core::transport::provider::ChatTransport)
//! adapters for the remote AI service, plus a factory ([`create_transport`])
//! that builds the configured one behind a [`BoxTransport`].

pub mod anthropic;
pub mod conversation;
pub mod http;
pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;
use tracing::Span;
use uuid::Uuid;

use sensei_core::transport::box_transport::BoxTransport;
use sensei_observe::genai_attrs::{
    GEN_AI_CONVERSATION_ID, GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME,
    GEN_AI_REQUEST_MAX_TOKENS, GEN_AI_REQUEST_MODEL, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT,
};
use sensei_types::config::ProviderConfig;
use sensei_types::error::ConfigError;
use sensei_types::llm::{ProviderKind, Reply};

use self::anthropic::AnthropicTransport;
use self::openai_compat::OpenAiCompatibleTransport;

/// Create a [`BoxTransport`] from a [`ProviderConfig`].
///
/// The API key is read from the environment variable named by
/// [`ProviderConfig::api_key_env`], which falls back to the provider kind's
/// usual variable.
///
/// # Errors
///
/// Fails if the key is missing or empty, or if the HTTP client cannot be built.
pub fn create_transport(config: &ProviderConfig) -> Result<BoxTransport, ConfigError> {
    let api_key = resolve_api_key(config.api_key_env())?;
    build_transport(config, api_key)
}

/// Build the configured transport with an already-resolved key.
pub fn build_transport(
    config: &ProviderConfig,
    api_key: SecretString,
) -> Result<BoxTransport, ConfigError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

    let transport = match config.kind {
        ProviderKind::Anthropic => {
            let mut transport =
                AnthropicTransport::new(client, api_key, config.model.clone(), config.max_tokens);
            if let Some(base_url) = &config.base_url {
                transport = transport.with_base_url(base_url);
            }
            BoxTransport::new(transport)
        }
        ProviderKind::OpenAiCompatible => {
            let mut transport = OpenAiCompatibleTransport::new(
                client,
                api_key,
                config.model.clone(),
                config.max_tokens,
            );
            if let Some(base_url) = &config.base_url {
                transport = transport.with_base_url(base_url);
            }
            BoxTransport::new(transport)
        }
    };

    tracing::info!(
        provider = %config.kind,
        model = %config.model,
        "transport ready"
    );
    Ok(transport)
}

/// Read a non-empty API key from the environment variable `name`.
pub fn resolve_api_key(name: &str) -> Result<SecretString, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value.trim().to_string())),
        _ => Err(ConfigError::MissingApiKey(name.to_string())),
    }
}

/// Span wrapping one `send`, with the GenAI request attributes filled in.
///
/// Usage fields start empty; [`record_usage`] fills them once a reply
/// arrives.
pub(crate) fn chat_span(
    provider: &str,
    model: &str,
    max_tokens: u32,
    conversation_id: Uuid,
) -> Span {
    tracing::info_span!(
        "gen_ai.chat",
        { GEN_AI_OPERATION_NAME } = OP_CHAT,
        { GEN_AI_PROVIDER_NAME } = provider,
        { GEN_AI_REQUEST_MODEL } = model,
        { GEN_AI_REQUEST_MAX_TOKENS } = max_tokens,
        { GEN_AI_CONVERSATION_ID } = %conversation_id,
        { GEN_AI_USAGE_INPUT_TOKENS } = tracing::field::Empty,
        { GEN_AI_USAGE_OUTPUT_TOKENS } = tracing::field::Empty,
    )
}

pub(crate) fn record_usage(span: &Span, reply: &Reply) {
    if let Some(usage) = &reply.usage {
        span.record(GEN_AI_USAGE_INPUT_TOKENS, usage.input_tokens);
        span.record(GEN_AI_USAGE_OUTPUT_TOKENS, usage.output_tokens);
    }
}
