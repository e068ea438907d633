//! Remote AI service types for Sensei.
//!
//! These types model the data shapes exchanged with the transport adapters:
//! conversation turns, replies, usage, the closed set of transport failures,
//! and the outcome of delivering one message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a turn in a conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single turn kept in a transport's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Token usage reported by the remote service, when it reports any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The remote service's response to one `send`.
///
/// `message` is the textual field the renderer displays. A reply without it
/// is an "unexpected format" condition, not a transport failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl Reply {
    /// A reply carrying only a message.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// The displayable text, if the reply has one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Whether a failed attempt is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connectivity-class failure; waiting and retrying may help.
    Transient,
    /// Anything else; retrying would only hide the problem.
    Fatal,
}

/// Errors from transport adapters, translated from service-specific failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("service unavailable (HTTP {status})")]
    Unavailable { status: u16 },

    #[error("authentication failed")]
    Authentication,

    #[error("request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Classify this failure for the delivery policy.
    pub fn kind(&self) -> FailureKind {
        match self {
            TransportError::Connection(_)
            | TransportError::Timeout(_)
            | TransportError::Unavailable { .. } => FailureKind::Transient,
            TransportError::Authentication
            | TransportError::Rejected { .. }
            | TransportError::Decode(_)
            | TransportError::Other(_) => FailureKind::Fatal,
        }
    }

    /// Translate a non-success HTTP status into the taxonomy.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => TransportError::Authentication,
            502 | 503 | 504 | 529 => TransportError::Unavailable { status },
            _ => TransportError::Rejected {
                status,
                message: body,
            },
        }
    }
}

/// Result of attempting to deliver one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The service answered.
    Success(Reply),
    /// A single attempt failed with a transient error (only seen per attempt).
    RetryableFailure(TransportError),
    /// A non-transient error; no further attempts were made.
    FatalFailure(TransportError),
    /// Every attempt failed transiently.
    Exhausted {
        attempts: u32,
        last_error: Option<TransportError>,
    },
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::Success(_))
    }
}

/// Remote backend selected in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
}

impl ProviderKind {
    /// Environment variable read for the API key when none is configured.
    pub fn default_api_key_env(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAiCompatible => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::OpenAiCompatible => write!(f, "openai_compatible"),
        }
    }
}
