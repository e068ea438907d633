//! Configuration types for Sensei.
//!
//! `SenseiConfig` mirrors `config.toml` in the data directory. Every section
//! and field has a default, so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderKind;

/// Instruction sent as the opening turn of every new conversation.
pub const DEFAULT_INSTRUCTION: &str = "Let's play a game. These are the rules: \
Your name is Hax. \
You are a sensei to the unguided grasshoppers of the cyber world. \
Your duty is to welcome young pupils and show them the way. \
You can only use written text and must provide all lesson material locally. \
You are the dojo, the sensei, the vast wealth of knowledge. You are the way! \
IMPORTANT: Do not recommend anything outside your dojo. Use subtle emojis. \
Format your responses for cli. ";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenseiConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which remote service to talk to and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default = "default_model")]
    pub model: String,
    /// Override the backend's default base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key.
    ///
    /// Unset means the provider kind's usual variable, see
    /// [`ProviderConfig::api_key_env`].
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            model: default_model(),
            base_url: None,
            api_key_env: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// The environment variable to read the API key from.
    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.kind.default_api_key_env())
    }
}

/// Bounded-retry settings for message delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// The assistant's standing instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            instruction: default_instruction(),
        }
    }
}

/// Log file and trace export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file name, relative to the data directory unless absolute.
    #[serde(default = "default_log_file")]
    pub file: String,
    /// Export spans through the OpenTelemetry stdout exporter.
    #[serde(default)]
    pub otel: bool,
}

fn default_log_file() -> String {
    "sensei.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            otel: false,
        }
    }
}
