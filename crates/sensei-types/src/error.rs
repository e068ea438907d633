use thiserror::Error;

/// Errors raised while reading user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("input stream closed")]
    Closed,

    #[error("input interrupted")]
    Interrupted,
}

/// Errors related to configuration and start-up wiring.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable '{0}' is not set")]
    MissingApiKey(String),

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
