//! Anthropic Messages API transport.

pub mod client;
pub mod types;

pub use client::AnthropicTransport;
