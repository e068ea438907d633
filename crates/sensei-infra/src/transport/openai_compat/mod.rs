//! OpenAI-compatible chat completions transport.
//!
//! Serves any backend exposing `/chat/completions` (OpenAI, Ollama, vLLM,
//! LM Studio) through a configurable base URL.

pub mod client;
pub mod types;

pub use client::OpenAiCompatibleTransport;
