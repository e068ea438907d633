//! Shared domain types for Sensei.
//!
//! This crate contains the types passed between the conversation core, the
//! transport adapters and the terminal front end: input tags, session state,
//! replies, the transport failure taxonomy, and configuration.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
