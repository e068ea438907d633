//! Chat session handling.
//!
//! - `input`: reads logical inputs (commands, messages) from a line source
//! - `session`: the session state and its transitions
//! - `orchestrator`: the interactive loop tying transport, input and renderer together

pub mod input;
pub mod orchestrator;
pub mod session;
