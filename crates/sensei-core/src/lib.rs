//! Conversation core for Sensei.
//!
//! This crate defines the "ports" the front end and the transport adapters
//! plug into (`ChatTransport`, `LineSource`, `Renderer`) and the logic that
//! sits between them: the delivery policy, the input controller and the
//! session state machine. It depends only on `sensei-types` -- never on
//! `sensei-infra` or any HTTP/terminal crate.

pub mod chat;
pub mod delivery;
pub mod render;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;
