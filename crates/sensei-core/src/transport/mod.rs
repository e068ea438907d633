//! Transport abstractions for reaching the remote AI service.
//!
//! - `ChatTransport`: RPITIT trait for concrete adapters
//! - `BoxTransport`: object-safe wrapper for runtime backend selection

pub mod box_transport;
pub mod provider;
