//! Infrastructure layer for Sensei.
//!
//! Concrete implementations of the ports defined in `sensei-core`: HTTP
//! transports for the remote AI service, plus data directory resolution and
//! `config.toml` loading.

pub mod config;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;
