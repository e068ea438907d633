//! Interactive terminal chat.
//!
//! Terminal-side implementations of the core's ports (stdin line source,
//! console renderer) and the wiring that runs a session. Entry point:
//! `loop_runner::run_chat`.

pub mod banner;
pub mod input;
pub mod loop_runner;
pub mod renderer;
