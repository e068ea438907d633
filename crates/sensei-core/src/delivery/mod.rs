//! Message delivery: bounded retry with a fixed delay around one `send`.

pub mod retry;

pub use retry::DeliveryPolicy;
