//! HTTP layer: `JournalHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::JournalHttp;
pub use retry::{RetryConfig, RetryPolicy};
