//! HTTP transport with retry policies.

pub mod client;
pub mod retry;

pub use client::IgHttp;
pub use retry::{RetryConfig, RetryPolicy};
