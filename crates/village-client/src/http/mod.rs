//! Authenticated transport: request descriptors, buffered responses and the
//! refresh-and-retry client.

mod client;
mod request;
mod response;

pub use client::ApiClient;
pub use request::{ApiRequest, Attempt};
pub use response::ApiResponse;

/// Tracing target for HTTP operations.
pub const TRACING_TARGET: &str = "village_client::http";
