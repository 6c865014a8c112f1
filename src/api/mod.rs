//! Transport boundary for the pipeline service API

pub mod client;
pub mod envelope;
pub mod http;
pub mod response;

use async_trait::async_trait;
pub use client::{ApiClient, ApiClientConfig};
pub use envelope::Envelope;
pub use http::HttpTransport;
pub use response::{ApiError, ApiRequest, ApiResponse, Method};

/// Trait for issuing API requests - allows for different implementations
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send a request and wait for the response
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}
