//! API-specific error types

use settler_domain::SettlerError;
use thiserror::Error;

/// Errors produced by the retailer API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token acquisition or refresh failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The API answered with a non-2xx status
    #[error("status {status} while requesting {url}")]
    Status { status: u16, url: String },

    /// Connect failure, connect timeout or read timeout
    #[error("network failure for {url}: {message}")]
    Network { url: String, message: String },

    /// The response body could not be read
    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    /// Client construction / configuration problem
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ApiError> for SettlerError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(msg) => Self::Auth(msg),
            ApiError::Status { .. } => Self::Http(err.to_string()),
            ApiError::Network { .. } | ApiError::Body { .. } => Self::Network(err.to_string()),
            ApiError::Config(msg) => Self::Config(msg),
        }
    }
}
