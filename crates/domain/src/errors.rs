//! Error types used throughout the application

use thiserror::Error;

/// Main error type for Settler
#[derive(Error, Debug)]
pub enum SettlerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Settler operations
pub type Result<T> = std::result::Result<T, SettlerError>;
