//! Error types for teaspoon-core

use thiserror::Error;

/// Result type alias using teaspoon-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in teaspoon-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
