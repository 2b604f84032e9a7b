use std::io;

use teaspoon_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] teaspoon_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "No server configured. Pass --server-url, set TEASPOON_SERVER_URL, or run `teaspoon config init --server-url <URL>`."
    )]
    ServerNotConfigured,
    #[error("Note was not posted: {0}")]
    NotPosted(String),
}
