//! Error types for the estuary map core

use thiserror::Error;

/// A failure of one fetch cycle. None of these are fatal; the handler logs
/// them and returns to idle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request could not complete
    #[error("request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status
    #[error("HTTP {status} for region '{region}'")]
    Http { status: u16, region: String },

    /// The body was not a recognizable point payload
    #[error("failed to parse point data: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Network(e.to_string())
    }
}

/// Errors raised while loading a [`crate::config::MapConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
