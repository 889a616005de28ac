// src/error.rs

//! Unified error handling for the search application.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure or timeout while talking to the upstream listing
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream body was not the expected JSON envelope
    #[error("Decode error: {source}")]
    Decode { source: serde_json::Error },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a decode error from a JSON parse failure.
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error came from fetching or decoding an upstream page.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Decode { .. })
    }
}
