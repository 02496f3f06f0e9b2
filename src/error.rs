//! Unified error handling for the domashka crate
//!
//! Consolidates the domain-specific errors into a single [`Error`] enum so
//! the poll loop can decide recovery strategy in one place, while each module
//! keeps its own precise error type.

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::api::validate::ValidationError;
pub use crate::api::ApiError;
pub use crate::status::FormatError;
pub use crate::telegram::NotifyError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport-level failures talking to the Practicum API
    Transport,
    /// Response body has an unexpected shape
    Shape,
    /// A homework entry is missing data or carries an unknown status
    Content,
    /// Telegram delivery failures
    Delivery,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the domashka crate
#[derive(Error, Debug)]
pub enum Error {
    /// Practicum API fetch errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Response shape validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification text rendering errors
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Telegram delivery errors
    #[error("Notify error: {0}")]
    Notify(#[from] NotifyError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors outside the typed fetch path
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error is recoverable by the poll loop (sleep and retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(_) | Self::Validation(_) | Self::Format(_) | Self::Notify(_) => true,
            Self::Io(_) => true,
            Self::Http(_) => true,
            Self::Json(_) => true,
            Self::Config(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Api(_) | Self::Http(_) => ErrorCategory::Transport,
            Self::Validation(_) | Self::Json(_) => ErrorCategory::Shape,
            Self::Format(_) => ErrorCategory::Content,
            Self::Notify(_) => ErrorCategory::Delivery,
            Self::Config(_) => ErrorCategory::Config,
            Self::Io(_) => ErrorCategory::Other,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
