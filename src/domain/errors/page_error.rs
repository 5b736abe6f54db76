//! Page-source error types.

use thiserror::Error;

/// Errors produced when requesting a review page.
#[derive(Debug, Clone, Error)]
pub enum PageError {
    /// The page source could not be reached or read.
    #[error("page source unavailable: {message}")]
    SourceUnavailable {
        /// Human-readable failure description.
        message: String,
    },

    /// The page payload could not be decoded.
    #[error("failed to decode page payload: {message}")]
    Decode {
        /// Human-readable decode failure description.
        message: String,
    },
}

impl PageError {
    /// Creates a source-unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
