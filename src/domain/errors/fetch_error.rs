//! Single-resource fetch error types.

use thiserror::Error;

/// Errors produced when fetching one resource.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The URL string could not be parsed.
    #[error("invalid url: {url}")]
    InvalidUrl {
        /// The offending URL string.
        url: String,
    },

    /// The request exceeded its per-fetch deadline.
    #[error("request timed out")]
    Timeout,

    /// The transport failed or the server answered with a non-success status.
    #[error("transport error: {message}")]
    Transport {
        /// Human-readable transport failure description.
        message: String,
    },

    /// The server answered successfully with an empty body.
    #[error("response body was empty")]
    EmptyBody,
}

impl FetchError {
    /// Creates an invalid-URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns whether a retry could plausibly succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryability_classification() {
        assert!(FetchError::Timeout.is_retryable());
        assert!(FetchError::transport("reset").is_retryable());
        assert!(!FetchError::invalid_url("::").is_retryable());
        assert!(!FetchError::EmptyBody.is_retryable());
    }
}
