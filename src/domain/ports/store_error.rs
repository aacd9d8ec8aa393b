//! Error type shared by the hosted data API ports.

use thiserror::Error;

/// Errors surfaced by data API store adapters.
///
/// Both the category and product stores address the same hosted backend, so
/// they share one failure vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("data API transport failed: {message}")]
    Transport { message: String },
    /// The request ran out of time.
    #[error("data API request timed out: {message}")]
    Timeout { message: String },
    /// The backend answered with a non-success status.
    #[error("data API rejected the request: {message}")]
    Backend { status: u16, message: String },
    /// The response body could not be decoded into rows.
    #[error("data API response could not be decoded: {message}")]
    Decode { message: String },
}

impl StoreError {
    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for request timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for non-success backend statuses.
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
