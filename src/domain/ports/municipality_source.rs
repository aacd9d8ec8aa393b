//! Driven port for the public municipality directory.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::city::City;

/// Errors surfaced by municipality directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MunicipalitySourceError {
    /// The lookup endpoint could not be reached.
    #[error("municipality lookup transport failed: {message}")]
    Transport { message: String },
    /// The request ran out of time.
    #[error("municipality lookup timed out: {message}")]
    Timeout { message: String },
    /// The endpoint answered with a non-success status.
    #[error("municipality lookup rejected the request: {message}")]
    Backend { status: u16, message: String },
    /// The response body could not be decoded into municipalities.
    #[error("municipality payload could not be decoded: {message}")]
    Decode { message: String },
}

impl MunicipalitySourceError {
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

    /// Helper for non-success statuses.
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

/// Port for fetching the full municipality directory.
///
/// The directory is small enough (a few thousand records) to fetch whole;
/// filtering happens in the domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MunicipalitySource: Send + Sync {
    /// Fetch every municipality.
    async fn fetch_all(&self) -> Result<Vec<City>, MunicipalitySourceError>;
}

/// Fixture source for running without the public lookup configured.
///
/// Always returns an empty directory, so autocomplete yields no results.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMunicipalitySource;

#[async_trait]
impl MunicipalitySource for FixtureMunicipalitySource {
    async fn fetch_all(&self) -> Result<Vec<City>, MunicipalitySourceError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_source_returns_empty_directory() {
        let cities = FixtureMunicipalitySource
            .fetch_all()
            .await
            .expect("fixture fetch should succeed");
        assert!(cities.is_empty());
    }
}
