//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::outbound::municipalities::DEFAULT_MUNICIPALITIES_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the hosted data API.
#[derive(Debug, Clone)]
pub struct DataApiConfig {
    pub url: Url,
    pub api_key: String,
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_api: Option<DataApiConfig>,
    pub(crate) municipalities_url: Url,
    pub(crate) request_timeout: Duration,
}

impl ServerConfig {
    /// Construct a configuration with defaults for everything but the bind
    /// address. Without a data API attached the server runs on in-memory
    /// stores.
    ///
    /// # Panics
    /// Never: the default municipalities URL is a valid constant.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        let municipalities_url =
            Url::parse(DEFAULT_MUNICIPALITIES_URL).expect("default municipalities URL parses");
        Self {
            bind_addr,
            data_api: None,
            municipalities_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Attach the hosted data API. When configured, category and product
    /// storage go through it instead of the in-memory stores.
    #[must_use]
    pub fn with_data_api(mut self, url: Url, api_key: String) -> Self {
        self.data_api = Some(DataApiConfig { url, api_key });
        self
    }

    /// Override the municipality directory endpoint.
    #[must_use]
    pub fn with_municipalities_url(mut self, url: Url) -> Self {
        self.municipalities_url = url;
        self
    }

    /// Override the outbound request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Build a configuration from the environment.
    ///
    /// Reads `BIND_ADDR`, `DATA_API_URL` plus `DATA_API_KEY`,
    /// `MUNICIPALITIES_URL`, and `REQUEST_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when a variable is present but malformed,
    /// or when `DATA_API_URL` is set without `DATA_API_KEY`.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|error| std::io::Error::other(format!("invalid BIND_ADDR: {error}")))?;
        let mut config = Self::new(bind_addr);

        if let Ok(raw) = env::var("DATA_API_URL") {
            let url = Url::parse(&raw)
                .map_err(|error| std::io::Error::other(format!("invalid DATA_API_URL: {error}")))?;
            let api_key = env::var("DATA_API_KEY").map_err(|_| {
                std::io::Error::other("DATA_API_URL is set but DATA_API_KEY is missing")
            })?;
            config = config.with_data_api(url, api_key);
        }

        if let Ok(raw) = env::var("MUNICIPALITIES_URL") {
            let url = Url::parse(&raw).map_err(|error| {
                std::io::Error::other(format!("invalid MUNICIPALITIES_URL: {error}"))
            })?;
            config = config.with_municipalities_url(url);
        }

        if let Ok(raw) = env::var("REQUEST_TIMEOUT_SECS") {
            let seconds = raw.parse::<u64>().map_err(|error| {
                std::io::Error::other(format!("invalid REQUEST_TIMEOUT_SECS: {error}"))
            })?;
            config = config.with_request_timeout(Duration::from_secs(seconds.max(1)));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_the_data_api_unset() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("valid addr"));
        assert!(config.data_api.is_none());
        assert_eq!(
            config.municipalities_url.as_str(),
            DEFAULT_MUNICIPALITIES_URL
        );
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn builder_attaches_the_data_api() {
        let url = Url::parse("https://example.supabase.co/rest/v1/").expect("valid url");
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("valid addr"))
            .with_data_api(url, "service-key".into());
        let data_api = config.data_api.expect("data api configured");
        assert_eq!(data_api.api_key, "service-key");
    }
}
