//! Reqwest-backed municipality directory source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::MunicipalityDto;
use crate::domain::City;
use crate::domain::ports::{MunicipalitySource, MunicipalitySourceError};

/// Public IBGE localities endpoint serving every Brazilian municipality.
pub const DEFAULT_MUNICIPALITIES_URL: &str =
    "https://servicodados.ibge.gov.br/api/v1/localidades/municipios";

/// Municipality source performing one GET against the public directory.
pub struct MunicipalityHttpSource {
    client: Client,
    endpoint: Url,
}

impl MunicipalityHttpSource {
    /// Build a source with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl MunicipalitySource for MunicipalityHttpSource {
    async fn fetch_all(&self) -> Result<Vec<City>, MunicipalitySourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: Vec<MunicipalityDto> = serde_json::from_slice(&body).map_err(|error| {
            MunicipalitySourceError::decode(format!("invalid municipality payload: {error}"))
        })?;
        Ok(decoded.into_iter().map(Into::into).collect())
    }
}

fn map_transport_error(error: reqwest::Error) -> MunicipalitySourceError {
    if error.is_timeout() {
        MunicipalitySourceError::timeout(error.to_string())
    } else {
        MunicipalitySourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MunicipalitySourceError {
    let preview = String::from_utf8_lossy(body)
        .chars()
        .take(160)
        .collect::<String>();
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            MunicipalitySourceError::timeout(message)
        }
        _ => MunicipalitySourceError::backend(status.as_u16(), message),
    }
}
