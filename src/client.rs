use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{ErrorResponse, PredictionRequest, PredictionResult};
use crate::opts::ServiceOpts;
use crate::prelude::*;

/// Why a prediction could not be shown.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Valor inválido para {field}")]
    InvalidField { field: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Server { status: StatusCode, message: String },

    #[error("respuesta inválida del servidor: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl PredictionError {
    /// Whether the caller, rather than the prediction service, is at fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidField { .. } => true,
            Self::Server { status, .. } => status.is_client_error(),
            Self::Transport(_) | Self::MalformedResponse(_) => false,
        }
    }
}

pub type SharedService = Arc<dyn PredictionService>;

/// Remote prediction endpoint.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> StdResult<PredictionResult, PredictionError>;
}

#[derive(Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<StdDuration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().context("failed to build the HTTP client")?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_opts(opts: &ServiceOpts) -> Result<Self> {
        Self::new(&opts.endpoint, opts.timeout)
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    /// Issues exactly one request, no retries.
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> StdResult<PredictionResult, PredictionError> {
        let start_instant = Instant::now();
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, n_bytes = body.len(), elapsed = ?start_instant.elapsed());
        parse_prediction_response(status, &body)
    }
}

/// Interprets the endpoint's response: the result on success, the server's
/// `error` message otherwise.
pub fn parse_prediction_response(
    status: StatusCode,
    body: &[u8],
) -> StdResult<PredictionResult, PredictionError> {
    if status.is_success() {
        return Ok(serde_json::from_slice(body)?);
    }
    let message = serde_json::from_slice::<ErrorResponse>(body)?
        .error
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
    Err(PredictionError::Server { status, message })
}

/// Generic JSON fetch: fails on a non-2xx status and logs any failure.
pub async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let result: Result<T> = async {
        let response = request
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP error! status: {}", status.as_u16());
        }
        Ok(response.json::<T>().await?)
    }
    .await;
    if let Err(error) = &result {
        error!("fetch error: {:#}", error);
    }
    result
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_success_ok() -> Result {
        let result = parse_prediction_response(
            StatusCode::OK,
            // language=JSON
            br#"{"cluster_name":"Clientes Premium","segment_info":{"size":3,"percentage":1.5,"avg_age":40,"avg_income":80,"avg_spending":70}}"#,
        )?;
        assert_eq!(result.cluster_name, "Clientes Premium");
        Ok(())
    }

    #[test]
    fn parse_server_error_ok() {
        let error = parse_prediction_response(
            StatusCode::BAD_REQUEST,
            // language=JSON
            br#"{"error":"Faltan features: ['Age']"}"#,
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "Faltan features: ['Age']");
        assert!(error.is_client_error());
    }

    #[test]
    fn parse_server_error_without_message_ok() {
        let error = parse_prediction_response(StatusCode::INTERNAL_SERVER_ERROR, b"{}").unwrap_err();
        assert_eq!(error.to_string(), "Internal Server Error");
        assert!(!error.is_client_error());
    }

    #[test]
    fn parse_non_json_error_ok() {
        let error = parse_prediction_response(StatusCode::BAD_GATEWAY, b"<html>").unwrap_err();
        assert!(matches!(error, PredictionError::MalformedResponse(_)));
    }

    #[test]
    fn parse_malformed_success_ok() {
        let error = parse_prediction_response(StatusCode::OK, br#"{"cluster_name":"X"}"#).unwrap_err();
        assert!(matches!(error, PredictionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn connection_refused_ok() -> Result {
        let client = PredictionClient::new("http://127.0.0.1:1/api/predict", None)?;
        let request: PredictionRequest = [("Age", 45.0)].into_iter().collect();
        let error = client.predict(&request).await.unwrap_err();
        assert!(matches!(error, PredictionError::Transport(_)));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_json_connection_refused_ok() {
        let client = reqwest::Client::new();
        let result = fetch_json::<serde_json::Value>(client.get("http://127.0.0.1:1/")).await;
        assert!(result.is_err());
    }
}
