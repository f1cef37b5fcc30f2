//! Generation API HTTP client.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use vgen_models::{CreateJobRequest, CreateJobResponse, JobId, JobStatusUpdate};

use crate::error::{ClientError, ClientResult};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the generation API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("VIDGEN_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout: Duration::from_secs(
                std::env::var("VIDGEN_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

/// Client for the video generation API.
///
/// Stateless request executor: every outbound request negotiates JSON,
/// and every status read carries a cache-busting timestamp so
/// intermediary caches cannot serve stale job state.
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client.
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidRequest(format!("base URL: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, base_url })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ApiConfig::from_env())
    }

    /// Submit a generation request. `POST /api/generate`.
    pub async fn create_job(&self, request: &CreateJobRequest) -> ClientResult<CreateJobResponse> {
        let url = self.endpoint("/api/generate")?;
        debug!(%url, "Submitting generation request");

        let response = self
            .http
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(ClientError::Network)?;

        self.decode(url.path(), response).await
    }

    /// Fetch the current status of a job. `GET /api/job/{id}`.
    pub async fn job_status(&self, id: &JobId) -> ClientResult<JobStatusUpdate> {
        let url = self.endpoint(&format!("/api/job/{id}"))?;
        debug!(%url, "Polling job status");

        let response = self
            .http
            .get(url.clone())
            .query(&[("_ts", Utc::now().timestamp_millis())])
            .send()
            .await
            .map_err(ClientError::Network)?;

        self.decode(url.path(), response).await
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidRequest(format!("endpoint {path}: {e}")))
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status != reqwest::StatusCode::NOT_FOUND {
                warn!(%path, %status, "API request failed");
            }
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(ClientError::Network)?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(%path, "Undecodable API response");
            ClientError::Json(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ApiClient::new(config),
            Err(ClientError::InvalidRequest(_))
        ));
    }
}
