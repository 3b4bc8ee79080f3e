//! HTTP client helpers for tests.

use std::time::Duration;

use serde::Deserialize;

use verity::pipeline::AnalysisResult;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    pub http: String,
    pub search: String,
    pub nli: String,
    pub evidence_cache_entries: usize,
    pub nli_cache_entries: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Self::json(resp).await
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;
        Self::json(resp).await
    }

    /// Returns the result and the `x-verity-status` header.
    pub async fn analyze(&self, text: &str) -> Result<(AnalysisResult, String), TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/analyze"))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let status_header = resp
            .headers()
            .get("x-verity-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        Ok((Self::json(resp).await?, status_header))
    }

    /// Returns the raw Server-Sent Events body.
    pub async fn analyze_stream(&self, text: &str) -> Result<String, TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/analyze"))
            .json(&serde_json::json!({ "text": text, "stream": true }))
            .send()
            .await?;

        match resp.status().as_u16() {
            200 => Ok(resp.text().await?),
            400 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => Err(TestClientError::UnexpectedStatus(
                status,
                resp.text().await.unwrap_or_default(),
            )),
        }
    }

    async fn json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, TestClientError> {
        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            400 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => Err(TestClientError::UnexpectedStatus(
                status,
                resp.text().await.unwrap_or_default(),
            )),
        }
    }
}
