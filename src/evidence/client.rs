//! News search backends.
//!
//! `NewsApiClient` talks to a NewsAPI-compatible `/v2/everything` endpoint. Tests use
//! [`MockSearchBackend`](super::MockSearchBackend) behind the same trait.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::error::SearchError;
use super::types::Article;
use crate::constants::DEFAULT_SEARCH_TIMEOUT;

#[async_trait]
/// Query-based news lookup with per-credential rate limiting.
pub trait SearchBackend: Send + Sync {
    /// Runs `query` with `credential`, returning at most `page_size` articles.
    async fn search(
        &self,
        query: &str,
        credential: &str,
        page_size: usize,
    ) -> Result<Vec<Article>, SearchError>;

    /// Short label for logs and readiness reporting.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<WireArticle>,
}

#[derive(Debug, Deserialize)]
struct WireSource {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireArticle {
    source: Option<WireSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: Option<String>,
}

impl WireArticle {
    fn into_article(self) -> Option<Article> {
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        let title = self.title.unwrap_or_default();
        // NewsAPI marks takedowns this way.
        if title == "[Removed]" {
            return None;
        }
        let published_at = self
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Some(Article {
            url,
            title,
            publisher: self.source.and_then(|s| s.name).unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            content: self.content.filter(|c| !c.trim().is_empty()),
            published_at,
        })
    }
}

/// NewsAPI-compatible HTTP client.
#[derive(Clone)]
pub struct NewsApiClient {
    http: HttpClient,
    base_url: String,
}

impl std::fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let timeout = if timeout.is_zero() {
            DEFAULT_SEARCH_TIMEOUT
        } else {
            timeout
        };
        Self {
            http: HttpClient::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SearchBackend for NewsApiClient {
    async fn search(
        &self,
        query: &str,
        credential: &str,
        page_size: usize,
    ) -> Result<Vec<Article>, SearchError> {
        let url = format!("{}/v2/everything", self.base_url);
        let page_size = page_size.clamp(1, 100).to_string();

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .header("X-Api-Key", credential)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }
        if !status.is_success() {
            let message = resp
                .json::<WireError>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Err(SearchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: EverythingResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        let articles: Vec<Article> = body
            .articles
            .into_iter()
            .filter_map(WireArticle::into_article)
            .collect();

        debug!(query, articles = articles.len(), "search request succeeded");
        Ok(articles)
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}
