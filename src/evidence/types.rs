use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::canonical::canonicalize_url;
use super::reputation::is_reputable;

/// One article as returned by a search backend, before dedup and flagging.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub publisher: String,
    pub description: String,
    pub content: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(url: impl Into<String>, title: impl Into<String>, publisher: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            publisher: publisher.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }
}

/// A retrieved evidence source. `url` is canonical and unique within one retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub url: String,
    pub title: String,
    pub publisher: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Placeholder evidence served while the search service is unavailable.
    pub synthetic: bool,
    pub reputable: bool,
}

impl Source {
    pub fn from_article(article: Article) -> Self {
        let url = canonicalize_url(&article.url);
        let reputable = is_reputable(&article.publisher, &url);
        Self {
            url,
            title: article.title,
            publisher: article.publisher,
            description: article.description,
            content: article.content,
            published_at: article.published_at,
            synthetic: false,
            reputable,
        }
    }

    /// Title, description and content joined for scoring.
    pub fn evidence_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len()
                + self.description.len()
                + self.content.as_ref().map_or(0, String::len)
                + 4,
        );
        for part in [
            self.title.as_str(),
            self.description.as_str(),
            self.content.as_deref().unwrap_or(""),
        ] {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push_str(". ");
            }
            text.push_str(part.trim_end_matches('.'));
        }
        text
    }
}

/// Result of one retrieval run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RetrievalOutcome {
    pub sources: Vec<Source>,
    /// Sources are the synthetic fallback set.
    pub used_fallback: bool,
    pub from_cache: bool,
}
