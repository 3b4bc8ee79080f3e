use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::client::SearchBackend;
use super::error::SearchError;
use super::types::Article;

/// Scripted in-memory search backend.
///
/// Queries without a scripted answer return the default article list. Credentials marked
/// rate limited answer every request with [`SearchError::RateLimited`].
#[derive(Default)]
pub struct MockSearchBackend {
    by_query: Mutex<HashMap<String, Vec<Article>>>,
    default_articles: Mutex<Vec<Article>>,
    limited: Mutex<HashSet<String>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(self, query: &str, articles: Vec<Article>) -> Self {
        self.by_query.lock().insert(query.to_string(), articles);
        self
    }

    pub fn with_default_articles(self, articles: Vec<Article>) -> Self {
        *self.default_articles.lock() = articles;
        self
    }

    pub fn with_rate_limited(self, credential: &str) -> Self {
        self.limited.lock().insert(credential.to_string());
        self
    }

    pub fn with_failing_query(self, query: &str) -> Self {
        self.failing.lock().insert(query.to_string());
        self
    }

    pub fn set_rate_limited(&self, credential: &str, limited: bool) {
        let mut set = self.limited.lock();
        if limited {
            set.insert(credential.to_string());
        } else {
            set.remove(credential);
        }
    }

    /// `(query, credential)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search(
        &self,
        query: &str,
        credential: &str,
        page_size: usize,
    ) -> Result<Vec<Article>, SearchError> {
        self.calls
            .lock()
            .push((query.to_string(), credential.to_string()));

        if self.limited.lock().contains(credential) {
            return Err(SearchError::RateLimited);
        }
        if self.failing.lock().contains(query) {
            return Err(SearchError::Http {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        let articles = match self.by_query.lock().get(query) {
            Some(articles) => articles.clone(),
            None => self.default_articles.lock().clone(),
        };
        Ok(articles.into_iter().take(page_size).collect())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
