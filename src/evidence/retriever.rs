use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::client::SearchBackend;
use super::credentials::{CredentialPool, MarkOutcome};
use super::error::SearchError;
use super::fallback::fallback_sources;
use super::types::{RetrievalOutcome, Source};
use crate::cache::CacheHandle;
use crate::constants::{
    DEFAULT_QUERY_DELAY, DEFAULT_SOURCES_PER_RUN, EVIDENCE_CACHE_CAPACITY, EVIDENCE_CACHE_TTL,
};
use crate::hashing::hash_query_set;

/// Cache of merged retrievals keyed by the normalized query set.
pub type EvidenceCache = CacheHandle<u64, Arc<Vec<Source>>>;

pub fn new_evidence_cache() -> EvidenceCache {
    CacheHandle::new(EVIDENCE_CACHE_CAPACITY, EVIDENCE_CACHE_TTL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrieverConfig {
    /// Sources kept after merge and sort.
    pub max_results: usize,
    /// Articles requested per query.
    pub page_size: usize,
    /// Pause between successive query dispatches.
    pub query_delay: Duration,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_SOURCES_PER_RUN,
            page_size: DEFAULT_SOURCES_PER_RUN,
            query_delay: DEFAULT_QUERY_DELAY,
        }
    }
}

impl RetrieverConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = delay;
        self
    }
}

/// Runs queries against the search backend with credential rotation, URL dedup, caching
/// and a synthetic fallback.
#[derive(Clone)]
pub struct EvidenceRetriever {
    backend: Arc<dyn SearchBackend>,
    credentials: Arc<CredentialPool>,
    cache: EvidenceCache,
    config: RetrieverConfig,
}

impl std::fmt::Debug for EvidenceRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceRetriever")
            .field("backend", &self.backend.name())
            .field("credentials", &self.credentials)
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}

enum QueryOutcome {
    Merged(usize),
    Skipped,
    Exhausted,
}

impl EvidenceRetriever {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        credentials: Arc<CredentialPool>,
        cache: EvidenceCache,
        config: RetrieverConfig,
    ) -> Self {
        Self {
            backend,
            credentials,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &EvidenceCache {
        &self.cache
    }

    pub fn credentials(&self) -> &CredentialPool {
        &self.credentials
    }

    /// `false` when there are no credentials and every run serves the fallback set.
    pub fn is_live(&self) -> bool {
        !self.credentials.is_empty()
    }

    #[instrument(skip(self, queries), fields(queries = queries.len()))]
    pub async fn retrieve(&self, queries: &[String]) -> RetrievalOutcome {
        if queries.is_empty() {
            return RetrievalOutcome::default();
        }

        let key = hash_query_set(queries, self.config.max_results);
        if let Some(hit) = self.cache.get(&key) {
            debug!(sources = hit.len(), "evidence cache hit");
            return RetrievalOutcome {
                sources: hit.as_ref().clone(),
                used_fallback: false,
                from_cache: true,
            };
        }

        if self.credentials.is_empty() {
            info!("no search credentials configured; serving fallback sources");
            return Self::fallback();
        }

        let mut merged: Vec<Source> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (i, query) in queries.iter().enumerate() {
            if i > 0 && !self.config.query_delay.is_zero() {
                tokio::time::sleep(self.config.query_delay).await;
            }

            match self.run_query(query, &mut merged, &mut seen).await {
                QueryOutcome::Merged(added) => {
                    debug!(query = %query, added, total = merged.len(), "query merged");
                }
                QueryOutcome::Skipped => {}
                QueryOutcome::Exhausted => {
                    warn!(query = %query, "search credentials exhausted mid-run; serving fallback sources");
                    return Self::fallback();
                }
            }
        }

        if merged.is_empty() {
            warn!("live search returned no sources; serving fallback sources");
            return Self::fallback();
        }

        // Stable: ties keep first-seen order.
        merged.sort_by(|a, b| {
            b.reputable
                .cmp(&a.reputable)
                .then_with(|| b.published_at.cmp(&a.published_at))
        });
        merged.truncate(self.config.max_results);

        self.cache.insert(key, Arc::new(merged.clone()));
        info!(sources = merged.len(), "evidence retrieved");

        RetrievalOutcome {
            sources: merged,
            used_fallback: false,
            from_cache: false,
        }
    }

    /// One query, retried across credentials on 429.
    async fn run_query(
        &self,
        query: &str,
        merged: &mut Vec<Source>,
        seen: &mut HashSet<String>,
    ) -> QueryOutcome {
        loop {
            let Some((idx, credential)) = self.credentials.next_available() else {
                return QueryOutcome::Exhausted;
            };

            match self
                .backend
                .search(query, &credential, self.config.page_size)
                .await
            {
                Ok(articles) => {
                    let before = merged.len();
                    for article in articles {
                        let source = Source::from_article(article);
                        if seen.insert(source.url.clone()) {
                            merged.push(source);
                        }
                    }
                    return QueryOutcome::Merged(merged.len() - before);
                }
                Err(SearchError::RateLimited) => {
                    if self.credentials.mark_rate_limited(idx) == MarkOutcome::Exhausted {
                        return QueryOutcome::Exhausted;
                    }
                    debug!(query, credential = idx, "retrying query with next credential");
                }
                Err(err) => {
                    warn!(query, credential = idx, error = %err, "search query failed; skipping");
                    return QueryOutcome::Skipped;
                }
            }
        }
    }

    fn fallback() -> RetrievalOutcome {
        RetrievalOutcome {
            sources: fallback_sources(),
            used_fallback: true,
            from_cache: false,
        }
    }
}
