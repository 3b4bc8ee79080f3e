use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::client::NliBackend;
use super::error::NliError;
use super::heuristic::heuristic_score;
use super::types::{NliOutcome, NliResult, NliStrategy};
use crate::cache::CacheHandle;
use crate::constants::{
    DEFAULT_NLI_TIMEOUT, NLI_CACHE_CAPACITY, NLI_CACHE_TTL, NLI_CLAIM_MAX_CHARS,
    NLI_EVIDENCE_MAX_CHARS,
};
use crate::hashing::hash_nli_pair;
use crate::text::truncate_chars;

/// Validated model results keyed by the truncated (evidence, claim) pair.
pub type NliCache = CacheHandle<u64, NliResult>;

pub fn new_nli_cache() -> NliCache {
    CacheHandle::new(NLI_CACHE_CAPACITY, NLI_CACHE_TTL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NliConfig {
    /// Deadline per backend call.
    pub timeout: Duration,
    pub evidence_max_chars: usize,
    pub claim_max_chars: usize,
}

impl Default for NliConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_NLI_TIMEOUT,
            evidence_max_chars: NLI_EVIDENCE_MAX_CHARS,
            claim_max_chars: NLI_CLAIM_MAX_CHARS,
        }
    }
}

impl NliConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Scores (evidence, claim) pairs.
///
/// Tries the cache, then each backend in order under the configured deadline, and finally
/// the lexical heuristic. Only validated model output is cached.
#[derive(Clone)]
pub struct NliScorer {
    backends: Vec<Arc<dyn NliBackend>>,
    cache: NliCache,
    config: NliConfig,
}

impl std::fmt::Debug for NliScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.backends.iter().map(|b| b.name()).collect();
        f.debug_struct("NliScorer")
            .field("backends", &names)
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}

impl NliScorer {
    pub fn new(backends: Vec<Arc<dyn NliBackend>>, cache: NliCache, config: NliConfig) -> Self {
        Self {
            backends,
            cache,
            config,
        }
    }

    /// Heuristic-only scorer for offline operation.
    pub fn heuristic_only(cache: NliCache) -> Self {
        Self::new(Vec::new(), cache, NliConfig::default())
    }

    pub fn has_model(&self) -> bool {
        !self.backends.is_empty()
    }

    pub fn cache(&self) -> &NliCache {
        &self.cache
    }

    async fn call_backend(
        &self,
        backend: &dyn NliBackend,
        evidence: &str,
        claim: &str,
    ) -> Result<NliResult, NliError> {
        let result = tokio::time::timeout(self.config.timeout, backend.classify(evidence, claim))
            .await
            .map_err(|_| NliError::Timeout(self.config.timeout))??;

        if !result.is_valid() {
            return Err(NliError::Malformed(format!(
                "implausible scores entail={} contra={} neutral={}",
                result.entail, result.contra, result.neutral
            )));
        }
        Ok(result)
    }

    pub async fn score(&self, evidence: &str, claim: &str) -> NliOutcome {
        let evidence = truncate_chars(evidence, self.config.evidence_max_chars);
        let claim = truncate_chars(claim, self.config.claim_max_chars);
        let key = hash_nli_pair(evidence, claim);

        if let Some(result) = self.cache.get(&key) {
            return NliOutcome {
                result,
                strategy: NliStrategy::Cached,
            };
        }

        for backend in &self.backends {
            match self.call_backend(backend.as_ref(), evidence, claim).await {
                Ok(result) => {
                    self.cache.insert(key, result);
                    return NliOutcome {
                        result,
                        strategy: NliStrategy::Model,
                    };
                }
                Err(err) => {
                    warn!(
                        backend = backend.name(),
                        error = %err,
                        "NLI backend failed; trying next strategy"
                    );
                }
            }
        }

        let result = heuristic_score(evidence, claim);
        debug!(
            entail = result.entail,
            contra = result.contra,
            "scored pair with heuristic"
        );
        NliOutcome {
            result,
            strategy: NliStrategy::Heuristic,
        }
    }
}
