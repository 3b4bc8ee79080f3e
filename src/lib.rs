//! Verity library crate (used by the server binary and integration tests).
//!
//! Checks the factual claims in a page of text against news coverage:
//!
//! - [`claims`]: sentence mining, claim scoring and entity tagging
//! - [`query`]: search queries per claim
//! - [`evidence`]: news search with credential rotation, URL dedup, caching and a synthetic
//!   fallback
//! - [`nli`]: entailment scoring against a zero-shot endpoint with a lexical fallback
//! - [`relevance`]: claim-specific source relevance
//! - [`consensus`]: per-claim verdicts and article credibility
//! - [`pipeline`]: the staged run and its event stream
//! - [`gateway`]: the HTTP surface
//!
//! ## Test/Mock Support
//! Mock search and NLI backends are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod claims;
pub mod config;
pub mod consensus;
pub mod constants;
pub mod evidence;
pub mod gateway;
pub mod hashing;
pub mod nli;
pub mod pipeline;
pub mod query;
pub mod relevance;
pub mod text;

pub use cache::{CacheHandle, CacheStore};
pub use claims::{Claim, ClaimExtractor, EntityBundle, ExtractorConfig, RejectReason};
pub use config::{Config, ConfigError};
pub use consensus::{ClaimVerdict, ConsensusEngine, ConsensusSummary, VerdictLabel};
#[cfg(any(test, feature = "mock"))]
pub use evidence::MockSearchBackend;
pub use evidence::{
    CredentialPool, EvidenceRetriever, NewsApiClient, RetrieverConfig, SearchBackend,
    SearchError, Source, new_evidence_cache,
};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use hashing::{hash_nli_pair, hash_query_set};
#[cfg(any(test, feature = "mock"))]
pub use nli::{MockNliBackend, MockNliBehavior};
pub use nli::{
    HttpNliClient, NliBackend, NliConfig, NliError, NliResult, NliScorer, new_nli_cache,
};
pub use pipeline::{
    AnalysisResult, PageLabel, PageType, Pipeline, PipelineConfig, PipelineError, PipelineEvent,
    PipelineStage,
};
pub use query::{QueryBuilder, QueryConfig};
pub use relevance::{RelevanceMatcher, RelevanceScore, RelevantSource};
pub use text::TextNormalizer;
