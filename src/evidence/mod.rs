//! Evidence retrieval from an external news-search service.
//!
//! The retriever tries, in order: the query-set cache, live search with credential
//! rotation, and finally the synthetic fallback set. Every failure short of a panic
//! resolves to one of those; nothing here is fatal to a run.

pub mod canonical;
pub mod client;
pub mod credentials;
pub mod error;
pub mod fallback;
pub mod reputation;
pub mod retriever;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use canonical::canonicalize_url;
pub use client::{NewsApiClient, SearchBackend};
pub use credentials::{CredentialPool, MarkOutcome};
pub use error::SearchError;
pub use fallback::fallback_sources;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSearchBackend;
pub use reputation::is_reputable;
pub use retriever::{EvidenceCache, EvidenceRetriever, RetrieverConfig, new_evidence_cache};
pub use types::{Article, RetrievalOutcome, Source};
