//! Cross-cutting, shared constants.
//!
//! Component configs take their defaults from here so the extractor, retriever, scorer and
//! orchestrator agree on limits without importing each other.
//!
//! # Bounds
//!
//! The claim cap, query cap and per-claim evidence cap together bound the number of outbound
//! calls one analysis can make: at most [`MAX_TOTAL_QUERIES`] search requests (plus retries on
//! rate limits) and at most `max_claims * MAX_SOURCES_PER_CLAIM` NLI requests.

use std::time::Duration;

/// Hard cap on raw input length, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 50_000;

pub const MIN_SENTENCE_CHARS: usize = 40;
pub const MAX_SENTENCE_CHARS: usize = 400;

/// Sentences with at least this many hedging markers are treated as opinion.
pub const OPINION_MARKER_LIMIT: usize = 2;

/// Claims scoring below this are dropped.
pub const CLAIM_SCORE_THRESHOLD: f32 = 0.4;

pub const DEFAULT_MAX_CLAIMS: usize = 10;
pub const MAX_CLAIMS_LIMIT: usize = 15;

pub const MAX_QUERIES_PER_CLAIM: usize = 3;
pub const MAX_TOTAL_QUERIES: usize = 5;
pub const MAX_BAG_OF_WORDS_TERMS: usize = 8;

pub const EVIDENCE_CACHE_TTL: Duration = Duration::from_secs(30 * 60);
pub const EVIDENCE_CACHE_CAPACITY: u64 = 100;

pub const NLI_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
pub const NLI_CACHE_CAPACITY: u64 = 2_000;

pub const NLI_EVIDENCE_MAX_CHARS: usize = 1_000;
pub const NLI_CLAIM_MAX_CHARS: usize = 300;

/// Inclusive band the three NLI label scores must sum into to be trusted.
pub const NLI_VALID_SUM_MIN: f32 = 0.5;
pub const NLI_VALID_SUM_MAX: f32 = 1.5;

/// Upper clamp for entail/contra from the heuristic scorer.
pub const HEURISTIC_SCORE_CEILING: f32 = 0.7;

pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_NLI_TIMEOUT: Duration = Duration::from_secs(4);
pub const DEFAULT_QUERY_DELAY: Duration = Duration::from_millis(250);

pub const DEFAULT_SOURCES_PER_RUN: usize = 20;
pub const MAX_SOURCES_PER_CLAIM: usize = 8;

pub const CLAIM_BATCH_SIZE: usize = 2;
pub const NLI_CONCURRENCY: usize = 3;

pub const RELEVANCE_SCORE_CAP: f32 = 2.0;
pub const RELEVANCE_MIN_SCORE: f32 = 0.3;
pub const MAX_RELEVANT_SOURCES: usize = 4;

pub const REPUTABLE_SOURCE_WEIGHT: f32 = 1.5;
pub const DEFAULT_SOURCE_WEIGHT: f32 = 1.0;

/// Minimum number of valid NLI results before a claim can get a directional verdict.
pub const MIN_VALID_SCORES: usize = 2;

/// Credibility reported when an article has no scored claims.
pub const NEUTRAL_CREDIBILITY: f32 = 0.5;

/// Events buffered between the orchestrator task and its consumer.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
