//! Natural-language inference scoring for (evidence, claim) pairs.

pub mod client;
pub mod error;
pub mod heuristic;
pub mod scorer;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use client::{CANDIDATE_LABELS, HttpNliClient, NliBackend, map_label_scores};
pub use error::NliError;
pub use heuristic::heuristic_score;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockNliBackend, MockNliBehavior};
pub use scorer::{NliCache, NliConfig, NliScorer, new_nli_cache};
pub use types::{LabelScores, NliOutcome, NliResult, NliStrategy};
