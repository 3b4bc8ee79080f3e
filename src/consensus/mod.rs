//! Per-claim verdicts and article-level credibility.

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::{
    Aggregate, ConsensusConfig, ConsensusEngine, INSUFFICIENT_CONFIDENCE, ScoredEvidence,
    classify,
};
pub use types::{ClaimVerdict, ConsensusSummary, LabelCount, VerdictLabel};
