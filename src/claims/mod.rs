//! Claim mining: segmentation, filtering, scoring and entity tagging.
//!
//! [`ClaimExtractor`] is the entry point; the submodules are usable on their own for
//! query building and relevance matching, which reuse the entity and number patterns.

pub mod entities;
pub mod extractor;
pub mod filters;
pub mod scoring;
pub mod segment;
pub mod types;

#[cfg(test)]
mod tests;

pub use entities::extract_entities;
pub use extractor::{ClaimExtractor, ExtractorConfig};
pub use scoring::score_factual_claim;
pub use segment::split_sentences;
pub use types::{Claim, EntityBundle, RejectReason};
