use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::entities::extract_entities;
use super::filters::{clean_sentence, is_boilerplate, is_opinion};
use super::scoring::score_factual_claim;
use super::segment::split_sentences;
use super::types::{Claim, RejectReason};
use crate::constants::{
    CLAIM_SCORE_THRESHOLD, DEFAULT_MAX_CLAIMS, MAX_CLAIMS_LIMIT, MAX_SENTENCE_CHARS,
    MIN_SENTENCE_CHARS,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractorConfig {
    /// Top-K cut applied after sorting; clamped to `1..=MAX_CLAIMS_LIMIT`.
    pub max_claims: usize,
    pub min_chars: usize,
    pub max_chars: usize,
    pub score_threshold: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_claims: DEFAULT_MAX_CLAIMS,
            min_chars: MIN_SENTENCE_CHARS,
            max_chars: MAX_SENTENCE_CHARS,
            score_threshold: CLAIM_SCORE_THRESHOLD,
        }
    }
}

impl ExtractorConfig {
    pub fn with_max_claims(mut self, max_claims: usize) -> Self {
        self.max_claims = max_claims.clamp(1, MAX_CLAIMS_LIMIT);
        self
    }

    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }
}

/// Mines candidate factual claims from normalized text.
#[derive(Debug, Clone, Default)]
pub struct ClaimExtractor {
    config: ExtractorConfig,
}

impl ClaimExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        let max_claims = config.max_claims.clamp(1, MAX_CLAIMS_LIMIT);
        Self {
            config: ExtractorConfig {
                max_claims,
                ..config
            },
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Runs one sentence through the filter chain.
    ///
    /// Order: raw length, boilerplate, opinion, cleaning, cleaned length, score threshold.
    /// Duplicate detection needs run-level state and lives in [`ClaimExtractor::extract`].
    pub fn evaluate(&self, sentence: &str) -> Result<Claim, RejectReason> {
        self.check_length(sentence)?;

        if is_boilerplate(sentence) {
            return Err(RejectReason::Boilerplate);
        }
        if is_opinion(sentence) {
            return Err(RejectReason::Opinion);
        }

        let cleaned = clean_sentence(sentence);
        self.check_length(&cleaned)?;

        let entities = extract_entities(&cleaned);
        let score = score_factual_claim(&cleaned, &entities);
        if score < self.config.score_threshold {
            return Err(RejectReason::LowScore);
        }

        Ok(Claim::new(cleaned, score, entities))
    }

    fn check_length(&self, sentence: &str) -> Result<(), RejectReason> {
        let len = sentence.chars().count();
        if len < self.config.min_chars {
            Err(RejectReason::TooShort)
        } else if len > self.config.max_chars {
            Err(RejectReason::TooLong)
        } else {
            Ok(())
        }
    }

    /// Returns the top-K claims, highest score first. Ties keep document order.
    pub fn extract(&self, normalized: &str) -> Vec<Claim> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut rejected: HashMap<RejectReason, usize> = HashMap::new();
        let mut claims = Vec::new();

        let sentences = split_sentences(normalized);
        let total = sentences.len();

        for sentence in sentences {
            match self.evaluate(sentence) {
                Ok(claim) => {
                    if seen.insert(claim.text.to_lowercase()) {
                        claims.push(claim);
                    } else {
                        *rejected.entry(RejectReason::Duplicate).or_default() += 1;
                    }
                }
                Err(reason) => *rejected.entry(reason).or_default() += 1,
            }
        }

        claims.sort_by(|a, b| b.factual_score.total_cmp(&a.factual_score));
        claims.truncate(self.config.max_claims);

        debug!(
            sentences = total,
            kept = claims.len(),
            too_short = rejected.get(&RejectReason::TooShort).copied().unwrap_or(0),
            too_long = rejected.get(&RejectReason::TooLong).copied().unwrap_or(0),
            boilerplate = rejected.get(&RejectReason::Boilerplate).copied().unwrap_or(0),
            opinion = rejected.get(&RejectReason::Opinion).copied().unwrap_or(0),
            low_score = rejected.get(&RejectReason::LowScore).copied().unwrap_or(0),
            duplicate = rejected.get(&RejectReason::Duplicate).copied().unwrap_or(0),
            "claim extraction finished"
        );

        claims
    }
}
