use tracing::debug;

use super::types::{ClaimVerdict, ConsensusSummary, LabelCount, VerdictLabel};
use crate::claims::Claim;
use crate::constants::{
    DEFAULT_SOURCE_WEIGHT, MIN_VALID_SCORES, NEUTRAL_CREDIBILITY, REPUTABLE_SOURCE_WEIGHT,
};
use crate::nli::NliResult;
use crate::relevance::RelevantSource;

/// Confidence given to a verdict that had too few scores to classify.
pub const INSUFFICIENT_CONFIDENCE: f32 = 0.2;

/// One NLI score and the weight class of the source it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredEvidence {
    pub result: NliResult,
    pub reputable: bool,
}

/// Weighted means over the valid scores of one claim.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aggregate {
    pub entail_avg: f32,
    pub contra_avg: f32,
    pub valid: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsensusConfig {
    pub reputable_weight: f32,
    pub default_weight: f32,
    pub min_valid_scores: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            reputable_weight: REPUTABLE_SOURCE_WEIGHT,
            default_weight: DEFAULT_SOURCE_WEIGHT,
            min_valid_scores: MIN_VALID_SCORES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsensusEngine {
    config: ConsensusConfig,
}

/// Threshold table. Checked top to bottom; the first match wins.
pub fn classify(entail: f32, contra: f32) -> VerdictLabel {
    if entail >= 0.35 && contra <= 0.15 {
        VerdictLabel::StronglySupported
    } else if entail >= 0.25 && contra <= 0.20 {
        VerdictLabel::Supported
    } else if contra >= 0.35 && entail <= 0.15 {
        VerdictLabel::Refuted
    } else if contra >= 0.25 && entail <= 0.20 {
        VerdictLabel::LikelyFalse
    } else if entail >= 1.5 * contra && entail > 0.15 {
        VerdictLabel::Supported
    } else if contra >= 1.5 * entail && contra > 0.15 {
        VerdictLabel::LikelyFalse
    } else if (entail - contra).abs() <= 0.10 {
        VerdictLabel::Contested
    } else if entail - contra > 0.10 {
        VerdictLabel::WeaklySupported
    } else if contra - entail > 0.10 {
        VerdictLabel::WeaklyRefuted
    } else {
        VerdictLabel::InsufficientEvidence
    }
}

impl ConsensusEngine {
    pub fn new(config: ConsensusConfig) -> Self {
        Self { config }
    }

    fn weight(&self, reputable: bool) -> f32 {
        if reputable {
            self.config.reputable_weight
        } else {
            self.config.default_weight
        }
    }

    /// Weighted means over scores that are finite and in range; others are ignored.
    pub fn aggregate(&self, scores: &[ScoredEvidence]) -> Aggregate {
        let mut total_weight = 0.0;
        let mut entail = 0.0;
        let mut contra = 0.0;
        let mut valid = 0;

        for s in scores.iter().filter(|s| s.result.in_unit_range()) {
            let w = self.weight(s.reputable);
            total_weight += w;
            entail += w * s.result.entail;
            contra += w * s.result.contra;
            valid += 1;
        }

        if total_weight <= 0.0 {
            return Aggregate::default();
        }
        Aggregate {
            entail_avg: entail / total_weight,
            contra_avg: contra / total_weight,
            valid,
        }
    }

    pub fn label(&self, agg: &Aggregate) -> VerdictLabel {
        if agg.valid < self.config.min_valid_scores {
            return VerdictLabel::InsufficientEvidence;
        }
        classify(agg.entail_avg, agg.contra_avg)
    }

    /// More scores and a wider entail/contra gap both raise confidence.
    pub fn confidence(&self, agg: &Aggregate) -> f32 {
        if agg.valid < self.config.min_valid_scores {
            return INSUFFICIENT_CONFIDENCE;
        }
        let volume = (agg.valid as f32 / 4.0).min(1.0);
        let margin = ((agg.entail_avg - agg.contra_avg).abs() / 0.35).min(1.0);
        (0.3 + 0.4 * volume + 0.3 * margin).clamp(0.0, 1.0)
    }

    pub fn verdict(
        &self,
        claim: Claim,
        scores: &[ScoredEvidence],
        relevant_sources: Vec<RelevantSource>,
    ) -> ClaimVerdict {
        let agg = self.aggregate(scores);
        let verdict = self.label(&agg);
        let confidence = self.confidence(&agg);

        debug!(
            valid = agg.valid,
            entail = agg.entail_avg,
            contra = agg.contra_avg,
            verdict = verdict.as_str(),
            "claim classified"
        );

        ClaimVerdict {
            claim,
            entail_avg: agg.entail_avg,
            contra_avg: agg.contra_avg,
            verdict,
            relevant_sources,
            confidence,
            evidence_count: agg.valid,
        }
    }

    /// Confidence-weighted mean of verdict scores. Neutral when there are no claims.
    pub fn credibility(&self, verdicts: &[ClaimVerdict]) -> f32 {
        if verdicts.is_empty() {
            return NEUTRAL_CREDIBILITY;
        }
        let total: f32 = verdicts.iter().map(|v| v.confidence.max(0.0)).sum();
        let score = if total > 0.0 {
            verdicts
                .iter()
                .map(|v| v.confidence.max(0.0) * v.verdict.score())
                .sum::<f32>()
                / total
        } else {
            verdicts.iter().map(|v| v.verdict.score()).sum::<f32>() / verdicts.len() as f32
        };
        score.clamp(0.0, 1.0)
    }

    pub fn summarize(&self, verdicts: &[ClaimVerdict], used_fallback: bool) -> ConsensusSummary {
        let counts: Vec<LabelCount> = VerdictLabel::ALL
            .iter()
            .map(|&label| LabelCount {
                label,
                count: verdicts.iter().filter(|v| v.verdict == label).count(),
            })
            .collect();

        let total = verdicts.len();
        let supported = verdicts.iter().filter(|v| v.verdict.is_supportive()).count();
        let refuted = verdicts.iter().filter(|v| v.verdict.is_refuting()).count();

        let mut message = if total == 0 {
            "No verifiable claims found".to_string()
        } else {
            let noun = if total == 1 { "claim" } else { "claims" };
            format!("{supported} of {total} {noun} supported by evidence, {refuted} refuted")
        };
        if used_fallback && total > 0 {
            message.push_str(" (live search unavailable; placeholder sources used)");
        }

        ConsensusSummary {
            total_claims: total,
            counts,
            message,
            used_fallback_sources: used_fallback,
        }
    }
}
