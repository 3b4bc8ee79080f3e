use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claims::Claim;
use crate::relevance::RelevantSource;

/// Closed set of per-claim verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLabel {
    StronglySupported,
    Supported,
    WeaklySupported,
    Contested,
    InsufficientEvidence,
    WeaklyRefuted,
    LikelyFalse,
    Refuted,
}

impl VerdictLabel {
    pub const ALL: [VerdictLabel; 8] = [
        VerdictLabel::StronglySupported,
        VerdictLabel::Supported,
        VerdictLabel::WeaklySupported,
        VerdictLabel::Contested,
        VerdictLabel::InsufficientEvidence,
        VerdictLabel::WeaklyRefuted,
        VerdictLabel::LikelyFalse,
        VerdictLabel::Refuted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::StronglySupported => "strongly_supported",
            VerdictLabel::Supported => "supported",
            VerdictLabel::WeaklySupported => "weakly_supported",
            VerdictLabel::Contested => "contested",
            VerdictLabel::InsufficientEvidence => "insufficient_evidence",
            VerdictLabel::WeaklyRefuted => "weakly_refuted",
            VerdictLabel::LikelyFalse => "likely_false",
            VerdictLabel::Refuted => "refuted",
        }
    }

    /// Credibility contribution of this verdict.
    pub fn score(&self) -> f32 {
        match self {
            VerdictLabel::StronglySupported => 1.0,
            VerdictLabel::Supported => 0.85,
            VerdictLabel::WeaklySupported => 0.65,
            VerdictLabel::Contested => 0.5,
            VerdictLabel::InsufficientEvidence => 0.5,
            VerdictLabel::WeaklyRefuted => 0.35,
            VerdictLabel::LikelyFalse => 0.2,
            VerdictLabel::Refuted => 0.1,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VerdictLabel::StronglySupported => "Strongly supported",
            VerdictLabel::Supported => "Supported",
            VerdictLabel::WeaklySupported => "Weakly supported",
            VerdictLabel::Contested => "Contested",
            VerdictLabel::InsufficientEvidence => "Insufficient evidence",
            VerdictLabel::WeaklyRefuted => "Weakly refuted",
            VerdictLabel::LikelyFalse => "Likely false",
            VerdictLabel::Refuted => "Refuted",
        }
    }

    pub fn is_supportive(&self) -> bool {
        match self {
            VerdictLabel::StronglySupported
            | VerdictLabel::Supported
            | VerdictLabel::WeaklySupported => true,
            VerdictLabel::Contested
            | VerdictLabel::InsufficientEvidence
            | VerdictLabel::WeaklyRefuted
            | VerdictLabel::LikelyFalse
            | VerdictLabel::Refuted => false,
        }
    }

    pub fn is_refuting(&self) -> bool {
        match self {
            VerdictLabel::WeaklyRefuted | VerdictLabel::LikelyFalse | VerdictLabel::Refuted => {
                true
            }
            VerdictLabel::StronglySupported
            | VerdictLabel::Supported
            | VerdictLabel::WeaklySupported
            | VerdictLabel::Contested
            | VerdictLabel::InsufficientEvidence => false,
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final verdict for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimVerdict {
    pub claim: Claim,
    /// Weighted mean over valid scores actually obtained.
    pub entail_avg: f32,
    pub contra_avg: f32,
    pub verdict: VerdictLabel,
    /// Descending by relevance, at most four.
    pub relevant_sources: Vec<RelevantSource>,
    pub confidence: f32,
    /// Number of valid NLI scores behind the means.
    pub evidence_count: usize,
}

/// Per-label tallies and a one-line summary for the whole article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusSummary {
    pub total_claims: usize,
    pub counts: Vec<LabelCount>,
    pub message: String,
    pub used_fallback_sources: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: VerdictLabel,
    pub count: usize,
}

impl ConsensusSummary {
    pub fn count(&self, label: VerdictLabel) -> usize {
        self.counts
            .iter()
            .find(|c| c.label == label)
            .map_or(0, |c| c.count)
    }
}
