//! Lexical fallback scorer.
//!
//! Always available and deterministic. Combines significant-word overlap, number agreement
//! and explicit support/contradiction markers through a fixed rule table, then clamps
//! entail and contra to `[0, HEURISTIC_SCORE_CEILING]`. Neutral is the remainder.

use std::collections::HashSet;

use regex::Regex;
use std::sync::LazyLock;

use super::types::NliResult;
use crate::constants::HEURISTIC_SCORE_CEILING;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "at", "for", "from", "by",
    "with", "about", "as", "into", "over", "after", "before", "than", "that", "this", "these",
    "those", "which", "who", "what", "when", "where", "is", "are", "was", "were", "be", "been",
    "being", "has", "have", "had", "will", "would", "could", "should", "can", "may", "might",
    "it", "its", "they", "their", "them", "he", "she", "his", "her", "we", "our", "you",
    "said", "says", "also", "not", "no", "more", "most", "some", "such", "there", "then",
];

const CONTRADICTION_MARKERS: &[&str] = &[
    "false",
    "falsely",
    "denies",
    "denied",
    "debunked",
    "no evidence",
    "not true",
    "untrue",
    "misleading",
    "hoax",
    "fabricated",
    "incorrect",
    "refuted",
    "disputed",
    "myth",
    "fake",
];

const SUPPORT_MARKERS: &[&str] = &[
    "confirms",
    "confirmed",
    "verified",
    "consistent with",
    "according to official",
    "data shows",
    "data show",
    "official figures",
    "corroborated",
    "announced",
];

const MAX_SUPPORT_MARKERS: usize = 2;
const MAX_EXTRA_CONTRADICTIONS: usize = 2;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9][a-z0-9'\-]*").expect("token pattern is valid"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)*").expect("number pattern is valid"));

fn significant_words(text: &str) -> HashSet<String> {
    TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.len() > 2 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Normalizes `1,200` and `1200` to the same token.
fn numbers(text: &str) -> HashSet<String> {
    NUMBER
        .find_iter(text)
        .map(|m| m.as_str().replace(',', ""))
        .collect()
}

fn count_markers(text: &str, markers: &[&str]) -> usize {
    markers
        .iter()
        .copied()
        .filter(|m| {
            text.match_indices(*m).any(|(i, _)| {
                let before = text[..i].chars().next_back();
                let after = text[i + m.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric)
                    && !after.is_some_and(char::is_alphanumeric)
            })
        })
        .count()
}

/// Signals the rule table combines. Exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeuristicSignals {
    /// Share of the claim's significant words present in the evidence.
    pub overlap: f32,
    pub claim_numbers: usize,
    pub matched_numbers: usize,
    pub support_markers: usize,
    pub contradiction_markers: usize,
}

pub fn signals(evidence: &str, claim: &str) -> HeuristicSignals {
    let evidence_lower = evidence.to_lowercase();
    let claim_lower = claim.to_lowercase();

    let claim_words = significant_words(&claim_lower);
    let evidence_words = significant_words(&evidence_lower);
    let overlap = if claim_words.is_empty() {
        0.0
    } else {
        claim_words.intersection(&evidence_words).count() as f32 / claim_words.len() as f32
    };

    let claim_numbers = numbers(&claim_lower);
    let evidence_numbers = numbers(&evidence_lower);
    let matched_numbers = claim_numbers.intersection(&evidence_numbers).count();

    HeuristicSignals {
        overlap,
        claim_numbers: claim_numbers.len(),
        matched_numbers,
        support_markers: count_markers(&evidence_lower, SUPPORT_MARKERS),
        contradiction_markers: count_markers(&evidence_lower, CONTRADICTION_MARKERS),
    }
}

/// Applies the rule table to precomputed signals.
pub fn score_signals(s: &HeuristicSignals) -> NliResult {
    let mut entail: f32 = if s.overlap >= 0.5 {
        0.45
    } else if s.overlap >= 0.3 {
        0.3
    } else if s.overlap >= 0.15 {
        0.15
    } else {
        0.05
    };
    let mut contra: f32 = 0.0;

    if s.claim_numbers > 0 {
        if s.matched_numbers == s.claim_numbers {
            entail += 0.15;
        } else if s.matched_numbers > 0 {
            entail += 0.05;
        } else if s.overlap >= 0.3 {
            // Same topic, different figures.
            contra += 0.15;
        }
    }

    entail += 0.1 * s.support_markers.min(MAX_SUPPORT_MARKERS) as f32;

    if s.contradiction_markers > 0 {
        if s.overlap >= 0.15 {
            let extra = (s.contradiction_markers - 1).min(MAX_EXTRA_CONTRADICTIONS) as f32;
            contra += 0.25 + 0.1 * extra;
            entail *= 0.3;
        } else {
            contra += 0.05;
        }
    }

    let entail = entail.clamp(0.0, HEURISTIC_SCORE_CEILING);
    let contra = contra.clamp(0.0, HEURISTIC_SCORE_CEILING);
    let neutral = (1.0 - entail - contra).max(0.0);

    NliResult::new(entail, contra, neutral)
}

/// Scores an (evidence, claim) pair without any external service.
pub fn heuristic_score(evidence: &str, claim: &str) -> NliResult {
    score_signals(&signals(evidence, claim))
}
