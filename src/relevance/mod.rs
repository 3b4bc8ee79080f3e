//! Claim-specific source relevance.
//!
//! Measures whether a source is the right evidence for a claim, independent of whether it
//! supports or contradicts it. Relevance is transient: it is attached to a (claim, source)
//! pair inside a verdict and never stored on the source.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::claims::Claim;
use crate::constants::{MAX_RELEVANT_SOURCES, RELEVANCE_MIN_SCORE, RELEVANCE_SCORE_CAP};
use crate::evidence::Source;
use crate::nli::NliResult;

const NLI_WEIGHT: f32 = 2.0;
const ENTITY_WEIGHT: f32 = 0.5;
const NUMBER_WEIGHT: f32 = 0.8;
const KEYWORD_WEIGHT: f32 = 0.5;
const TITLE_WEIGHT: f32 = 0.3;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "from", "with", "that", "this", "these", "those", "which", "were",
    "was", "are", "has", "have", "had", "will", "would", "could", "should", "their", "there",
    "they", "them", "its", "his", "her", "said", "says", "also", "about", "into", "over",
    "after", "before", "than", "according", "more", "most", "some", "such", "been", "being",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z][a-z'\-]+").expect("word pattern is valid"));

static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[$€£]?\d[\d,]*(?:\.\d+)?%?").expect("number token pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevanceScore {
    /// Capped at `RELEVANCE_SCORE_CAP`.
    pub score: f32,
    pub match_reasons: Vec<String>,
}

/// A source retained for a claim, with why it was retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantSource {
    pub source: Source,
    pub relevance: RelevanceScore,
}

fn keywords(text: &str) -> HashSet<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|w| w.len() > 3 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Numeric tokens with trailing punctuation removed, as written.
fn number_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    NUMBER_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches([',', '.']).to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

fn overlap_ratio(claim_words: &HashSet<String>, text: &str) -> f32 {
    if claim_words.is_empty() {
        return 0.0;
    }
    let other = keywords(text);
    claim_words.intersection(&other).count() as f32 / claim_words.len() as f32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceConfig {
    pub cap: f32,
    /// Sources must score strictly above this.
    pub min_score: f32,
    pub max_sources: usize,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            cap: RELEVANCE_SCORE_CAP,
            min_score: RELEVANCE_MIN_SCORE,
            max_sources: MAX_RELEVANT_SOURCES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RelevanceMatcher {
    config: RelevanceConfig,
}

impl RelevanceMatcher {
    pub fn new(config: RelevanceConfig) -> Self {
        Self { config }
    }

    /// Lexical part of the score: entities, numbers, keywords and title. No NLI term.
    fn lexical(&self, claim: &Claim, source: &Source) -> RelevanceScore {
        let evidence = source.evidence_text();
        let evidence_lower = evidence.to_lowercase();
        let mut score = 0.0;
        let mut reasons = Vec::new();

        for entity in claim.entities.named() {
            if evidence_lower.contains(&entity.to_lowercase()) {
                score += ENTITY_WEIGHT;
                reasons.push(format!("entity match: {entity}"));
            }
        }

        let evidence_numbers: HashSet<String> = number_tokens(&evidence).into_iter().collect();
        for number in number_tokens(&claim.text) {
            if evidence_numbers.contains(&number) {
                score += NUMBER_WEIGHT;
                reasons.push(format!("number match: {number}"));
            }
        }

        let claim_words = keywords(&claim.text);
        let keyword_overlap = overlap_ratio(&claim_words, &evidence);
        if keyword_overlap > 0.0 {
            score += KEYWORD_WEIGHT * keyword_overlap;
            reasons.push(format!("keyword overlap: {:.0}%", keyword_overlap * 100.0));
        }

        let title_overlap = overlap_ratio(&claim_words, &source.title);
        if title_overlap > 0.0 {
            score += TITLE_WEIGHT * title_overlap;
            reasons.push("title match".to_string());
        }

        RelevanceScore {
            score,
            match_reasons: reasons,
        }
    }

    /// Full relevance of one source to one claim.
    pub fn score(&self, claim: &Claim, source: &Source, nli: &NliResult) -> RelevanceScore {
        let mut relevance = self.lexical(claim, source);
        let magnitude = nli.entail.max(nli.contra);
        if magnitude > 0.0 {
            relevance.score += NLI_WEIGHT * magnitude;
            let stance = if nli.entail >= nli.contra {
                "supports"
            } else {
                "contradicts"
            };
            relevance
                .match_reasons
                .insert(0, format!("{stance} claim ({:.0}%)", magnitude * 100.0));
        }
        relevance.score = relevance.score.min(self.config.cap);
        relevance
    }

    /// Cheap pre-NLI score used to pick which sources get scored for a claim.
    pub fn prefilter_score(&self, claim: &Claim, source: &Source) -> f32 {
        self.lexical(claim, source).score
    }

    /// Indices of the `limit` best sources for `claim`; ties keep input order.
    pub fn top_candidates(&self, claim: &Claim, sources: &[Source], limit: usize) -> Vec<usize> {
        let mut scored: Vec<(usize, f32)> = sources
            .iter()
            .enumerate()
            .map(|(i, s)| (i, self.prefilter_score(claim, s)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(limit).map(|(i, _)| i).collect()
    }

    /// Filters by the floor, sorts descending and caps.
    pub fn select(&self, mut candidates: Vec<RelevantSource>) -> Vec<RelevantSource> {
        candidates.retain(|c| c.relevance.score > self.config.min_score);
        candidates.sort_by(|a, b| b.relevance.score.total_cmp(&a.relevance.score));
        candidates.truncate(self.config.max_sources);
        candidates
    }
}
