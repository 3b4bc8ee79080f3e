//! Search query construction.
//!
//! Each claim yields up to three ranked queries. Across a run the per-claim lists are
//! interleaved by rank, deduplicated case-insensitively and capped, so the best query of
//! every top claim goes out before any claim's second choice.

use std::collections::HashSet;

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::claims::Claim;
use crate::constants::{MAX_BAG_OF_WORDS_TERMS, MAX_QUERIES_PER_CLAIM, MAX_TOTAL_QUERIES};


/// Words that leak in from page chrome and make useless search terms.
const UI_STOPLIST: &[&str] = &[
    "click", "subscribe", "newsletter", "menu", "share", "comment", "comments", "login",
    "sign", "cookie", "cookies", "advertisement", "sponsored", "video", "photo", "image",
    "read", "more", "home", "search", "follow", "privacy", "terms",
];

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "at", "for", "from", "by",
    "with", "about", "into", "over", "after", "before", "than", "that", "this", "these",
    "those", "which", "who", "whom", "whose", "what", "when", "where", "while", "were", "was",
    "is", "are", "be", "been", "being", "have", "has", "had", "will", "would", "could",
    "should", "their", "there", "they", "them", "its", "his", "her", "said", "says", "also",
    "according", "other", "some", "many", "more", "most", "such", "only", "just", "very",
];

const VERB_LEXICON: &[&str] = &[
    "raised", "cut", "fell", "rose", "announced", "reported", "approved", "rejected", "signed",
    "banned", "launched", "killed", "arrested", "charged", "won", "lost", "increased",
    "decreased", "grew", "declined", "passed", "vetoed", "elected", "resigned", "acquired",
    "sued", "confirmed", "denied", "released", "closed", "opened", "hit", "reached",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z'\-]*").expect("word pattern is valid"));

fn is_stop(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOPWORDS.contains(&lower.as_str()) || UI_STOPLIST.contains(&lower.as_str())
}

fn is_ui_term(term: &str) -> bool {
    term.split_whitespace()
        .any(|w| UI_STOPLIST.contains(&w.to_lowercase().as_str()))
}

/// Lexicon verbs in any case; the `-ed` suffix rule only for lowercase words, so proper
/// nouns like "United" are not taken for verbs.
fn is_verb(word: &str) -> bool {
    let lower = word.to_lowercase();
    VERB_LEXICON.contains(&lower.as_str())
        || (word == lower && word.len() > 4 && word.ends_with("ed"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    pub per_claim: usize,
    pub total: usize,
    pub bag_of_words_terms: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            per_claim: MAX_QUERIES_PER_CLAIM,
            total: MAX_TOTAL_QUERIES,
            bag_of_words_terms: MAX_BAG_OF_WORDS_TERMS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    config: QueryConfig,
}

impl QueryBuilder {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Entity query: top named entities plus the first number.
    fn entity_query(&self, claim: &Claim) -> Option<String> {
        let entities = &claim.entities;
        let mut terms: Vec<&str> = Vec::new();

        for group in [&entities.people, &entities.organizations, &entities.places] {
            if let Some(top) = group.iter().find(|t| !is_ui_term(t)) {
                terms.push(top);
            }
        }
        if terms.is_empty()
            && let Some(acronym) = entities.acronyms.first()
        {
            terms.push(acronym);
        }
        if terms.is_empty() {
            return None;
        }
        if let Some(number) = entities.numeric_values.first() {
            terms.push(number);
        }
        Some(terms.join(" "))
    }

    /// Verb-phrase query: first action verb plus the leading content nouns.
    fn verb_query(&self, claim: &Claim) -> Option<String> {
        let words: Vec<&str> = WORD.find_iter(&claim.text).map(|m| m.as_str()).collect();
        let verb_idx = words.iter().position(|w| is_verb(w))?;

        let nouns: Vec<&str> = words
            .iter()
            .enumerate()
            .filter(|(i, w)| *i != verb_idx && w.len() > 3 && !is_stop(w) && !is_verb(w))
            .map(|(_, w)| *w)
            .take(3)
            .collect();
        if nouns.is_empty() {
            return None;
        }

        let terms: Vec<&str> = std::iter::once(words[verb_idx]).chain(nouns).collect();
        Some(terms.join(" "))
    }

    /// Bag-of-words query: significant words in document order.
    fn keyword_query(&self, claim: &Claim) -> Option<String> {
        let mut seen = HashSet::new();
        let terms: Vec<&str> = WORD
            .find_iter(&claim.text)
            .map(|m| m.as_str())
            .filter(|w| w.len() > 3 && !is_stop(w))
            .filter(|w| seen.insert(w.to_lowercase()))
            .take(self.config.bag_of_words_terms)
            .collect();
        (!terms.is_empty()).then(|| terms.join(" "))
    }

    /// Last resort: the opening words of the claim, unfiltered.
    fn generic_query(claim: &Claim) -> String {
        let words: Vec<&str> = claim.text.split_whitespace().take(6).collect();
        if words.is_empty() {
            "news".to_string()
        } else {
            words.join(" ")
        }
    }

    /// Ranked queries for one claim. Never empty.
    pub fn build(&self, claim: &Claim) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut queries: Vec<String> = [
            self.entity_query(claim),
            self.verb_query(claim),
            self.keyword_query(claim),
        ]
        .into_iter()
        .flatten()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .filter(|q| seen.insert(q.to_lowercase()))
        .take(self.config.per_claim)
        .collect();

        if queries.is_empty() {
            queries.push(Self::generic_query(claim));
        }
        queries
    }

    /// Run-level query list: round-robin by rank, deduplicated, capped.
    pub fn build_all(&self, claims: &[Claim]) -> Vec<String> {
        let per_claim: Vec<Vec<String>> = claims.iter().map(|c| self.build(c)).collect();
        let depth = per_claim.iter().map(Vec::len).max().unwrap_or(0);

        let mut seen = HashSet::new();
        let mut queries = Vec::new();
        'rank: for rank in 0..depth {
            for list in &per_claim {
                if queries.len() >= self.config.total {
                    break 'rank;
                }
                if let Some(query) = list.get(rank)
                    && seen.insert(query.to_lowercase())
                {
                    queries.push(query.clone());
                }
            }
        }

        debug!(
            claims = claims.len(),
            queries = queries.len(),
            "built search queries"
        );
        queries
    }
}
