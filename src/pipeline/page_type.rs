//! Lexical page classification.

use super::types::{PageLabel, PageType};

const NEWS_MARKERS: &[&str] = &[
    "according to",
    "said",
    "told reporters",
    "announced",
    "reported",
    "spokesperson",
    "officials",
    "press release",
    "reuters",
    "associated press",
];

const OPINION_MARKERS: &[&str] = &[
    "i think",
    "i believe",
    "in my view",
    "in my opinion",
    "we should",
    "we must",
    "op-ed",
    "editorial",
    "columnist",
];

const REFERENCE_MARKERS: &[&str] = &[
    "refers to",
    "is defined as",
    "also known as",
    "see also",
    "encyclopedia",
    "etymology",
    "citation needed",
    "is a type of",
];

const BLOG_MARKERS: &[&str] = &[
    "posted by",
    "posted on",
    "leave a comment",
    "leave a reply",
    "my blog",
    "share this post",
    "i've been",
    "thanks for reading",
];

/// Fewer hits than this on the best label classifies the page as `other`.
const MIN_HITS: usize = 2;

/// Hits at which the volume half of the confidence saturates.
const SATURATION_HITS: f32 = 6.0;

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric())
}

/// Occurrences of `phrase` in `haystack` that start and end on word boundaries.
fn count_phrase(haystack: &str, phrase: &str) -> usize {
    haystack
        .match_indices(phrase)
        .filter(|(start, m)| {
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + m.len()..].chars().next();
            !is_word_char(before) && !is_word_char(after)
        })
        .count()
}

fn hits(haystack: &str, markers: &[&str]) -> usize {
    markers.iter().map(|m| count_phrase(haystack, m)).sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageClassifier;

impl PageClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Picks the label with the most marker hits. Ties resolve in declaration order.
    pub fn classify(&self, text: &str) -> PageType {
        let lower = text.to_lowercase();
        let tallies = [
            (PageLabel::NewsArticle, hits(&lower, NEWS_MARKERS)),
            (PageLabel::Reference, hits(&lower, REFERENCE_MARKERS)),
            (PageLabel::Opinion, hits(&lower, OPINION_MARKERS)),
            (PageLabel::BlogPost, hits(&lower, BLOG_MARKERS)),
        ];
        let total: usize = tallies.iter().map(|(_, n)| n).sum();

        let (label, best) = tallies
            .iter()
            .copied()
            .fold((PageLabel::Other, 0), |acc, (label, n)| {
                if n > acc.1 { (label, n) } else { acc }
            });

        if best < MIN_HITS {
            return PageType {
                label: PageLabel::Other,
                score: if total == 0 { 0.0 } else { 0.5 },
            };
        }

        let share = best as f32 / total as f32;
        let volume = (best as f32 / SATURATION_HITS).min(1.0);
        PageType {
            label,
            score: (0.5 * share + 0.5 * volume).clamp(0.0, 1.0),
        }
    }
}
