//! Sentence filters: page chrome, metadata lines and opinion.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::OPINION_MARKER_LIMIT;

/// Page-chrome phrases, matched as whole words so "resign in" or "catalog in" survive.
static BOILERPLATE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:un)?subscribe|newsletters?|sign (?:up|in)|log in|cookies?|privacy policy|terms of (?:service|use)|all rights reserved|advertisement|sponsored content|click here|read more|share this|follow us|skip to|main menu|related articles|recommended for you|leave a comment|download the app|accept all|enable javascript|your browser|more stories|trending now)\b",
    )
    .expect("boilerplate keyword pattern is valid")
});

static BOILERPLATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // bylines
        r"^(?:[Bb]y|[Ww]ritten by|[Pp]osted by)\s+[A-Z][a-z]+(?:\s+[A-Z][a-z.]+){0,3}\b",
        // share / engagement counters
        r"(?i)\b\d[\d,.]*[km]?\s+(?:shares|comments|views|likes|retweets|followers)\b",
        // publication metadata lines
        r"(?i)^(?:updated|published|posted|last updated|last modified)\b.{0,40}\d{4}",
        // date-only lines
        r"(?i)^(?:[a-z]+day,?\s+)?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}(?:\s+(?:at\s+)?\d{1,2}:\d{2}\s*(?:am|pm)?(?:\s+[a-z]{2,4})?)?\.?$",
        // reading time
        r"(?i)\b\d+\s*min(?:ute)?s?\s+read\b",
        // image credits
        r"(?i)\b(?:photo|image)\s*(?:credit|courtesy|by)\b|\bgetty images\b|\bshutterstock\b",
        // copyright
        r"(?i)©|\(c\)\s*\d{4}|\bcopyright\s+\d{4}",
        r"https?://",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("boilerplate pattern is valid"))
    .collect()
});

static OPINION_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:i think|in my opinion|in our view|believes?|believed|might|may be|may have|could be|perhaps|possibly|probably|allegedly|supposedly|arguably|seems?|seemingly|apparently|i feel|we feel|should)\b",
    )
    .expect("opinion pattern is valid")
});

static CITATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(?:\d+(?:\s*[,–-]\s*\d+)*|citation needed|note \d+|[a-z])\]")
        .expect("citation pattern is valid")
});

static PARENTHETICALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)").expect("parenthetical pattern is valid"));

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.;:!?])").expect("spacing pattern is valid"));

/// Returns `true` for menus, banners, bylines, counters and metadata lines.
pub fn is_boilerplate(sentence: &str) -> bool {
    if BOILERPLATE_KEYWORDS.is_match(sentence) {
        return true;
    }
    BOILERPLATE_PATTERNS.iter().any(|re| re.is_match(sentence))
}

pub fn count_opinion_markers(sentence: &str) -> usize {
    OPINION_MARKERS.find_iter(sentence).count()
}

pub fn is_opinion(sentence: &str) -> bool {
    count_opinion_markers(sentence) >= OPINION_MARKER_LIMIT
}

/// Strips citation markers and parentheticals, then tidies whitespace.
pub fn clean_sentence(sentence: &str) -> String {
    let without_citations = CITATIONS.replace_all(sentence, "");
    let without_parens = PARENTHETICALS.replace_all(&without_citations, "");
    let collapsed = without_parens.split_whitespace().collect::<Vec<_>>().join(" ");
    SPACE_BEFORE_PUNCT
        .replace_all(&collapsed, "$1")
        .trim()
        .to_string()
}
