//! Synthetic sources served when live retrieval is unavailable.
//!
//! Every entry lives under `example.com` and is flagged `synthetic`, so consumers can
//! always tell placeholder evidence from real reporting.

use super::types::Source;

const FALLBACK_PUBLISHER: &str = "Example News (synthetic)";

const FALLBACK_ENTRIES: &[(&str, &str, &str)] = &[
    (
        "https://example.com/fallback/fact-check-overview",
        "Fact-checking overview",
        "Placeholder evidence: live news search is unavailable, so this claim could not be checked against current reporting.",
    ),
    (
        "https://example.com/fallback/official-statistics",
        "Official statistics portal",
        "Placeholder evidence: consult the relevant official statistics agency for verified figures.",
    ),
    (
        "https://example.com/fallback/wire-services",
        "Wire service coverage",
        "Placeholder evidence: wire services publish primary reporting on most public events.",
    ),
];

/// The fixed fallback set, in a stable order.
pub fn fallback_sources() -> Vec<Source> {
    FALLBACK_ENTRIES
        .iter()
        .map(|(url, title, description)| Source {
            url: (*url).to_string(),
            title: (*title).to_string(),
            publisher: FALLBACK_PUBLISHER.to_string(),
            description: (*description).to_string(),
            content: None,
            published_at: None,
            synthetic: true,
            reputable: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_marked_and_distinct() {
        let sources = fallback_sources();
        assert!(!sources.is_empty());
        assert!(sources.iter().all(|s| s.synthetic && !s.reputable));
        assert!(sources.iter().all(|s| s.url.starts_with("https://example.com/")));

        let mut urls: Vec<_> = sources.iter().map(|s| s.url.as_str()).collect();
        urls.dedup();
        assert_eq!(urls.len(), sources.len());
    }

    #[test]
    fn test_fallback_is_stable() {
        assert_eq!(fallback_sources(), fallback_sources());
    }
}
