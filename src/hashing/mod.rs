//! BLAKE3 cache keys.
//!
//! Both process-wide caches key on content, never on request identity, so two analyses of the
//! same article share entries.

use blake3::Hasher;

/// First 8 bytes of the digest.
///
/// Collisions at cache scale (thousands of entries) are negligible, and a collision only ever
/// yields a stale score for a different pair, never a crash.
fn truncate(hash: blake3::Hash) -> u64 {
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Key for an (evidence, claim) NLI pair. Inputs are expected to be truncated already.
#[inline]
pub fn hash_nli_pair(evidence: &str, claim: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(&(evidence.len() as u64).to_le_bytes());
    hasher.update(evidence.as_bytes());
    hasher.update(b"|");
    hasher.update(claim.as_bytes());

    truncate(hasher.finalize())
}

/// Key for a set of search queries. Order-insensitive and case-insensitive.
pub fn hash_query_set<S: AsRef<str>>(queries: &[S], max_results: usize) -> u64 {
    let mut normalized: Vec<String> = queries
        .iter()
        .map(|q| q.as_ref().trim().to_lowercase())
        .filter(|q| !q.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();

    let mut hasher = Hasher::new();
    hasher.update(&(max_results as u64).to_le_bytes());
    for query in &normalized {
        hasher.update(query.as_bytes());
        hasher.update(b"\n");
    }

    truncate(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nli_pair_determinism() {
        let claim = "The unemployment rate fell to 3.5% in March 2024.";
        assert_eq!(hash_nli_pair("evidence", claim), hash_nli_pair("evidence", claim));
        assert_ne!(hash_nli_pair("evidence", claim), hash_nli_pair("evidence", "other"));
    }

    #[test]
    fn test_nli_pair_is_ordered() {
        let a = hash_nli_pair("evidence text", "claim text");
        let b = hash_nli_pair("claim text", "evidence text");
        assert_ne!(a, b);
    }

    #[test]
    fn test_nli_pair_boundary_is_unambiguous() {
        let a = hash_nli_pair("ab", "c");
        let b = hash_nli_pair("a", "bc");
        assert_ne!(a, b);
    }

    #[test]
    fn test_query_set_order_insensitive() {
        let a = hash_query_set(&["inflation march", "Federal Reserve rates"], 20);
        let b = hash_query_set(&["federal reserve rates", "inflation march"], 20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_set_ignores_duplicates_and_blanks() {
        let a = hash_query_set(&["inflation", "inflation", "  "], 20);
        let b = hash_query_set(&["inflation"], 20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_set_depends_on_result_count() {
        let a = hash_query_set(&["inflation"], 10);
        let b = hash_query_set(&["inflation"], 20);
        assert_ne!(a, b);
    }

    #[test]
    fn test_query_keys_spread() {
        let values: std::collections::HashSet<u64> = (0..1000)
            .map(|i| hash_query_set(&[format!("query {i}")], 20))
            .collect();
        assert_eq!(values.len(), 1000);
    }
}
