use std::collections::HashSet;
use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, warn};

/// Outcome of marking a credential as rate limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// At least one credential is still usable.
    Remaining(usize),
    /// Every credential was limited. The limited set has been reset for the next run.
    Exhausted,
}

#[derive(Debug, Default)]
struct PoolState {
    cursor: usize,
    limited: HashSet<usize>,
}

/// Rotating pool of interchangeable search credentials, shared across requests.
///
/// Keys never leave this type except through [`CredentialPool::next_available`]; logs
/// and errors refer to credentials by index.
pub struct CredentialPool {
    keys: Vec<String>,
    state: Mutex<PoolState>,
}

impl fmt::Debug for CredentialPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CredentialPool")
            .field("keys", &self.keys.len())
            .field("limited", &state.limited.len())
            .finish()
    }
}

impl CredentialPool {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| !k.trim().is_empty())
            .collect();
        Self {
            keys,
            state: Mutex::new(PoolState::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn limited_count(&self) -> usize {
        self.state.lock().limited.len()
    }

    /// Next non-limited credential in round-robin order, with its index.
    pub fn next_available(&self) -> Option<(usize, String)> {
        if self.keys.is_empty() {
            return None;
        }
        let mut state = self.state.lock();
        let n = self.keys.len();
        for step in 0..n {
            let idx = (state.cursor + step) % n;
            if !state.limited.contains(&idx) {
                state.cursor = (idx + 1) % n;
                return Some((idx, self.keys[idx].clone()));
            }
        }
        None
    }

    /// Records a 429 for credential `idx`.
    pub fn mark_rate_limited(&self, idx: usize) -> MarkOutcome {
        let mut state = self.state.lock();
        if idx < self.keys.len() {
            state.limited.insert(idx);
        }

        let remaining = self.keys.len().saturating_sub(state.limited.len());
        if remaining == 0 {
            warn!(
                credentials = self.keys.len(),
                "all search credentials rate limited; resetting pool"
            );
            state.limited.clear();
            MarkOutcome::Exhausted
        } else {
            debug!(credential = idx, remaining, "search credential rate limited");
            MarkOutcome::Remaining(remaining)
        }
    }

    pub fn reset(&self) {
        self.state.lock().limited.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin() {
        let pool = CredentialPool::new(["a", "b", "c"]);
        let picks: Vec<usize> = (0..4).filter_map(|_| pool.next_available()).map(|(i, _)| i).collect();
        assert_eq!(picks, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_skips_limited() {
        let pool = CredentialPool::new(["a", "b", "c"]);
        assert_eq!(pool.mark_rate_limited(1), MarkOutcome::Remaining(2));

        let picks: Vec<String> = (0..4).filter_map(|_| pool.next_available()).map(|(_, k)| k).collect();
        assert_eq!(picks, vec!["a", "c", "a", "c"]);
    }

    #[test]
    fn test_exhaustion_resets_wholesale() {
        let pool = CredentialPool::new(["a", "b"]);
        assert_eq!(pool.mark_rate_limited(0), MarkOutcome::Remaining(1));
        assert_eq!(pool.mark_rate_limited(1), MarkOutcome::Exhausted);
        assert_eq!(pool.limited_count(), 0);
        assert!(pool.next_available().is_some());
    }

    #[test]
    fn test_blank_keys_dropped() {
        let pool = CredentialPool::new(vec!["a".to_string(), " ".to_string(), String::new()]);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_empty_pool() {
        let pool = CredentialPool::new(Vec::<String>::new());
        assert!(pool.is_empty());
        assert!(pool.next_available().is_none());
        assert_eq!(pool.mark_rate_limited(0), MarkOutcome::Exhausted);
    }

    #[test]
    fn test_debug_hides_keys() {
        let pool = CredentialPool::new(["secret-key-123"]);
        let debug = format!("{pool:?}");
        assert!(!debug.contains("secret-key-123"));
    }
}
