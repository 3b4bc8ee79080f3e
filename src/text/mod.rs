//! Input normalization shared by every downstream stage.

use crate::constants::DEFAULT_MAX_INPUT_CHARS;

/// Trims, collapses whitespace, drops control characters and caps raw page text.
#[derive(Debug, Clone, Copy)]
pub struct TextNormalizer {
    max_chars: usize,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_CHARS)
    }
}

impl TextNormalizer {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Returns the normalized text. Never fails; empty input yields an empty string.
    pub fn normalize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len().min(self.max_chars * 4));
        let mut pending_space = false;
        let mut count = 0usize;

        for ch in raw.chars() {
            if ch.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }
            if ch.is_control() || ch == '\u{feff}' || ch == '\u{200b}' {
                continue;
            }

            if pending_space {
                if count + 1 >= self.max_chars {
                    break;
                }
                out.push(' ');
                count += 1;
                pending_space = false;
            }

            if count >= self.max_chars {
                break;
            }
            out.push(ch);
            count += 1;
        }

        out
    }
}

/// Returns at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
