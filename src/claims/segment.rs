//! Sentence segmentation.
//!
//! Splits on `.`, `!` and `?` followed by whitespace, except after common abbreviations and
//! single-letter initials, or when the next sentence would start in lower case.

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp",
    "gov", "sen", "rep", "gen", "col", "lt", "sgt", "capt", "no", "fig", "approx", "dept", "est",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mt",
    "ft", "ave", "blvd", "u.s", "u.k", "u.n", "e.g", "i.e", "a.m", "p.m",
];

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn is_trailing(ch: char) -> bool {
    is_terminator(ch) || matches!(ch, '"' | '\'' | '”' | '’' | ')' | ']')
}

/// Returns `true` when the `.` at byte `dot` ends an abbreviation or initial.
fn ends_abbreviation(text: &str, dot: usize) -> bool {
    let before = &text[..dot];
    let word_start = before
        .rfind(char::is_whitespace)
        .map(|i| i + 1)
        .unwrap_or(0);
    let word = before[word_start..].trim_start_matches(|c: char| !c.is_alphanumeric());

    if word.is_empty() {
        return false;
    }

    let mut chars = word.chars();
    if let (Some(first), None) = (chars.next(), chars.next())
        && first.is_uppercase()
    {
        return true;
    }

    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Splits normalized text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (byte_idx, ch) = chars[i];
        if !is_terminator(ch) {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < chars.len() && is_trailing(chars[end].1) {
            end += 1;
        }

        if end >= chars.len() {
            break;
        }

        if !chars[end].1.is_whitespace() {
            i = end;
            continue;
        }

        let next_visible = chars[end..]
            .iter()
            .map(|(_, c)| *c)
            .find(|c| !c.is_whitespace());

        let starts_lower = next_visible.is_some_and(|c| c.is_lowercase());
        let abbreviation = ch == '.' && ends_abbreviation(text, byte_idx);

        if starts_lower || abbreviation {
            i = end;
            continue;
        }

        let end_byte = chars[end].0;
        let sentence = text[start..end_byte].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = end_byte;
        i = end;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}
