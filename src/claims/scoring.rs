//! Claim-likeness scoring.
//!
//! Additive weights over surface cues of checkable statements: quantities, dates, attribution,
//! comparison and causation, and entity density. Vague quantifiers pull the score down.

use regex::Regex;
use std::sync::LazyLock;

use super::types::EntityBundle;

const PERCENT_WEIGHT: f32 = 2.0;
const CURRENCY_WEIGHT: f32 = 1.8;
const YEAR_WEIGHT: f32 = 1.5;
const MONTH_DAY_WEIGHT: f32 = 1.8;
const ATTRIBUTION_WEIGHT: f32 = 1.5;
const MAX_ATTRIBUTIONS: usize = 2;
const COMPARATIVE_WEIGHT: f32 = 1.0;
const CAUSAL_WEIGHT: f32 = 1.2;
const ENTITY_WEIGHT: f32 = 0.5;
const MAX_ENTITY_BONUS: f32 = 1.5;
const LENGTH_BONUS: f32 = 0.5;
const VAGUE_PENALTY: f32 = 0.3;

static PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:[.,]\d+)?\s?(?:%|percent\b|per cent\b)")
        .expect("percent pattern is valid")
});

static CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[$€£¥]\s?\d|\b\d[\d,.]*\s?(?:dollars|euros|pounds|yen|usd|eur|gbp)\b",
    )
    .expect("currency pattern is valid")
});

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:1[89]|20)\d{2}\b").expect("year pattern is valid"));

static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?\b|\b\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:january|february|march|april|may|june|july|august|september|october|november|december)\b",
    )
    .expect("month/day pattern is valid")
});

static ATTRIBUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\baccording to\s+\w+|\b(?:said|says|told|stated|reported|announced|confirmed|testified)\b",
    )
    .expect("attribution pattern is valid")
});

static COMPARATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:more|less|fewer|higher|lower|larger|smaller|greater|bigger|faster|slower)\s+than\b|\b(?:increased|decreased|rose|fell|grew|declined|doubled|tripled|dropped|surged|jumped|halved)\b",
    )
    .expect("comparative pattern is valid")
});

static CAUSAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:because(?:\s+of)?|due to|caused|causes|led to|leads to|resulted in|as a result of|triggered)\b",
    )
    .expect("causal pattern is valid")
});

static VAGUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:some|many|several|various|numerous|few|often|sometimes|lots of|a number of)\b")
        .expect("vague pattern is valid")
});

/// Per-cue contributions behind a claim score, useful for debugging extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub percent: f32,
    pub currency: f32,
    pub year: f32,
    pub month_day: f32,
    pub attribution: f32,
    pub comparative: f32,
    pub causal: f32,
    pub entities: f32,
    pub length: f32,
    pub vagueness: f32,
}

impl ScoreBreakdown {
    /// Sum of all cues, floored at zero.
    pub fn total(&self) -> f32 {
        let raw = self.percent
            + self.currency
            + self.year
            + self.month_day
            + self.attribution
            + self.comparative
            + self.causal
            + self.entities
            + self.length
            - self.vagueness;
        raw.max(0.0)
    }
}

fn presence(re: &Regex, text: &str, weight: f32) -> f32 {
    if re.is_match(text) { weight } else { 0.0 }
}

pub fn score_breakdown(sentence: &str, entities: &EntityBundle) -> ScoreBreakdown {
    let attributions = ATTRIBUTION.find_iter(sentence).count().min(MAX_ATTRIBUTIONS);
    let word_count = sentence.split_whitespace().count();

    ScoreBreakdown {
        percent: presence(&PERCENT, sentence, PERCENT_WEIGHT),
        currency: presence(&CURRENCY, sentence, CURRENCY_WEIGHT),
        year: presence(&YEAR, sentence, YEAR_WEIGHT),
        month_day: presence(&MONTH_DAY, sentence, MONTH_DAY_WEIGHT),
        attribution: attributions as f32 * ATTRIBUTION_WEIGHT,
        comparative: presence(&COMPARATIVE, sentence, COMPARATIVE_WEIGHT),
        causal: presence(&CAUSAL, sentence, CAUSAL_WEIGHT),
        entities: (entities.named_count() as f32 * ENTITY_WEIGHT).min(MAX_ENTITY_BONUS),
        length: if (15..=40).contains(&word_count) {
            LENGTH_BONUS
        } else {
            0.0
        },
        vagueness: VAGUE.find_iter(sentence).count() as f32 * VAGUE_PENALTY,
    }
}

/// Scores how much a sentence looks like a checkable factual claim. Never negative.
pub fn score_factual_claim(sentence: &str, entities: &EntityBundle) -> f32 {
    score_breakdown(sentence, entities).total()
}
