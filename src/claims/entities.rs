//! Lightweight entity extraction: capitalized-phrase chunking with small gazetteers.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::types::EntityBundle;

static ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,6}\b").expect("acronym pattern is valid"));

static CAPITALIZED_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z'’\-]+(?:\s+(?:(?:of|the|for|de|van|von)\s+){0,2}[A-Z][a-zA-Z'’\-]+)*")
        .expect("phrase pattern is valid")
});

static TITLED_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:President|Vice President|Senator|Sen\.|Representative|Rep\.|Governor|Gov\.|Mayor|Minister|Prime Minister|Chancellor|Secretary|Judge|Justice|Dr\.|Mr\.|Mrs\.|Ms\.|Professor|Prof\.|CEO|General|Gen\.)\s+([A-Z][a-z]+(?:\s+[A-Z]\.)?(?:\s+[A-Z][a-z]+){0,2})",
    )
    .expect("titled person pattern is valid")
});

pub(crate) static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?(?:,?\s+\d{4})?\b|\b\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:january|february|march|april|may|june|july|august|september|october|november|december)(?:\s+\d{4})?\b|\b(?:january|february|march|april|june|july|august|september|october|november|december)\s+\d{4}\b|\b(?:1[89]|20)\d{2}\b",
    )
    .expect("date pattern is valid")
});

pub(crate) static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[$€£¥]\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:million|billion|trillion))?|\b\d[\d,]*(?:\.\d+)?(?:\s?(?:%|percent\b|per cent\b|million\b|billion\b|trillion\b|thousand\b))?",
    )
    .expect("numeric pattern is valid")
});

static YEAR_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:1[89]|20)\d{2}$").expect("year pattern is valid"));

const LEADING_STOPWORDS: &[&str] = &[
    "The", "A", "An", "In", "On", "At", "By", "For", "From", "This", "That", "These", "Those",
    "It", "Its", "He", "She", "They", "We", "His", "Her", "Their", "Our", "But", "And", "Or",
    "As", "After", "Before", "When", "While", "According", "Last", "Since", "During", "If",
    "However", "Meanwhile", "Also", "Officials", "Some", "Many", "Most",
];

const CALENDAR_WORDS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday",
    "Saturday", "Sunday",
];

const ORG_MARKERS: &[&str] = &[
    "Inc", "Corp", "Corporation", "Company", "Co", "Ltd", "LLC", "Group", "University",
    "College", "Institute", "Agency", "Administration", "Department", "Ministry", "Bank",
    "Council", "Association", "Party", "Commission", "Committee", "Court", "Congress", "Senate",
    "Parliament", "Foundation", "Organization", "Organisation", "Authority", "Bureau", "Reserve",
    "Times", "Post", "News", "Network", "Union", "Board", "Office", "Hospital", "Fund",
    "Federation", "Airlines", "Motors", "Technologies", "Labs", "Police", "Army", "Navy",
];

const PLACE_SUFFIXES: &[&str] = &[
    "City", "County", "State", "Province", "Island", "Islands", "River", "Valley", "Region",
    "Republic", "Kingdom",
];

const PLACES: &[&str] = &[
    "United States", "America", "Canada", "Mexico", "Brazil", "Argentina", "Chile", "Colombia",
    "Peru", "Venezuela", "United Kingdom", "Britain", "England", "Scotland", "Wales", "Ireland",
    "France", "Germany", "Italy", "Spain", "Portugal", "Netherlands", "Belgium", "Switzerland",
    "Austria", "Poland", "Sweden", "Norway", "Denmark", "Finland", "Greece", "Turkey", "Russia",
    "Ukraine", "Belarus", "Israel", "Gaza", "Iran", "Iraq", "Syria", "Lebanon", "Jordan", "Egypt",
    "Saudi Arabia", "Qatar", "Yemen", "Afghanistan", "Pakistan", "India", "Bangladesh", "China",
    "Japan", "Korea", "South Korea", "North Korea", "Taiwan", "Vietnam", "Thailand", "Indonesia",
    "Philippines", "Malaysia", "Singapore", "Australia", "New Zealand", "Nigeria", "Kenya",
    "Ethiopia", "South Africa", "Europe", "Asia", "Africa", "Washington", "New York", "London",
    "Paris", "Berlin", "Moscow", "Beijing", "Tokyo", "Delhi", "New Delhi", "Mumbai", "Jerusalem",
    "Kyiv", "Brussels", "Geneva", "Rome", "Madrid", "Toronto", "Sydney", "Chicago",
    "Los Angeles", "San Francisco", "Texas", "California", "Florida", "Ohio", "Michigan",
    "Georgia", "Arizona", "Pennsylvania", "Virginia", "Wisconsin", "Nevada", "Colorado",
];

const PERSON_TITLES: &[&str] = &[
    "President", "Vice", "Senator", "Sen", "Representative", "Rep", "Governor", "Gov", "Mayor",
    "Minister", "Prime", "Chancellor", "Secretary", "Judge", "Justice", "Dr", "Mr", "Mrs", "Ms",
    "Professor", "Prof", "CEO", "General", "Gen",
];

fn push_unique(target: &mut Vec<String>, seen: &mut HashSet<String>, value: &str) {
    let trimmed = value.trim().trim_end_matches([',', '.', ';', ':']);
    if trimmed.is_empty() {
        return;
    }
    if seen.insert(trimmed.to_lowercase()) {
        target.push(trimmed.to_string());
    }
}

fn is_place(phrase: &str) -> bool {
    PLACES.iter().any(|p| p.eq_ignore_ascii_case(phrase))
        || phrase
            .split_whitespace()
            .last()
            .is_some_and(|w| PLACE_SUFFIXES.contains(&w))
}

fn is_organization(phrase: &str) -> bool {
    let words: Vec<&str> = phrase
        .split_whitespace()
        .map(|w| w.trim_end_matches('.'))
        .collect();
    match (words.first(), words.last()) {
        (Some(first), Some(last)) => {
            ORG_MARKERS.contains(last) || (words.len() > 2 && ORG_MARKERS.contains(first))
        }
        _ => false,
    }
}

fn looks_like_person(phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    (2..=3).contains(&words.len())
        && words.iter().all(|w| {
            let mut chars = w.chars();
            chars.next().is_some_and(char::is_uppercase)
                && chars.all(|c| c.is_lowercase() || c == '-' || c == '\'')
        })
        && !words.iter().any(|w| CALENDAR_WORDS.contains(w))
}

/// Strips leading sentence words like "The" or "According" from a capitalized run.
fn strip_leading(phrase: &str) -> &str {
    let mut rest = phrase;
    loop {
        let Some((first, tail)) = rest.split_once(char::is_whitespace) else {
            return if LEADING_STOPWORDS.contains(&rest) { "" } else { rest };
        };
        if LEADING_STOPWORDS.contains(&first)
            || PERSON_TITLES.contains(&first.trim_end_matches('.'))
        {
            rest = tail.trim_start();
        } else {
            return rest;
        }
    }
}

/// Extracts entities from one cleaned sentence.
pub fn extract_entities(sentence: &str) -> EntityBundle {
    let mut bundle = EntityBundle::default();
    let mut seen = HashSet::new();

    for caps in TITLED_PERSON.captures_iter(sentence) {
        if let Some(name) = caps.get(1) {
            push_unique(&mut bundle.people, &mut seen, name.as_str());
        }
    }

    for m in CAPITALIZED_PHRASE.find_iter(sentence) {
        let phrase = strip_leading(m.as_str());
        if phrase.is_empty() || seen.contains(&phrase.to_lowercase()) {
            continue;
        }
        if CALENDAR_WORDS.contains(&phrase) || (ACRONYM.is_match(phrase) && !phrase.contains(' ')) {
            continue;
        }

        if is_organization(phrase) {
            push_unique(&mut bundle.organizations, &mut seen, phrase);
        } else if is_place(phrase) {
            push_unique(&mut bundle.places, &mut seen, phrase);
        } else if looks_like_person(phrase) {
            push_unique(&mut bundle.people, &mut seen, phrase);
        }
    }

    let mut date_spans = Vec::new();
    for m in DATE.find_iter(sentence) {
        date_spans.push(m.range());
        push_unique(&mut bundle.dates, &mut seen, m.as_str());
    }

    for m in NUMERIC.find_iter(sentence) {
        if date_spans.iter().any(|span| span.contains(&m.start())) {
            continue;
        }
        let value = m.as_str().trim().trim_end_matches([',', '.']);
        if YEAR_ONLY.is_match(value) {
            continue;
        }
        push_unique(&mut bundle.numeric_values, &mut seen, value);
    }

    for m in ACRONYM.find_iter(sentence) {
        push_unique(&mut bundle.acronyms, &mut seen, m.as_str());
    }

    bundle
}
