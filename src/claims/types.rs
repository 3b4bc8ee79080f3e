use serde::{Deserialize, Serialize};

/// Named entities found in one claim.
///
/// Only used for query building and relevance matching; carries no identity of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBundle {
    pub people: Vec<String>,
    pub places: Vec<String>,
    pub organizations: Vec<String>,
    pub dates: Vec<String>,
    pub numeric_values: Vec<String>,
    pub acronyms: Vec<String>,
}

impl EntityBundle {
    /// People, organizations and places, in that order.
    pub fn named(&self) -> impl Iterator<Item = &String> {
        self.people
            .iter()
            .chain(self.organizations.iter())
            .chain(self.places.iter())
    }

    /// Count of people, places, organizations and acronyms.
    pub fn named_count(&self) -> usize {
        self.people.len() + self.places.len() + self.organizations.len() + self.acronyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
            && self.places.is_empty()
            && self.organizations.is_empty()
            && self.dates.is_empty()
            && self.numeric_values.is_empty()
            && self.acronyms.is_empty()
    }
}

/// A candidate factual sentence with its claim-likeness score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub text: String,
    pub factual_score: f32,
    pub entities: EntityBundle,
}

impl Claim {
    pub fn new(text: impl Into<String>, factual_score: f32, entities: EntityBundle) -> Self {
        Self {
            text: text.into(),
            factual_score,
            entities,
        }
    }
}

/// Why a sentence did not become a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    TooShort,
    TooLong,
    Boilerplate,
    Opinion,
    LowScore,
    Duplicate,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::TooShort => "too_short",
            RejectReason::TooLong => "too_long",
            RejectReason::Boilerplate => "boilerplate",
            RejectReason::Opinion => "opinion",
            RejectReason::LowScore => "low_score",
            RejectReason::Duplicate => "duplicate",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
