use serde::{Deserialize, Serialize};

use crate::constants::{NLI_VALID_SUM_MAX, NLI_VALID_SUM_MIN};

/// Entailment, contradiction and neutral probabilities for one (evidence, claim) pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NliResult {
    pub entail: f32,
    pub contra: f32,
    pub neutral: f32,
}

impl NliResult {
    pub fn new(entail: f32, contra: f32, neutral: f32) -> Self {
        Self {
            entail,
            contra,
            neutral,
        }
    }

    /// All three scores are finite and within `[0, 1]`.
    pub fn in_unit_range(&self) -> bool {
        [self.entail, self.contra, self.neutral]
            .iter()
            .all(|s| s.is_finite() && (0.0..=1.0).contains(s))
    }

    /// In range and summing to a plausible total.
    pub fn is_valid(&self) -> bool {
        let sum = self.entail + self.contra + self.neutral;
        self.in_unit_range() && (NLI_VALID_SUM_MIN..=NLI_VALID_SUM_MAX).contains(&sum)
    }
}

/// Which strategy produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NliStrategy {
    Model,
    Cached,
    Heuristic,
}

impl NliStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NliStrategy::Model => "model",
            NliStrategy::Cached => "cached",
            NliStrategy::Heuristic => "heuristic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NliOutcome {
    pub result: NliResult,
    pub strategy: NliStrategy,
}

/// Per-label scores as returned by a zero-shot classifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelScores {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl LabelScores {
    pub fn get(&self, label: &str) -> Option<f32> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|i| self.scores.get(i).copied())
    }
}
