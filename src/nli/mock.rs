use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::client::NliBackend;
use super::error::NliError;
use super::types::NliResult;

/// What a [`MockNliBackend`] answers.
#[derive(Debug, Clone, PartialEq)]
pub enum MockNliBehavior {
    /// Same scores for every pair.
    Fixed(NliResult),
    /// Scores chosen by substring: the first `(needle, result)` whose needle occurs in the
    /// premise wins, otherwise the default.
    ByPremise {
        rules: Vec<(String, NliResult)>,
        default: NliResult,
    },
    Fail,
    /// Sleeps before answering, for timeout and concurrency tests.
    Slow(Duration, NliResult),
    /// Panics inside the scoring task.
    Panic,
}

#[derive(Debug)]
pub struct MockNliBackend {
    behavior: MockNliBehavior,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockNliBackend {
    pub fn new(behavior: MockNliBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn fixed(result: NliResult) -> Self {
        Self::new(MockNliBehavior::Fixed(result))
    }

    pub fn failing() -> Self {
        Self::new(MockNliBehavior::Fail)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most `classify` calls ever running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn answer(&self, premise: &str) -> Result<NliResult, NliError> {
        match &self.behavior {
            MockNliBehavior::Fixed(result) => Ok(*result),
            MockNliBehavior::ByPremise { rules, default } => Ok(rules
                .iter()
                .find(|(needle, _)| premise.contains(needle.as_str()))
                .map(|(_, r)| *r)
                .unwrap_or(*default)),
            MockNliBehavior::Fail => Err(NliError::Http {
                status: 503,
                message: "scripted failure".to_string(),
            }),
            MockNliBehavior::Slow(delay, result) => {
                tokio::time::sleep(*delay).await;
                Ok(*result)
            }
            MockNliBehavior::Panic => panic!("scripted panic"),
        }
    }
}

#[async_trait]
impl NliBackend for MockNliBackend {
    async fn classify(&self, premise: &str, _claim: &str) -> Result<NliResult, NliError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        let answer = self.answer(premise).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        answer
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
