//! Article text, canned search results and pipeline builders.

use std::sync::Arc;
use std::time::Duration;

use verity::evidence::{
    Article, CredentialPool, EvidenceRetriever, MockSearchBackend, RetrieverConfig,
    new_evidence_cache,
};
use verity::nli::{MockNliBackend, NliBackend, NliConfig, NliResult, NliScorer, new_nli_cache};
use verity::pipeline::Pipeline;

/// Two factual claims surrounded by page chrome and opinion.
pub const TWO_CLAIMS: &str = "Subscribe to our newsletter for the latest updates every morning. \
    The unemployment rate fell to 3.5% in March 2024, according to the Bureau of Labor Statistics. \
    I believe this might be the best economy we could ever hope to see in our lifetimes. \
    Officials said the Federal Reserve raised interest rates by 0.25 percent on Wednesday.";

/// Page text with nothing worth checking.
pub const NO_CLAIMS: &str = "Home. Menu. Sign in. Short line.";

pub fn supportive() -> NliResult {
    NliResult::new(0.8, 0.05, 0.15)
}

pub fn refuting() -> NliResult {
    NliResult::new(0.05, 0.8, 0.15)
}

pub fn jobs_article(i: usize) -> Article {
    Article::new(
        format!("https://www.reuters.com/markets/jobs-{i}"),
        format!("Jobs report {i}"),
        "Reuters",
    )
    .with_description(
        "The unemployment rate fell to 3.5% in March 2024, the Bureau of Labor Statistics confirms.",
    )
}

pub fn fed_article(i: usize) -> Article {
    Article::new(
        format!("https://www.reuters.com/markets/fed-{i}"),
        format!("Fed decision {i}"),
        "Reuters",
    )
    .with_description("The Federal Reserve raised interest rates by 0.25 percent on Wednesday.")
}

/// Two stories about each claim.
pub fn mixed_articles() -> Vec<Article> {
    vec![jobs_article(1), jobs_article(2), fed_article(1), fed_article(2)]
}

pub fn retriever(search: Arc<MockSearchBackend>, keys: &[&str]) -> EvidenceRetriever {
    EvidenceRetriever::new(
        search,
        Arc::new(CredentialPool::new(keys.iter().copied())),
        new_evidence_cache(),
        RetrieverConfig::default().with_query_delay(Duration::ZERO),
    )
}

pub fn model_scorer(nli: Arc<MockNliBackend>) -> NliScorer {
    NliScorer::new(
        vec![nli as Arc<dyn NliBackend>],
        new_nli_cache(),
        NliConfig::default(),
    )
}

pub fn build_pipeline(
    search: Arc<MockSearchBackend>,
    keys: &[&str],
    nli: Option<Arc<MockNliBackend>>,
) -> Pipeline {
    let scorer = match nli {
        Some(nli) => model_scorer(nli),
        None => NliScorer::heuristic_only(new_nli_cache()),
    };
    Pipeline::new(retriever(search, keys), scorer)
}
