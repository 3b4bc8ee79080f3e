use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

use super::error::PipelineError;
use super::page_type::PageClassifier;
use super::types::{AnalysisResult, PageType, PipelineEvent, PipelineStage};
use crate::claims::{Claim, ClaimExtractor, ExtractorConfig};
use crate::consensus::{ClaimVerdict, ConsensusEngine, ScoredEvidence};
use crate::constants::{
    CLAIM_BATCH_SIZE, EVENT_CHANNEL_CAPACITY, MAX_SOURCES_PER_CLAIM, NLI_CONCURRENCY,
};
use crate::evidence::{EvidenceRetriever, Source};
use crate::nli::{NliScorer, NliStrategy};
use crate::query::QueryBuilder;
use crate::relevance::{RelevanceMatcher, RelevantSource};
use crate::text::TextNormalizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Claims scored concurrently per batch.
    pub claim_batch_size: usize,
    /// In-flight NLI calls per claim.
    pub nli_concurrency: usize,
    /// Sources scored per claim, picked by lexical prefilter.
    pub sources_per_claim: usize,
    pub event_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            claim_batch_size: CLAIM_BATCH_SIZE,
            nli_concurrency: NLI_CONCURRENCY,
            sources_per_claim: MAX_SOURCES_PER_CLAIM,
            event_capacity: EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl PipelineConfig {
    pub fn with_claim_batch_size(mut self, size: usize) -> Self {
        self.claim_batch_size = size.max(1);
        self
    }

    pub fn with_nli_concurrency(mut self, concurrency: usize) -> Self {
        self.nli_concurrency = concurrency.max(1);
        self
    }

    pub fn with_sources_per_claim(mut self, sources: usize) -> Self {
        self.sources_per_claim = sources.max(1);
        self
    }
}

/// Why a run stopped early.
enum RunError {
    /// The consumer dropped the stream.
    Closed,
    Fatal(PipelineError),
}

impl<T> From<mpsc::error::SendError<T>> for RunError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        RunError::Closed
    }
}

/// Everything a spawned claim task needs. Cheap to clone.
#[derive(Debug, Clone)]
struct ClaimScorer {
    scorer: NliScorer,
    matcher: RelevanceMatcher,
    engine: ConsensusEngine,
    sources_per_claim: usize,
    nli_concurrency: usize,
}

impl ClaimScorer {
    async fn score(&self, claim: Claim, sources: &[Source]) -> ClaimVerdict {
        let picked = self
            .matcher
            .top_candidates(&claim, sources, self.sources_per_claim);

        let claim_text = claim.text.as_str();
        let outcomes: Vec<_> = stream::iter(picked.into_iter().map(|idx| {
            let evidence = sources[idx].evidence_text();
            async move { (idx, self.scorer.score(&evidence, claim_text).await) }
        }))
        .buffered(self.nli_concurrency)
        .collect()
        .await;

        let heuristic = outcomes
            .iter()
            .filter(|(_, o)| o.strategy == NliStrategy::Heuristic)
            .count();
        debug!(
            scored = outcomes.len(),
            heuristic, "evidence scored for claim"
        );

        let scores: Vec<ScoredEvidence> = outcomes
            .iter()
            .map(|(idx, o)| ScoredEvidence {
                result: o.result,
                reputable: sources[*idx].reputable,
            })
            .collect();

        let candidates = outcomes
            .iter()
            .map(|(idx, o)| RelevantSource {
                source: sources[*idx].clone(),
                relevance: self.matcher.score(&claim, &sources[*idx], &o.result),
            })
            .collect();
        let relevant = self.matcher.select(candidates);

        self.engine.verdict(claim, &scores, relevant)
    }
}

/// Sequences extraction, retrieval, scoring and consensus for one text at a time.
///
/// Cloning is cheap; clones share the retriever's and scorer's caches.
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: TextNormalizer,
    classifier: PageClassifier,
    extractor: ClaimExtractor,
    queries: QueryBuilder,
    retriever: EvidenceRetriever,
    claim_scorer: ClaimScorer,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(retriever: EvidenceRetriever, scorer: NliScorer) -> Self {
        let config = PipelineConfig::default();
        Self {
            normalizer: TextNormalizer::default(),
            classifier: PageClassifier::new(),
            extractor: ClaimExtractor::default(),
            queries: QueryBuilder::default(),
            retriever,
            claim_scorer: ClaimScorer {
                scorer,
                matcher: RelevanceMatcher::default(),
                engine: ConsensusEngine::default(),
                sources_per_claim: config.sources_per_claim,
                nli_concurrency: config.nli_concurrency,
            },
            config,
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.claim_scorer.sources_per_claim = config.sources_per_claim;
        self.claim_scorer.nli_concurrency = config.nli_concurrency;
        self.config = config;
        self
    }

    pub fn with_extractor(mut self, config: ExtractorConfig) -> Self {
        self.extractor = ClaimExtractor::new(config);
        self
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn retriever(&self) -> &EvidenceRetriever {
        &self.retriever
    }

    pub fn scorer(&self) -> &NliScorer {
        &self.claim_scorer.scorer
    }

    /// Starts a run in the background and returns its events.
    ///
    /// The stream is finite and ends after a `complete` or `error` event. Dropping it stops
    /// the run at the next emission point.
    pub fn analyze_stream(&self, text: impl Into<String>) -> ReceiverStream<PipelineEvent> {
        let (tx, rx) = mpsc::channel(self.config.event_capacity.max(1));
        let pipeline = self.clone();
        let text = text.into();
        let run_id = Uuid::new_v4();

        tokio::spawn(
            async move { pipeline.run(run_id, text, tx).await }
                .instrument(info_span!("analysis", %run_id)),
        );

        ReceiverStream::new(rx)
    }

    /// Runs to completion and returns only the final result.
    pub async fn analyze(&self, text: impl Into<String>) -> Result<AnalysisResult, PipelineError> {
        let mut events = self.analyze_stream(text);
        while let Some(event) = events.next().await {
            match event {
                PipelineEvent::Complete { result } => return Ok(*result),
                PipelineEvent::Error { message } => return Err(PipelineError::Failed(message)),
                _ => {}
            }
        }
        Err(PipelineError::Incomplete)
    }

    async fn run(self, run_id: Uuid, text: String, tx: mpsc::Sender<PipelineEvent>) {
        match self.execute(run_id, &text, &tx).await {
            Ok(()) => {}
            Err(RunError::Closed) => debug!("consumer dropped the stream; run abandoned"),
            Err(RunError::Fatal(err)) => {
                error!(error = %err, stage = PipelineStage::Failed.as_str(), "analysis failed");
                let message = err.to_string();
                let _ = tx
                    .send(PipelineEvent::status(PipelineStage::Failed, message.clone()))
                    .await;
                let _ = tx.send(PipelineEvent::Error { message }).await;
            }
        }
    }

    async fn execute(
        &self,
        run_id: Uuid,
        text: &str,
        tx: &mpsc::Sender<PipelineEvent>,
    ) -> Result<(), RunError> {
        tx.send(PipelineEvent::status(
            PipelineStage::Extracting,
            "Extracting claims",
        ))
        .await?;

        let normalized = self.normalizer.normalize(text);
        let page_type = self.classifier.classify(&normalized);
        tx.send(PipelineEvent::PageType {
            label: page_type.label,
            score: page_type.score,
        })
        .await?;

        let claims = self.extractor.extract(&normalized);
        info!(
            stage = PipelineStage::Extracting.as_str(),
            chars = normalized.chars().count(),
            claims = claims.len(),
            page_type = page_type.label.as_str(),
            "claims extracted"
        );
        tx.send(PipelineEvent::ClaimsExtracted {
            count: claims.len(),
        })
        .await?;

        if claims.is_empty() {
            return self.finish(run_id, page_type, Vec::new(), Vec::new(), false, tx).await;
        }

        tx.send(PipelineEvent::status(
            PipelineStage::Querying,
            format!("Building search queries for {} claims", claims.len()),
        ))
        .await?;
        let queries = self.queries.build_all(&claims);

        tx.send(PipelineEvent::status(
            PipelineStage::Retrieving,
            format!("Searching with {} queries", queries.len()),
        ))
        .await?;
        let outcome = self.retriever.retrieve(&queries).await;
        info!(
            stage = PipelineStage::Retrieving.as_str(),
            sources = outcome.sources.len(),
            used_fallback = outcome.used_fallback,
            from_cache = outcome.from_cache,
            "evidence retrieved"
        );
        tx.send(PipelineEvent::SourcesFound {
            count: outcome.sources.len(),
            used_fallback: outcome.used_fallback,
            sources: outcome.sources.clone(),
        })
        .await?;

        tx.send(PipelineEvent::status(
            PipelineStage::Scoring,
            format!(
                "Scoring {} claims against {} sources",
                claims.len(),
                outcome.sources.len()
            ),
        ))
        .await?;
        let sources = Arc::new(outcome.sources);
        let verdicts = self.score_claims(claims, &sources, tx).await?;

        let sources = Arc::try_unwrap(sources).unwrap_or_else(|shared| shared.as_ref().clone());
        self.finish(
            run_id,
            page_type,
            verdicts,
            sources,
            outcome.used_fallback,
            tx,
        )
        .await
    }

    /// Scores claims in fixed-size batches. Each verdict is emitted as soon as its task
    /// finishes; the returned verdicts are in claim order.
    async fn score_claims(
        &self,
        claims: Vec<Claim>,
        sources: &Arc<Vec<Source>>,
        tx: &mpsc::Sender<PipelineEvent>,
    ) -> Result<Vec<ClaimVerdict>, RunError> {
        let total = claims.len();
        let mut slots: Vec<Option<ClaimVerdict>> = vec![None; total];
        let mut pending = claims.into_iter().enumerate().peekable();

        while pending.peek().is_some() {
            let mut batch = JoinSet::new();
            for (index, claim) in pending.by_ref().take(self.config.claim_batch_size.max(1)) {
                let scorer = self.claim_scorer.clone();
                let sources = Arc::clone(sources);
                batch.spawn(
                    async move { (index, scorer.score(claim, &sources).await) }
                        .instrument(info_span!("claim", claim_idx = index)),
                );
            }

            while let Some(joined) = batch.join_next().await {
                let (index, verdict) = joined
                    .map_err(|e| RunError::Fatal(PipelineError::TaskFailed(e.to_string())))?;
                debug!(
                    claim_idx = index,
                    verdict = verdict.verdict.as_str(),
                    confidence = verdict.confidence,
                    "claim verdict ready"
                );
                tx.send(PipelineEvent::ClaimResult {
                    verdict: Box::new(verdict.clone()),
                    index,
                    total,
                })
                .await?;
                slots[index] = Some(verdict);
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }

    async fn finish(
        &self,
        run_id: Uuid,
        page_type: PageType,
        verdicts: Vec<ClaimVerdict>,
        sources: Vec<Source>,
        used_fallback: bool,
        tx: &mpsc::Sender<PipelineEvent>,
    ) -> Result<(), RunError> {
        if !verdicts.is_empty() {
            tx.send(PipelineEvent::status(
                PipelineStage::Aggregating,
                "Aggregating verdicts",
            ))
            .await?;
        }

        let engine = &self.claim_scorer.engine;
        let credibility_score = engine.credibility(&verdicts);
        let consensus_summary = engine.summarize(&verdicts, used_fallback);
        info!(
            stage = PipelineStage::Complete.as_str(),
            claims = verdicts.len(),
            credibility = credibility_score,
            "analysis complete"
        );

        tx.send(PipelineEvent::status(
            PipelineStage::Complete,
            consensus_summary.message.clone(),
        ))
        .await?;
        tx.send(PipelineEvent::Complete {
            result: Box::new(AnalysisResult {
                run_id,
                page_type,
                claims: verdicts,
                sources,
                credibility_score,
                consensus_summary,
            }),
        })
        .await?;
        Ok(())
    }
}
