use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consensus::{ClaimVerdict, ConsensusSummary};
use crate::evidence::Source;

/// Run states. A run moves forward through these and ends in `Complete` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Extracting,
    Querying,
    Retrieving,
    Scoring,
    Aggregating,
    Complete,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Extracting => "extracting",
            PipelineStage::Querying => "querying",
            PipelineStage::Retrieving => "retrieving",
            PipelineStage::Scoring => "scoring",
            PipelineStage::Aggregating => "aggregating",
            PipelineStage::Complete => "complete",
            PipelineStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Complete | PipelineStage::Failed)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLabel {
    NewsArticle,
    Opinion,
    Reference,
    BlogPost,
    Other,
}

impl PageLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageLabel::NewsArticle => "news_article",
            PageLabel::Opinion => "opinion",
            PageLabel::Reference => "reference",
            PageLabel::BlogPost => "blog_post",
            PageLabel::Other => "other",
        }
    }
}

/// Coarse page classification with a confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageType {
    pub label: PageLabel,
    pub score: f32,
}

impl Default for PageType {
    fn default() -> Self {
        Self {
            label: PageLabel::Other,
            score: 0.0,
        }
    }
}

/// Terminal artifact of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub run_id: Uuid,
    pub page_type: PageType,
    /// In claim-extraction order, not completion order.
    pub claims: Vec<ClaimVerdict>,
    pub sources: Vec<Source>,
    pub credibility_score: f32,
    pub consensus_summary: ConsensusSummary,
}

/// Progressive output of a run. The stream ends after `Complete` or `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    Status {
        stage: PipelineStage,
        message: String,
    },
    PageType {
        label: PageLabel,
        score: f32,
    },
    ClaimsExtracted {
        count: usize,
    },
    #[serde(rename_all = "camelCase")]
    SourcesFound {
        count: usize,
        used_fallback: bool,
        sources: Vec<Source>,
    },
    ClaimResult {
        verdict: Box<ClaimVerdict>,
        index: usize,
        total: usize,
    },
    Complete {
        result: Box<AnalysisResult>,
    },
    Error {
        message: String,
    },
}

impl PipelineEvent {
    /// Event name used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineEvent::Status { .. } => "status",
            PipelineEvent::PageType { .. } => "page_type",
            PipelineEvent::ClaimsExtracted { .. } => "claims_extracted",
            PipelineEvent::SourcesFound { .. } => "sources_found",
            PipelineEvent::ClaimResult { .. } => "claim_result",
            PipelineEvent::Complete { .. } => "complete",
            PipelineEvent::Error { .. } => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineEvent::Complete { .. } | PipelineEvent::Error { .. }
        )
    }

    pub(crate) fn status(stage: PipelineStage, message: impl Into<String>) -> Self {
        PipelineEvent::Status {
            stage,
            message: message.into(),
        }
    }
}
