//! Analysis orchestration.
//!
//! A run moves `extracting → querying → retrieving → scoring → aggregating` and ends in
//! `complete` or `failed`. [`Pipeline::analyze_stream`] yields [`PipelineEvent`]s as the run
//! progresses; [`Pipeline::analyze`] drains the same stream and returns the final
//! [`AnalysisResult`].
//!
//! Degradable failures (search outages, rate limits, NLI errors) are absorbed by fallbacks
//! below this layer. The only fatal path is a claim-scoring task that panics.

pub mod error;
pub mod orchestrator;
pub mod page_type;
pub mod types;


pub use error::PipelineError;
pub use orchestrator::{Pipeline, PipelineConfig};
pub use page_type::PageClassifier;
pub use types::{AnalysisResult, PageLabel, PageType, PipelineEvent, PipelineStage};
