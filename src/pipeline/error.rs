use thiserror::Error;

/// Fatal outcomes of an analysis run. Degradable failures never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A claim-scoring task panicked or was cancelled.
    #[error("claim scoring task failed: {0}")]
    TaskFailed(String),

    /// The run reported an `error` event.
    #[error("analysis failed: {0}")]
    Failed(String),

    /// The event stream closed before a terminal event.
    #[error("analysis ended without a result")]
    Incomplete,
}
