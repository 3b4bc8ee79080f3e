use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a search backend.
///
/// All of them are degradable: the retriever rotates credentials, skips the query or
/// serves the fallback set.
pub enum SearchError {
    /// The credential hit its quota (HTTP 429).
    #[error("search credential rate limited")]
    RateLimited,

    #[error("search service returned HTTP {status}: {message}")]
    Http {
        /// Status code.
        status: u16,
        /// Error message from the service, if any.
        message: String,
    },

    #[error("search request timed out")]
    Timeout,

    #[error("search transport error: {0}")]
    Transport(String),

    #[error("failed to decode search response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}
