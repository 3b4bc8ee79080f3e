use thiserror::Error;

#[derive(Debug, Error)]
/// Errors from an NLI backend. The scorer answers all of them with the next strategy.
pub enum NliError {
    #[error("NLI request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("NLI service returned HTTP {status}: {message}")]
    Http {
        /// Status code.
        status: u16,
        /// Error message.
        message: String,
    },

    #[error("NLI transport error: {0}")]
    Transport(String),

    /// The response parsed but was missing labels or carried implausible scores.
    #[error("malformed NLI response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for NliError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NliError::Malformed(err.to_string())
        } else {
            NliError::Transport(err.to_string())
        }
    }
}
