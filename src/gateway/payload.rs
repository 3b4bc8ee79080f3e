use serde::{Deserialize, Serialize};

/// Body of `POST /v1/analyze`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalyzeRequest {
    /// Raw page text.
    pub text: String,
    /// Reply with Server-Sent Events instead of a single JSON body.
    #[serde(default)]
    pub stream: bool,
}
