//! NLI backends.
//!
//! `HttpNliClient` speaks the zero-shot-classification request shape used by hosted
//! inference endpoints: a premise, candidate labels and a hypothesis template.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::NliError;
use super::types::{LabelScores, NliResult};
use crate::constants::DEFAULT_NLI_TIMEOUT;

pub const LABEL_SUPPORTS: &str = "supports";
pub const LABEL_CONTRADICTS: &str = "contradicts";
pub const LABEL_UNRELATED: &str = "unrelated";
pub const CANDIDATE_LABELS: [&str; 3] = [LABEL_SUPPORTS, LABEL_CONTRADICTS, LABEL_UNRELATED];

#[async_trait]
/// Scores how a premise relates to a claim.
pub trait NliBackend: Send + Sync {
    async fn classify(&self, premise: &str, claim: &str) -> Result<NliResult, NliError>;

    /// Short label for logs and readiness reporting.
    fn name(&self) -> &'static str;
}

/// Maps zero-shot label scores onto entail/contra/neutral. All three labels must be present.
pub fn map_label_scores(scores: &LabelScores) -> Result<NliResult, NliError> {
    let get = |label: &str| {
        scores
            .get(label)
            .ok_or_else(|| NliError::Malformed(format!("missing label '{label}'")))
    };
    Ok(NliResult::new(
        get(LABEL_SUPPORTS)?,
        get(LABEL_CONTRADICTS)?,
        get(LABEL_UNRELATED)?,
    ))
}

fn hypothesis_template(claim: &str) -> String {
    let escaped = claim.replace(['{', '}'], "");
    format!("This text {{}} the claim: {escaped}")
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: [&'a str; 3],
    hypothesis_template: String,
    multi_label: bool,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Columns { labels: Vec<String>, scores: Vec<f32> },
    Rows(Vec<LabelScore>),
    Batched(Vec<Vec<LabelScore>>),
}

impl ZeroShotResponse {
    fn into_label_scores(self) -> LabelScores {
        let rows = match self {
            ZeroShotResponse::Columns { labels, scores } => return LabelScores { labels, scores },
            ZeroShotResponse::Rows(rows) => rows,
            ZeroShotResponse::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
        };
        let (labels, scores): (Vec<String>, Vec<f32>) =
            rows.into_iter().map(|r| (r.label, r.score)).unzip();
        LabelScores { labels, scores }
    }
}

/// Hosted zero-shot classification endpoint.
#[derive(Clone)]
pub struct HttpNliClient {
    http: HttpClient,
    url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpNliClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpNliClient")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpNliClient {
    pub fn new(url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let timeout = if timeout.is_zero() {
            DEFAULT_NLI_TIMEOUT
        } else {
            timeout
        };
        Self {
            http: HttpClient::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            url: url.into(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl NliBackend for HttpNliClient {
    async fn classify(&self, premise: &str, claim: &str) -> Result<NliResult, NliError> {
        let body = ZeroShotRequest {
            inputs: premise,
            parameters: ZeroShotParameters {
                candidate_labels: CANDIDATE_LABELS,
                hypothesis_template: hypothesis_template(claim),
                multi_label: false,
            },
        };

        let mut req = self.http.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(NliError::Http {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let parsed: ZeroShotResponse = resp
            .json()
            .await
            .map_err(|e| NliError::Malformed(e.to_string()))?;
        let result = map_label_scores(&parsed.into_label_scores())?;

        debug!(
            entail = result.entail,
            contra = result.contra,
            neutral = result.neutral,
            "NLI model scored pair"
        );
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "zero-shot-http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = ZeroShotRequest {
            inputs: "premise",
            parameters: ZeroShotParameters {
                candidate_labels: CANDIDATE_LABELS,
                hypothesis_template: hypothesis_template("Rates {rose}."),
                multi_label: false,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["inputs"], "premise");
        assert_eq!(
            json["parameters"]["candidate_labels"],
            serde_json::json!(["supports", "contradicts", "unrelated"])
        );
        assert_eq!(
            json["parameters"]["hypothesis_template"],
            "This text {} the claim: Rates rose."
        );
    }

    #[test]
    fn test_columns_response() {
        let parsed: ZeroShotResponse = serde_json::from_str(
            r#"{"sequence":"p","labels":["unrelated","supports","contradicts"],"scores":[0.2,0.7,0.1]}"#,
        )
        .unwrap();
        let result = map_label_scores(&parsed.into_label_scores()).unwrap();
        assert_eq!(result, NliResult::new(0.7, 0.1, 0.2));
    }

    #[test]
    fn test_rows_response() {
        let parsed: ZeroShotResponse = serde_json::from_str(
            r#"[{"label":"contradicts","score":0.6},{"label":"supports","score":0.3},{"label":"unrelated","score":0.1}]"#,
        )
        .unwrap();
        let result = map_label_scores(&parsed.into_label_scores()).unwrap();
        assert_eq!(result, NliResult::new(0.3, 0.6, 0.1));
    }

    #[test]
    fn test_missing_label_is_malformed() {
        let scores = LabelScores {
            labels: vec!["supports".into(), "unrelated".into()],
            scores: vec![0.5, 0.5],
        };
        assert!(matches!(map_label_scores(&scores), Err(NliError::Malformed(_))));
    }
}
