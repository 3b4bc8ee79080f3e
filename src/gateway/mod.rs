//! HTTP gateway (Axum) carrying the `analyze` operation.
//!
//! Routes:
//! - `GET /healthz` liveness
//! - `GET /ready` component modes and cache sizes
//! - `POST /v1/analyze` JSON result, or Server-Sent Events when `stream` is set

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::analyze_handler;
pub use payload::AnalyzeRequest;
pub use state::HandlerState;

/// Response header carrying a short machine-readable status.
pub const VERITY_STATUS_HEADER: &str = "x-verity-status";
pub const VERITY_STATUS_HEALTHY: &str = "healthy";
pub const VERITY_STATUS_READY: &str = "ready";
pub const VERITY_STATUS_COMPLETE: &str = "complete";
pub const VERITY_STATUS_STREAMING: &str = "streaming";

pub fn create_router_with_state(state: HandlerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/analyze", post(analyze_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    pub http: &'static str,
    /// `live` with credentials, `offline` when serving synthetic sources.
    pub search: &'static str,
    /// `model` with an NLI endpoint, `heuristic` otherwise.
    pub nli: &'static str,
    pub evidence_cache_entries: usize,
    pub nli_cache_entries: usize,
}

fn status_headers(status: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(VERITY_STATUS_HEADER, HeaderValue::from_static(status));
    headers
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(VERITY_STATUS_HEALTHY),
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Offline search and heuristic NLI are valid operating modes, so this is always 200.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let retriever = state.pipeline.retriever();
    let scorer = state.pipeline.scorer();
    retriever.cache().run_pending_tasks();
    scorer.cache().run_pending_tasks();

    let components = ComponentStatus {
        http: VERITY_STATUS_READY,
        search: if retriever.is_live() { "live" } else { "offline" },
        nli: if scorer.has_model() { "model" } else { "heuristic" },
        evidence_cache_entries: retriever.cache().len(),
        nli_cache_entries: scorer.cache().len(),
    };

    (
        StatusCode::OK,
        status_headers(VERITY_STATUS_READY),
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
