use std::convert::Infallible;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures_util::StreamExt;
use tracing::{debug, error, instrument};

use super::error::GatewayError;
use super::payload::AnalyzeRequest;
use super::state::HandlerState;
use super::{VERITY_STATUS_COMPLETE, VERITY_STATUS_HEADER, VERITY_STATUS_STREAMING};
use crate::pipeline::PipelineEvent;

#[instrument(skip(state, request), fields(chars = tracing::field::Empty, stream = tracing::field::Empty))]
pub async fn analyze_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: AnalyzeRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let span = tracing::Span::current();
    span.record("chars", request.text.chars().count());
    span.record("stream", request.stream);

    if request.text.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "text must not be empty".to_string(),
        ));
    }

    if request.stream {
        debug!("streaming analysis requested");
        let events = state.pipeline.analyze_stream(request.text).map(sse_event);
        let mut headers = HeaderMap::new();
        headers.insert(
            VERITY_STATUS_HEADER,
            HeaderValue::from_static(VERITY_STATUS_STREAMING),
        );
        let sse = Sse::new(events).keep_alive(KeepAlive::default());
        return Ok((headers, sse).into_response());
    }

    let result = state.pipeline.analyze(request.text).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        VERITY_STATUS_HEADER,
        HeaderValue::from_static(VERITY_STATUS_COMPLETE),
    );
    Ok((StatusCode::OK, headers, Json(result)).into_response())
}

/// One SSE frame per pipeline event: event name is the kind, data is the JSON body.
pub fn sse_event(event: PipelineEvent) -> Result<Event, Infallible> {
    match serde_json::to_string(&event) {
        Ok(json) => Ok(Event::default().event(event.kind()).data(json)),
        Err(e) => {
            error!(kind = event.kind(), "Failed to serialize pipeline event: {}", e);
            Ok(Event::default().comment("serialization-error"))
        }
    }
}
