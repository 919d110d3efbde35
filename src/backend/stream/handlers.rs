/**
 * Stream HTTP Handlers
 *
 * This module implements the wire protocol of the real-time relay:
 *
 * - `GET /stream?chatId=<id>` - opens a long-lived SSE connection that
 *   receives every envelope published to the conversation, interleaved
 *   with periodic keep-alive comment frames
 * - `PUT /stream` - publishes an envelope to all current subscribers of a
 *   conversation and acknowledges unconditionally
 *
 * # Connection Lifecycle
 *
 * The keep-alive timer and the registry entry both live inside the
 * response body stream. When the client disconnects - network close,
 * navigation away, explicit cancellation - Axum drops the body, which
 * drops the merged stream, which cancels the timer and runs the
 * subscription's cleanup guard. No exit path can leak a timer or a
 * registry entry.
 *
 * # Example Exchange
 *
 * ```http
 * GET /stream?chatId=u1-u2 HTTP/1.1
 * ```
 *
 * ```http
 * HTTP/1.1 200 OK
 * Content-Type: text/event-stream
 * Cache-Control: no-cache
 * Connection: keep-alive
 *
 * : keep-alive
 *
 * data: {"id":"m1","message":"hi"}
 *
 * ```
 */
use axum::{
    body::Body,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use crate::backend::error::BackendError;
use crate::backend::stream::{frames, registry::StreamRegistry};

/// Interval between keep-alive comment frames on an idle connection.
/// Short enough that intermediary proxies never see the connection as dead.
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Query parameters for GET /stream
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// The conversation id to subscribe to
    #[serde(rename = "chatId", default)]
    pub chat_id: Option<String>,
}

/// Request body for PUT /stream
#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    /// The target conversation id
    #[serde(rename = "chatId", default)]
    pub chat_id: Option<String>,
    /// The serialized envelope, forwarded verbatim to subscribers
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement body for PUT /stream
#[derive(Debug, Serialize, Deserialize)]
pub struct PublishResponse {
    /// Always `true`: fan-out is best-effort and the ack is unconditional
    pub success: bool,
}

/// Handle a subscription request (GET /stream?chatId=<id>)
///
/// Registers a new subscriber for the conversation and returns a streaming
/// response that interleaves published envelopes with keep-alive frames
/// every 15 seconds. The first keep-alive is sent one full interval after
/// connect, so an immediately-published message is the first thing a fresh
/// subscriber sees.
///
/// # Errors
///
/// * `400 Bad Request` - If `chatId` is missing or empty. Nothing is
///   registered before validation passes.
pub async fn handle_stream_subscribe(
    State(registry): State<StreamRegistry>,
    Query(query): Query<StreamQuery>,
) -> Result<Response<Body>, BackendError> {
    let chat_id = match query.chat_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => {
            tracing::warn!("[Stream] Subscribe request missing chatId");
            return Err(BackendError::handler(
                StatusCode::BAD_REQUEST,
                "Missing chatId",
            ));
        }
    };

    tracing::info!("[Stream] Opening subscription for chat {}", chat_id);

    let subscription = registry.subscribe(chat_id);

    // First tick one full interval after connect, then every interval
    let keep_alive = IntervalStream::new(tokio::time::interval_at(
        tokio::time::Instant::now() + KEEP_ALIVE_INTERVAL,
        KEEP_ALIVE_INTERVAL,
    ))
    .map(|_| frames::keep_alive_frame());

    // Published frames and keep-alives share one stream so that dropping
    // the body tears both down together
    let body_stream = subscription
        .merge(keep_alive)
        .map(Ok::<Bytes, Infallible>);

    Response::builder()
        .status(StatusCode::OK)
        .header(axum::http::header::CONTENT_TYPE, "text/event-stream")
        .header(axum::http::header::CACHE_CONTROL, "no-cache")
        .header(axum::http::header::CONNECTION, "keep-alive")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!("[Stream] Failed to build subscription response: {:?}", e);
            BackendError::state("Failed to build subscription response")
        })
}

/// Handle a publish request (PUT /stream)
///
/// Validates that both `chatId` and `message` are present, fans the
/// envelope out to every current subscriber of the conversation, and
/// acknowledges. Fan-out is fire-and-forget: the ack does not wait for
/// subscriber-side confirmation, and a publish to a conversation with zero
/// subscribers still succeeds.
///
/// # Errors
///
/// * `400 Bad Request` - If `chatId` or `message` is missing or empty;
///   no fan-out is performed.
pub async fn handle_stream_publish(
    State(registry): State<StreamRegistry>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, BackendError> {
    let chat_id = request.chat_id.as_deref().unwrap_or("");
    let message = request.message.as_deref().unwrap_or("");

    if chat_id.is_empty() || message.is_empty() {
        tracing::warn!("[Stream] Publish request missing chatId or message");
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "Missing data",
        ));
    }

    let delivered = registry.publish(chat_id, message);
    tracing::debug!(
        "[Stream] Publish to chat {} delivered to {} subscribers",
        chat_id,
        delivered
    );

    Ok(Json(PublishResponse { success: true }))
}
