/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Routes
 *
 * ## Stream Routes (real-time relay)
 *
 * - `GET /stream?chatId=<id>` - open an SSE subscription for a conversation
 * - `PUT /stream` - publish an envelope to a conversation's subscribers
 *
 * ## Chat Routes (message history)
 *
 * - `GET /chat` - list a conversation's message history
 * - `POST /chat` - append a new message
 *
 * ## Fallback
 *
 * The fallback handler returns 404 for unknown routes.
 */
use axum::http::StatusCode;
use axum::Router;

use crate::backend::chat::handlers::{handle_list_messages, handle_send_message};
use crate::backend::server::state::AppState;
use crate::backend::stream::handlers::{handle_stream_publish, handle_stream_subscribe};

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the message store,
///   the stream registry, and optional services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route(
            "/stream",
            axum::routing::get(handle_stream_subscribe).put(handle_stream_publish),
        )
        .route(
            "/chat",
            axum::routing::get(handle_list_messages).post(handle_send_message),
        );

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router.with_state(app_state)
}
