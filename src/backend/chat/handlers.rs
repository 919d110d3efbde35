/**
 * Chat HTTP Handlers
 *
 * This module contains the HTTP handlers for the message history API:
 *
 * - `POST /chat` - append a message to a direct or group conversation
 * - `GET /chat` - list a conversation's history
 *
 * These endpoints are the durable side of messaging. The real-time relay
 * (`PUT /stream`) is a separate call the client makes after persisting;
 * history listing is also the polling backstop that recovers anything the
 * relay missed.
 */
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::chat::db;
use crate::backend::chat::store::{MessageStore, StoredMessage};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::message::get_timestamp;
use crate::shared::{ChatMessage, SendMessageRequest};

/// Query parameters for GET /chat
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub chat_with: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
}

/// List a conversation's message history (GET /chat)
///
/// For a direct conversation, pass `userId` and `chatWith`; both directions
/// of the pair are returned in creation order. For a group conversation,
/// pass `userId` and `groupId`.
///
/// # Errors
///
/// * `400 Bad Request` - If `userId` is missing, or neither `chatWith` nor
///   `groupId` is given
pub async fn handle_list_messages(
    State(message_store): State<Arc<RwLock<MessageStore>>>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    let user_id = query
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            BackendError::handler(StatusCode::BAD_REQUEST, "User ID is required")
        })?;

    let store = message_store.read().await;

    let messages = if let Some(group_id) = query.group_id.as_deref().filter(|g| !g.is_empty()) {
        store.list_group(group_id)
    } else if let Some(chat_with) = query.chat_with.as_deref().filter(|c| !c.is_empty()) {
        store.list_direct(user_id, chat_with)
    } else {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "Either chatWith or groupId is required",
        ));
    };

    tracing::debug!(
        "[Chat] Listed {} messages for user {}",
        messages.len(),
        user_id
    );

    Ok(Json(
        messages.iter().map(StoredMessage::to_chat_message).collect(),
    ))
}

/// Append a new message (POST /chat)
///
/// Validates the request, stores the message in memory, and writes it
/// through to the database when one is configured. Responds 201 with the
/// stored message. Does not notify live subscribers - the client publishes
/// to `PUT /stream` as a separate call.
///
/// # Errors
///
/// * `400 Bad Request` - If `userId` or `message` is missing, or if not
///   exactly one of `chatWith`/`groupId` is given
pub async fn handle_send_message(
    State(app_state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), BackendError> {
    if request.user_id.is_empty() || request.message.is_empty() {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "userId, message, and either chatWith or groupId are required",
        ));
    }

    let chat_with = request.chat_with.as_deref().filter(|c| !c.is_empty());
    let group_id = request.group_id.as_deref().filter(|g| !g.is_empty());

    if chat_with.is_some() == group_id.is_some() {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "userId, message, and either chatWith or groupId are required",
        ));
    }

    let stored = StoredMessage {
        id: uuid::Uuid::new_v4().to_string(),
        chat_from: request.user_id.clone(),
        from_name: request.user_name.clone().unwrap_or_default(),
        chat_to: chat_with.map(str::to_string),
        group_id: group_id.map(str::to_string),
        message: request.message.clone(),
        attachment: request.attachment.clone(),
        created_at: get_timestamp(),
    };

    {
        let mut store = app_state.message_store.write().await;
        store.append(stored.clone());
    }

    // Write-through persistence; a failed write is logged, never fatal
    if let Some(pool) = &app_state.db_pool {
        if let Err(e) = db::append_message(pool, &stored).await {
            tracing::error!("[Chat] Failed to persist message {}: {:?}", stored.id, e);
        }
    }

    tracing::info!(
        "[Chat] Stored message {} from user {}",
        stored.id,
        stored.chat_from
    );

    Ok((StatusCode::CREATED, Json(stored.to_chat_message())))
}
