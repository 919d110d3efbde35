/**
 * Chat Database Operations
 *
 * This module persists message history to PostgreSQL when a database is
 * configured. The in-memory store remains the source of truth at runtime;
 * the database exists so history survives a restart.
 *
 * # Operations
 *
 * - `append_message` - write-through insert of one stored message
 * - `load_messages` - load the full history at startup, oldest first
 *
 * Timestamps are stored as RFC3339 strings, matching the in-memory
 * representation and the wire format.
 */
use sqlx::{PgPool, Row};

use crate::backend::chat::store::StoredMessage;

/// Insert one message into the chats table
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `message` - The message to persist
pub async fn append_message(pool: &PgPool, message: &StoredMessage) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO chats (id, chat_from, from_name, chat_to, group_id, message, attachment, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(&message.id)
    .bind(&message.chat_from)
    .bind(&message.from_name)
    .bind(&message.chat_to)
    .bind(&message.group_id)
    .bind(&message.message)
    .bind(&message.attachment)
    .bind(&message.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all persisted messages, oldest first
///
/// Used once at startup to rebuild the in-memory store.
pub async fn load_messages(pool: &PgPool) -> Result<Vec<StoredMessage>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, chat_from, from_name, chat_to, group_id, message, attachment, created_at
        FROM chats
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let messages = rows
        .into_iter()
        .map(|row| StoredMessage {
            id: row.get("id"),
            chat_from: row.get("chat_from"),
            from_name: row.get("from_name"),
            chat_to: row.get("chat_to"),
            group_id: row.get("group_id"),
            message: row.get("message"),
            attachment: row.get("attachment"),
            created_at: row.get("created_at"),
        })
        .collect();

    Ok(messages)
}
