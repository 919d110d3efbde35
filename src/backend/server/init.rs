/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server, including state creation, database loading, and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Create the message store and the stream registry
 * 2. Load optional services (database)
 * 3. Restore message history from the database if available
 * 4. Create and configure the router
 *
 * # State Restoration
 *
 * If a database is available, the server restores message history from
 * persisted rows. The subscriber registry is deliberately not restored:
 * it tracks open connections, which cannot outlive the process - clients
 * reconnect and rely on the history endpoint to recover missed messages.
 */
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::chat::db;
use crate::backend::chat::store::MessageStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::stream::registry::StreamRegistry;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: server continues without persistence
/// - Restoration failures: logged but don't prevent startup
pub async fn create_app() -> Router<()> {
    tracing::info!("[Server] Initializing chatstream backend");

    // Step 1: Create shared state. Both services live for the whole
    // process and are injected into handlers via AppState.
    let message_store = Arc::new(RwLock::new(MessageStore::new()));
    let stream_registry = StreamRegistry::new();

    // Step 2: Load optional services
    let db_pool = load_database().await;

    // Step 3: Restore message history if a database is available
    if let Some(pool) = &db_pool {
        restore_message_store(pool, &message_store).await;
    }

    // Step 4: Assemble state and router
    let app_state = AppState {
        message_store,
        stream_registry,
        db_pool,
    };

    tracing::info!("[Server] Router configured");

    create_router(app_state)
}

/// Restore the message store from the database
///
/// Loads persisted messages (oldest first) into the in-memory store so
/// history survives restarts. Errors are logged but don't prevent server
/// startup; on failure the server starts with empty history.
async fn restore_message_store(pool: &sqlx::PgPool, message_store: &Arc<RwLock<MessageStore>>) {
    tracing::info!("[Server] Loading message history from database...");

    match db::load_messages(pool).await {
        Ok(messages) => {
            tracing::info!("[Server] Loaded {} messages from database", messages.len());
            let mut store = message_store.write().await;
            for message in messages {
                store.append(message);
            }
        }
        Err(e) => {
            tracing::warn!(
                "[Server] Failed to load messages from database (tables may not exist yet): {:?}",
                e
            );
            tracing::warn!("[Server] Starting with empty message history");
        }
    }
}
