/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The message store (conversation history)
 * - The stream registry (live SSE subscribers per conversation)
 * - Optional services (database)
 *
 * Both stateful services are constructed once at startup and live for the
 * whole process; handlers receive them by injection rather than through
 * globals.
 *
 * # Thread Safety
 *
 * All state is designed to be thread-safe:
 * - `Arc<RwLock<MessageStore>>` for concurrent history access
 * - `StreamRegistry` guards its subscriber map internally
 * - `Option<PgPool>` for the optional database, itself a shared pool
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`. This follows
 * Axum's recommended pattern for state management.
 *
 * # Example
 *
 * ```rust,no_run
 * use chatstream::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let store = state.message_store.read().await;
 *     let _count = store.len();
 * }
 * ```
 */
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::chat::store::MessageStore;
use crate::backend::stream::registry::StreamRegistry;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared message history
    ///
    /// Wrapped in `Arc<RwLock<>>` to allow concurrent reads from the
    /// listing handler while the send handler takes exclusive writes.
    pub message_store: Arc<RwLock<MessageStore>>,

    /// Live subscriber registry for the real-time stream
    ///
    /// Pure in-memory process state with no backing store; a restart
    /// drops all open subscriptions and clients reconnect.
    pub stream_registry: StreamRegistry,

    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if the
    /// `DATABASE_URL` environment variable is not set). Handlers check
    /// for `None` before using the database.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Create a fresh state with no database
    pub fn new() -> Self {
        Self {
            message_store: Arc::new(RwLock::new(MessageStore::new())),
            stream_registry: StreamRegistry::new(),
            db_pool: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Allow handlers to extract the message store directly
impl FromRef<AppState> for Arc<RwLock<MessageStore>> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.message_store.clone()
    }
}

/// Allow handlers to extract the stream registry directly
impl FromRef<AppState> for StreamRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.stream_registry.clone()
    }
}

/// Allow handlers to extract the optional database pool directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
