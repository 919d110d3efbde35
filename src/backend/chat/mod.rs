//! Chat Backend Module
//!
//! This module contains the message history side of the application:
//! - Message store (direct and group conversation history)
//! - HTTP handlers for sending and listing messages
//! - Database operations for optional persistence
//!
//! The store is kept in memory and persisted to the database when one is
//! configured. Clients poll the history endpoint periodically as a
//! correctness backstop for the real-time stream.
//!
//! Persisting a message (`POST /chat`) and notifying live subscribers
//! (`PUT /stream`) are two independent calls made by the client; there is
//! no transactional linkage between them.

/// In-memory message store
pub mod store;

/// HTTP handlers for sending and listing messages
pub mod handlers;

/// Database operations for message persistence
pub mod db;

/// Re-export commonly used types
pub use store::{MessageStore, StoredMessage};
pub use handlers::{handle_list_messages, handle_send_message};
