//! Backend Module
//!
//! This module contains all server-side code for the chatstream
//! application: an Axum HTTP server whose core is the real-time message
//! relay, plus the message history API it backstops.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`stream`** - Subscriber registry and SSE relay (the core)
//! - **`chat`** - Message history store, handlers, and persistence
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs     - Module exports and documentation
//! ├── server/    - Server initialization and state
//! ├── routes/    - Route configuration
//! ├── stream/    - Subscriber registry and SSE handlers
//! ├── chat/      - Message store and handlers
//! └── error/     - Error types
//! ```
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) containing the message
//! store, the stream registry, and the optional database pool. State is
//! shared across request handlers using `Arc` and internal locking; no
//! module-level globals.
//!
//! # Error Handling
//!
//! Parameter-validation failures surface as 4xx responses via
//! `BackendError`; client disconnects are lifecycle events, not errors;
//! per-subscriber delivery failures are swallowed inside the registry.
//! Nothing in this module can take the process down.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Subscriber registry and SSE relay
pub mod stream;

/// Message history store and handlers
pub mod chat;

/// Backend error types
pub mod error;

// Re-export commonly used types
pub use server::create_app;
pub use stream::{StreamRegistry, Subscription};
pub use error::BackendError;
