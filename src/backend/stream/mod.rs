//! Real-Time Stream Module
//!
//! This module implements the real-time message relay: a per-conversation
//! subscriber registry fanned out over Server-Sent Events.
//!
//! # Architecture
//!
//! The stream module is organized into focused submodules:
//!
//! - **`registry`** - The conversation subscriber registry (live connections)
//! - **`frames`** - SSE frame encoding (data and keep-alive frames)
//! - **`handlers`** - HTTP handlers for `GET /stream` and `PUT /stream`
//!
//! # Module Structure
//!
//! ```text
//! stream/
//! ├── mod.rs       - Module exports and documentation
//! ├── registry.rs  - Subscriber registry and fan-out
//! ├── frames.rs    - SSE frame encoding
//! └── handlers.rs  - Subscribe and publish handlers
//! ```
//!
//! # Delivery Model
//!
//! Delivery is best-effort and non-durable. The registry is pure in-memory
//! process state: a restart drops every open subscription and clients are
//! expected to reconnect and recover missed messages through the message
//! history endpoint, which they poll as a backstop.

/// Subscriber registry and fan-out
pub mod registry;

/// SSE frame encoding
pub mod frames;

/// Subscribe and publish handlers
pub mod handlers;

// Re-export commonly used types
pub use registry::{StreamRegistry, Subscription};
pub use handlers::{handle_stream_subscribe, handle_stream_publish};
