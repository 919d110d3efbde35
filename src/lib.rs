//! Chatstream - Main Library
//!
//! Chatstream is the real-time backbone of a chat application: an Axum HTTP
//! server that relays chat messages to live subscribers over Server-Sent
//! Events, backed by a per-conversation subscriber registry.
//!
//! # Overview
//!
//! This library provides:
//! - A conversation subscriber registry for real-time message fan-out
//! - SSE streaming endpoints (`GET /stream`, `PUT /stream`)
//! - A message store with direct and group conversation history
//! - Optional PostgreSQL persistence for message history
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared between server and clients
//!   - Message envelope structures
//!   - Conversation id derivation
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with SSE streaming handlers
//!   - Subscriber registry and message store state
//!   - Route configuration and error conversion
//!   - Optional database persistence
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatstream::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Use app with an Axum server
//! # }
//! ```

/// Types shared between server and clients
pub mod shared;

/// Server-side code
pub mod backend;
