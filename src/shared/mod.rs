//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types are used for serialization and
//! communication over the HTTP and SSE APIs.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All types are designed for serialization
//! and transmission over HTTP.

/// Message envelope data structures
pub mod message;

/// Conversation id derivation
pub mod conversation;

/// Re-export commonly used types for convenience
pub use message::{ChatMessage, ChatSender, SendMessageRequest};
pub use conversation::{direct_chat_id, group_chat_id};
