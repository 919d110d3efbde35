/**
 * Message Data Structures
 *
 * This module defines the message envelope types exchanged between the
 * server and its clients, and their serialization for the chat APIs.
 *
 * All wire-facing types serialize with camelCase field names to match the
 * JSON shape the web client produces and consumes.
 *
 * Note that the real-time relay (`backend::stream`) never parses these
 * types: a published envelope crosses the registry boundary as an opaque
 * string. `ChatMessage` exists for the message store endpoints and for
 * clients that construct envelopes before publishing them.
 */
use serde::{Deserialize, Serialize};

/// The sender of a chat message
///
/// Carries the sender's id together with a display name so that clients
/// can render a message without a separate user lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSender {
    /// The sender's user id
    pub id: String,
    /// The sender's display name
    pub name: String,
}

/// Represents a single chat message
///
/// This structure is used both on the server (for storage and history
/// responses) and on the client (for display in the UI). It is serialized
/// to/from JSON for communication over HTTP.
///
/// # Fields
/// * `id` - Server-assigned message id
/// * `message` - The message text content
/// * `attachment` - Optional attachment URL
/// * `created_at` - ISO 8601 formatted timestamp (RFC3339)
/// * `chat_from` - The sender's id and display name
///
/// # Example
/// ```rust
/// use chatstream::shared::{ChatMessage, ChatSender};
///
/// let message = ChatMessage::new(
///     "Hello, world!".to_string(),
///     ChatSender {
///         id: "u1".to_string(),
///         name: "Alice".to_string(),
///     },
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Server-assigned message id
    pub id: String,
    /// The message text content
    pub message: String,
    /// Optional attachment URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    /// ISO 8601 timestamp (RFC3339 format)
    pub created_at: String,
    /// The sender's id and display name
    pub chat_from: ChatSender,
}

impl ChatMessage {
    /// Create a new message with a fresh id and the current timestamp
    ///
    /// # Arguments
    /// * `message` - The message text
    /// * `chat_from` - The sender's id and display name
    ///
    /// # Returns
    /// A new `ChatMessage` with a random UUID id and the current UTC timestamp
    pub fn new(message: String, chat_from: ChatSender) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            message,
            attachment: None,
            created_at: get_timestamp(),
            chat_from,
        }
    }

    /// Attach a media URL to the message
    pub fn with_attachment(mut self, attachment: String) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Request body for sending a message (POST /chat)
///
/// Exactly one of `chat_with` (direct message recipient) or `group_id`
/// (group conversation) must be present. The handler validates this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// The sender's user id
    pub user_id: String,
    /// The sender's display name
    #[serde(default)]
    pub user_name: Option<String>,
    /// Recipient user id for a direct message
    #[serde(default)]
    pub chat_with: Option<String>,
    /// Group id for a group message
    #[serde(default)]
    pub group_id: Option<String>,
    /// The message text
    pub message: String,
    /// Optional attachment URL
    #[serde(default)]
    pub attachment: Option<String>,
}

/// Get the current timestamp in RFC3339 format
pub fn get_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> ChatSender {
        ChatSender {
            id: "u1".to_string(),
            name: "Alice".to_string(),
        }
    }

    #[test]
    fn test_new_message_has_id_and_timestamp() {
        let message = ChatMessage::new("Hello".to_string(), sender());
        assert!(!message.id.is_empty());
        assert!(!message.created_at.is_empty());
        assert!(message.attachment.is_none());
    }

    #[test]
    fn test_message_serializes_camel_case() {
        let message = ChatMessage::new("Hello".to_string(), sender());
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"chatFrom\""));
        // Absent attachment is omitted entirely
        assert!(!json.contains("\"attachment\""));
    }

    #[test]
    fn test_message_roundtrip() {
        let message = ChatMessage::new("Hello".to_string(), sender())
            .with_attachment("https://example.com/a.png".to_string());
        let json = serde_json::to_string(&message).unwrap();
        let deserialized: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(message, deserialized);
    }

    #[test]
    fn test_send_request_optional_fields_default() {
        let json = r#"{"userId":"u1","message":"hi"}"#;
        let request: SendMessageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user_id, "u1");
        assert!(request.chat_with.is_none());
        assert!(request.group_id.is_none());
        assert!(request.attachment.is_none());
    }
}
