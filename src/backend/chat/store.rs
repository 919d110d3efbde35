use crate::shared::{ChatMessage, ChatSender};

/// One message as held by the store
///
/// Direct messages carry `chat_to`, group messages carry `group_id`;
/// exactly one of the two is set (the send handler enforces this).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: String,
    pub chat_from: String,
    pub from_name: String,
    pub chat_to: Option<String>,
    pub group_id: Option<String>,
    pub message: String,
    pub attachment: Option<String>,
    pub created_at: String,
}

impl StoredMessage {
    /// Project into the wire-facing envelope shape
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            id: self.id.clone(),
            message: self.message.clone(),
            attachment: self.attachment.clone(),
            created_at: self.created_at.clone(),
            chat_from: ChatSender {
                id: self.chat_from.clone(),
                name: self.from_name.clone(),
            },
        }
    }
}

/// In-memory message history, ordered by insertion
///
/// Messages are appended in arrival order and `created_at` is assigned at
/// append time, so insertion order and timestamp order coincide.
#[derive(Clone, Debug, Default)]
pub struct MessageStore {
    messages: Vec<StoredMessage>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the history
    pub fn append(&mut self, message: StoredMessage) {
        self.messages.push(message);
    }

    /// List the direct conversation between two users
    ///
    /// Matches both directions of the pair, in creation order, so both
    /// participants see the identical history.
    pub fn list_direct(&self, user_id: &str, chat_with: &str) -> Vec<StoredMessage> {
        self.messages
            .iter()
            .filter(|m| match m.chat_to.as_deref() {
                Some(to) => {
                    (m.chat_from == user_id && to == chat_with)
                        || (m.chat_from == chat_with && to == user_id)
                }
                None => false,
            })
            .cloned()
            .collect()
    }

    /// List a group conversation's history in creation order
    pub fn list_group(&self, group_id: &str) -> Vec<StoredMessage> {
        self.messages
            .iter()
            .filter(|m| m.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect()
    }

    /// Total number of stored messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
