//! Conversation Id Derivation
//!
//! A conversation id is the key under which live subscribers and message
//! history are grouped. Both participants of a direct chat must derive the
//! same id regardless of who opened the conversation, so the id is built
//! from the sorted participant ids. Group conversations simply use the
//! group's own id.

/// Delimiter between the two participant ids of a direct conversation.
const DIRECT_ID_DELIMITER: char = '-';

/// Derive the conversation id for a direct (1:1) chat
///
/// The two participant ids are sorted lexicographically and joined, so the
/// derivation is symmetric: `direct_chat_id(a, b) == direct_chat_id(b, a)`.
///
/// Participant ids must not contain the `-` delimiter; in practice they are
/// UUIDs, which cannot produce ambiguous joins.
///
/// # Example
/// ```rust
/// use chatstream::shared::conversation::direct_chat_id;
///
/// assert_eq!(direct_chat_id("u2", "u1"), "u1-u2");
/// assert_eq!(direct_chat_id("u1", "u2"), "u1-u2");
/// ```
pub fn direct_chat_id(user_a: &str, user_b: &str) -> String {
    let (first, second) = if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    };
    format!("{}{}{}", first, DIRECT_ID_DELIMITER, second)
}

/// Derive the conversation id for a group chat
///
/// Group conversations are keyed by the group id itself.
pub fn group_chat_id(group_id: &str) -> String {
    group_id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_id_is_symmetric() {
        assert_eq!(direct_chat_id("u1", "u2"), direct_chat_id("u2", "u1"));
    }

    #[test]
    fn test_direct_id_sorts_lexicographically() {
        assert_eq!(direct_chat_id("bob", "alice"), "alice-bob");
    }

    #[test]
    fn test_direct_id_matches_expected_format() {
        assert_eq!(direct_chat_id("u1", "u2"), "u1-u2");
    }

    #[test]
    fn test_group_id_passes_through() {
        assert_eq!(group_chat_id("g42"), "g42");
    }

    #[test]
    fn test_same_participant_twice() {
        // Degenerate but deterministic
        assert_eq!(direct_chat_id("u1", "u1"), "u1-u1");
    }
}
