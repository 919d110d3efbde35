//! Property-based tests for conversation id derivation
//!
//! Uses proptest to generate random participant ids and verify the
//! derivation invariants.

use proptest::prelude::*;
use chatstream::shared::conversation::{direct_chat_id, group_chat_id};

proptest! {
    #[test]
    fn test_direct_id_is_symmetric(
        a in "[a-z0-9]{1,32}",
        b in "[a-z0-9]{1,32}",
    ) {
        prop_assert_eq!(direct_chat_id(&a, &b), direct_chat_id(&b, &a));
    }

    #[test]
    fn test_direct_id_is_deterministic(
        a in "[a-z0-9]{1,32}",
        b in "[a-z0-9]{1,32}",
    ) {
        prop_assert_eq!(direct_chat_id(&a, &b), direct_chat_id(&a, &b));
    }

    #[test]
    fn test_direct_id_contains_both_participants(
        a in "[a-z0-9]{1,32}",
        b in "[a-z0-9]{1,32}",
    ) {
        let id = direct_chat_id(&a, &b);
        prop_assert!(id.contains(&a));
        prop_assert!(id.contains(&b));
    }

    #[test]
    fn test_group_id_passes_through(g in "[a-z0-9-]{1,32}") {
        prop_assert_eq!(group_chat_id(&g), g);
    }
}
