use std::collections::HashSet;

use emojiscript_core::{RawEmoji, build_index, compact_emoji};
use proptest::prelude::*;

fn raw(name: String, short_names: Vec<String>, sort_order: i64) -> RawEmoji {
    RawEmoji {
        name: Some(name),
        unified: "1F600".to_string(),
        category: "Smileys & Emotion".to_string(),
        sort_order,
        short_names,
        skin_variations: None,
    }
}

// ---------------------------------------------------------------------------
// Compacted names never repeat, even across case and underscores
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn compact_names_are_unique(
        name in "[A-Za-z_ ]{1,12}",
        short_names in prop::collection::vec("[A-Za-z_]{1,8}", 1..6)
    ) {
        let compact = compact_emoji(&raw(name, short_names, 0)).unwrap();
        let distinct: HashSet<&String> = compact.names.iter().collect();
        prop_assert_eq!(distinct.len(), compact.names.len());
        prop_assert!(!compact.names.is_empty());
    }

    #[test]
    fn compact_names_are_lowercase(
        name in "[A-Z ]{1,12}",
        short_names in prop::collection::vec("[A-Z_]{1,8}", 1..4)
    ) {
        let compact = compact_emoji(&raw(name, short_names, 0)).unwrap();
        for entry in &compact.names {
            prop_assert_eq!(entry, &entry.to_lowercase());
            prop_assert!(!entry.contains('_'));
        }
    }
}

// ---------------------------------------------------------------------------
// Transform output is deterministic and sorted
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn index_is_sorted_and_idempotent(orders in prop::collection::vec(0i64..20, 1..30)) {
        let records: Vec<RawEmoji> = orders
            .iter()
            .enumerate()
            .map(|(i, order)| raw(format!("EMOJI {i}"), vec![format!("e{i}")], *order))
            .collect();

        let first = serde_json::to_string(&build_index(&records)).unwrap();
        let second = serde_json::to_string(&build_index(&records)).unwrap();
        prop_assert_eq!(&first, &second);

        let index = build_index(&records);
        let emojis = index.get("Smileys & Emotion").unwrap();
        let mut expected: Vec<(i64, usize)> = orders.iter().copied().zip(0..).collect();
        expected.sort_by_key(|(order, _)| *order);
        let expected_names: Vec<String> = expected.iter().map(|(_, i)| format!("emoji {i}")).collect();
        let actual_names: Vec<String> = emojis.iter().map(|e| e.primary_name().to_string()).collect();
        prop_assert_eq!(actual_names, expected_names);
    }
}
