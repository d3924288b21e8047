//! Property tests for RecordStore
//!
//! Each property is checked against a plain `Vec<i32>` model.

use proptest::prelude::*;
use seqdb_core::Record;
use seqdb_storage::RecordStore;

fn small_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0i32..8, 0..64)
}

proptest! {
    #[test]
    fn add_grows_length_by_input_length(initial in small_values(), added in small_values()) {
        let store = RecordStore::from_values(initial.clone());
        store.add(&added).unwrap();
        prop_assert_eq!(store.len(), initial.len() + added.len());

        let mut expected = initial;
        expected.extend_from_slice(&added);
        prop_assert_eq!(store.snapshot(), expected);
    }

    #[test]
    fn search_returns_exactly_matching_indices(values in small_values(), query in 0i32..8) {
        let store = RecordStore::from_values(values.clone());
        let found = store.search(query);

        let expected: Vec<Record> = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == query)
            .map(|(i, &v)| Record::new(i as i32, v))
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn search_is_idempotent(values in small_values(), query in 0i32..8) {
        let store = RecordStore::from_values(values);
        prop_assert_eq!(store.search(query), store.search(query));
    }

    #[test]
    fn added_value_is_found_at_appended_index(values in small_values(), v in any::<i32>()) {
        let store = RecordStore::from_values(values.clone());
        store.add(&[v]).unwrap();
        let found = store.search(v);
        prop_assert!(found.contains(&Record::new(values.len() as i32, v)));
    }

    #[test]
    fn update_boundary(values in prop::collection::vec(any::<i32>(), 1..32), v in any::<i32>()) {
        let store = RecordStore::from_values(values.clone());
        let len = values.len() as i32;

        prop_assert!(store.update(&[Record::new(len, v)]).is_err());
        prop_assert_eq!(store.snapshot(), values);

        prop_assert!(store.update(&[Record::new(len - 1, v)]).is_ok());
        prop_assert_eq!(store.snapshot()[(len - 1) as usize], v);
    }

    #[test]
    fn delete_matches_descending_removal(
        values in prop::collection::vec(any::<i32>(), 1..48),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..16),
    ) {
        let indexes: Vec<i32> = picks.iter().map(|p| p.index(values.len()) as i32).collect();
        let store = RecordStore::from_values(values.clone());
        store.delete(&indexes).unwrap();

        let mut model = values;
        let mut positions: Vec<usize> = indexes.iter().map(|&i| i as usize).collect();
        positions.sort_unstable_by(|a, b| b.cmp(a));
        positions.dedup();
        for position in positions {
            model.remove(position);
        }
        prop_assert_eq!(store.snapshot(), model);
    }

    #[test]
    fn rejected_delete_changes_nothing(
        values in small_values(),
        valid in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
        overshoot in 0i32..10,
    ) {
        let store = RecordStore::from_values(values.clone());
        let mut indexes: Vec<i32> = if values.is_empty() {
            Vec::new()
        } else {
            valid.iter().map(|p| p.index(values.len()) as i32).collect()
        };
        indexes.push(values.len() as i32 + overshoot);

        prop_assert!(store.delete(&indexes).is_err());
        prop_assert_eq!(store.snapshot(), values);
    }
}
