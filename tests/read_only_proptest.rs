use proptest::prelude::*;
use readonly_collections::{CollectionError, Map, Object, ObjectMap, ReadOnlyMap};
use std::collections::BTreeMap;

// Model an owner editing a map between reads and check the view never lags.
proptest! {
    #[test]
    fn prop_map_view_matches_owner(ops in proptest::collection::vec((0u8..=3u8, 0u8..16u8, any::<i64>()), 1..100)) {
        let mut owner: BTreeMap<u8, i64> = BTreeMap::new();

        for (op, k, v) in ops {
            match op {
                // Owner writes between views; a fresh view is built per step
                // because a plain BTreeMap cannot be mutated while borrowed.
                0 => { owner.insert(k, v); }
                1 => { owner.remove(&k); }
                // Typed read
                2 => {
                    let view = ReadOnlyMap::new(&owner);
                    match owner.get(&k) {
                        Some(expected) => prop_assert_eq!(view.get(&k), Ok(expected)),
                        None => prop_assert_eq!(view.get(&k), Err(CollectionError::KeyNotFound)),
                    }
                }
                // Legacy read, plus a rejected write
                3 => {
                    let mut view = ReadOnlyMap::new(&owner);
                    let boxed = Object::new(k);
                    prop_assert_eq!(view.contains_object(Some(&boxed)), Ok(owner.contains_key(&k)));
                    // A key of the wrong width is never found.
                    prop_assert_eq!(view.contains_object(Some(&Object::new(k as u16))), Ok(false));
                    prop_assert_eq!(
                        Map::insert(&mut view, k, v),
                        Err(CollectionError::UnsupportedOperation("insert"))
                    );
                }
                _ => unreachable!(),
            }

            // Invariants after each step
            let view = ReadOnlyMap::new(&owner);
            prop_assert_eq!(view.count(), owner.len());
            prop_assert_eq!(view.keys().count(), owner.len());
            let keys: Vec<u8> = view.keys().iter().copied().collect();
            let expected: Vec<u8> = owner.keys().copied().collect();
            prop_assert_eq!(keys, expected);
        }
    }
}
