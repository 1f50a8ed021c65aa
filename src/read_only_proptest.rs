#![cfg(test)]

// Property tests for the views kept inside the crate so they can reach the
// copy helpers directly.

use crate::contract::{Collection, List};
use crate::error::CollectionError;
use crate::object::ElementType;
use crate::read_only_list::ReadOnlyList;
use crate::read_only_map::ReadOnlyMap;
use crate::untyped_array::UntypedArray;
use parking_lot::RwLock;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    // Owner-side writes, applied through the lock.
    Push(i32),
    Set(usize, i32),
    RemoveAt(usize),
    // View-side reads and rejected writes.
    At(usize),
    IndexOf(i32),
    ViewInsert(usize, i32),
    ViewClear,
    Iterate,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        any::<i32>().prop_map(Op::Push),
        (0usize..16, any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
        (0usize..16).prop_map(Op::RemoveAt),
        (0usize..16).prop_map(Op::At),
        (-4i32..4).prop_map(Op::IndexOf),
        (0usize..16, any::<i32>()).prop_map(|(i, v)| Op::ViewInsert(i, v)),
        Just(Op::ViewClear),
        Just(Op::Iterate),
    ];
    proptest::collection::vec(op, 1..80)
}

// Property: a view over an owner-mutated list always agrees with a plain
// Vec model of what the owner wrote.
// - Reads (`at`, `index_of`, iteration, `count`) match the model after every op.
// - Writes through the view fail with UnsupportedOperation and change nothing.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_list_view_tracks_owner(ops in arb_ops()) {
        let backing = RwLock::new(Vec::<i32>::new());
        let mut model: Vec<i32> = Vec::new();
        let mut view = ReadOnlyList::new(&backing);

        for op in ops {
            match op {
                Op::Push(v) => {
                    backing.write().push(v);
                    model.push(v);
                }
                Op::Set(i, v) => {
                    if i < model.len() {
                        backing.write()[i] = v;
                        model[i] = v;
                    }
                }
                Op::RemoveAt(i) => {
                    if i < model.len() {
                        backing.write().remove(i);
                        model.remove(i);
                    }
                }
                Op::At(i) => {
                    let got = view.at(i).map(|g| *g);
                    match model.get(i) {
                        Some(&expected) => prop_assert_eq!(got, Ok(expected)),
                        None => prop_assert!(
                            matches!(got, Err(CollectionError::ArgumentOutOfRange { .. })),
                            "reads past the end must be out of range"
                        ),
                    }
                }
                Op::IndexOf(v) => {
                    prop_assert_eq!(view.index_of(&v), model.iter().position(|&x| x == v));
                }
                Op::ViewInsert(i, v) => {
                    prop_assert_eq!(
                        List::insert(&mut view, i, v),
                        Err(CollectionError::UnsupportedOperation("insert"))
                    );
                }
                Op::ViewClear => {
                    prop_assert_eq!(
                        view.clear(),
                        Err(CollectionError::UnsupportedOperation("clear"))
                    );
                }
                Op::Iterate => {
                    let seen: Vec<i32> = view.iter().map(|g| *g).collect();
                    prop_assert_eq!(&seen, &model);
                }
            }

            prop_assert_eq!(view.count(), model.len());
            prop_assert_eq!(&*backing.read(), &model);
        }
    }
}

// Property: for any map and any offset, an untyped copy into an object
// buffer succeeds exactly when the entries fit past the offset, and then
// writes every entry once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_map_copy_fits_or_fails_clean(
        entries in proptest::collection::hash_map("[a-z]{1,4}", any::<u16>(), 0..12),
        len in 0usize..16,
        offset in -2isize..18,
    ) {
        let backing: hashbrown::HashMap<String, u16> = entries.into_iter().collect();
        let view = ReadOnlyMap::new(&backing);
        let mut buf = UntypedArray::objects(ElementType::object(), len);

        let result = view.copy_to(Some(&mut buf), offset);
        let fits = offset >= 0 && (offset as usize) <= len && len - offset as usize >= view.count();
        prop_assert_eq!(result.is_ok(), fits);

        let written: Vec<(String, u16)> = (0..len)
            .filter_map(|i| buf.object(i))
            .filter_map(|o| o.downcast_ref::<(String, u16)>().cloned())
            .collect();
        if fits {
            prop_assert_eq!(written.len(), view.count());
            let keys: BTreeSet<_> = written.iter().map(|(k, _)| k.clone()).collect();
            let expected: BTreeSet<_> = view.keys().iter().cloned().collect();
            prop_assert_eq!(keys, expected);
            for (k, v) in &written {
                prop_assert_eq!(view.get(k), Ok(v));
            }
        } else {
            prop_assert!(written.is_empty(), "failed validation must not write");
        }
        prop_assert!(view.values().iter().all(|v| view.values().contains(v)));
        prop_assert_eq!(view.keys().count(), Collection::count(&view));
    }
}
