// ReadOnlyMap integration suite.
//
// Invariants exercised:
// - Lookups, membership and iteration forward to the backing map.
// - keys() / values() are built once per view and reused.
// - Untyped copies accept (K, V) buffers, ObjectEntry buffers and object
//   buffers; a slot that rejects its entry stops the copy without undoing
//   earlier slots.
// - Untyped enumeration prefers the store's own when it has one.
use readonly_collections::{
    Collection, CollectionError, ElementType, Map, MapSource, Object, ObjectCollection,
    ObjectEntries, ObjectEntry, ObjectMap, ReadOnlyMap, ShapeError, SyncRoot, Synchronized,
    UntypedArray,
};
use std::collections::{btree_map, BTreeMap, HashMap};

fn ab() -> BTreeMap<String, i32> {
    [("a".to_string(), 1), ("b".to_string(), 2)]
        .into_iter()
        .collect()
}

fn key(s: &str) -> String {
    s.to_string()
}

// A store that already speaks the legacy protocol and tags what it emits.
struct Tagged(BTreeMap<String, i32>);

impl MapSource for Tagged {
    type Key = String;
    type Value = i32;
    type Iter<'a>
        = btree_map::Iter<'a, String, i32>
    where
        Self: 'a;
    type Keys<'a>
        = btree_map::Keys<'a, String, i32>
    where
        Self: 'a;
    type Values<'a>
        = btree_map::Values<'a, String, i32>
    where
        Self: 'a;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, key: &String) -> Option<&i32> {
        self.0.get(key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn keys(&self) -> Self::Keys<'_> {
        self.0.keys()
    }

    fn values(&self) -> Self::Values<'_> {
        self.0.values()
    }

    fn object_entries(&self) -> Option<ObjectEntries<'_>> {
        Some(Box::new(self.0.iter().map(|(k, v)| {
            ObjectEntry::new(Object::new(format!("native:{k}")), Object::new(*v))
        })))
    }
}

// Test: lookups on {"a": 1, "b": 2}.
// Verifies: get / try_get / contains_key / contains_entry and KeyNotFound.
#[test]
fn lookups_forward_to_backing_map() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);

    assert_eq!(view.get(&key("a")), Ok(&1));
    assert_eq!(view.get(&key("z")), Err(CollectionError::KeyNotFound));
    assert_eq!(view.try_get(&key("b")), Some(&2));
    assert!(view.contains_key(&key("b")));
    assert!(!view.contains_key(&key("c")));
    assert!(Collection::contains(&view, &(key("a"), 1)));
    assert!(!Collection::contains(&view, &(key("a"), 2)));

    let entries: Vec<(&String, &i32)> = view.iter().collect();
    assert_eq!(entries, vec![(&key("a"), &1), (&key("b"), &2)]);
}

// Test: key and value views.
// Verifies: cached per view; counts match; contents track the backing map.
#[test]
fn key_and_value_views_are_cached() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);

    let keys = view.keys();
    assert!(std::ptr::eq(keys, view.keys()));
    assert!(std::ptr::eq(view.values(), view.values()));

    assert_eq!(keys.count(), 2);
    assert!(keys.contains(&key("a")));
    assert!(view.values().contains(&2));
    assert!(!view.values().contains(&3));

    let ks: Vec<&String> = keys.iter().collect();
    let vs: Vec<i32> = view.values().iter().copied().collect();
    assert_eq!(ks, vec!["a", "b"]);
    assert_eq!(vs, vec![1, 2]);

    // A second view over the same map builds its own.
    let other = ReadOnlyMap::new(&backing);
    assert!(!std::ptr::eq(keys, other.keys()));
}

// Test: mutators on the map and its derived views.
// Verifies: every one fails and the backing map is unchanged.
#[test]
fn mutators_are_rejected_everywhere() {
    let backing = ab();
    let mut view = ReadOnlyMap::new(&backing);

    assert_eq!(
        Map::insert(&mut view, key("c"), 3),
        Err(CollectionError::UnsupportedOperation("insert"))
    );
    assert!(Map::set(&mut view, key("a"), 9).is_err());
    assert!(view.remove_key(&key("a")).is_err());
    assert!(view.add((key("c"), 3)).is_err());
    assert!(view.clear().is_err());
    assert!(view.clear_objects().is_err());
    assert!(view
        .add_object(Object::new(key("c")), Some(Object::new(3)))
        .is_err());
    assert!(view.remove_object(Some(&Object::new(key("a")))).is_err());
    assert!(view.set_object(Object::new(key("a")), None).is_err());

    assert!(view.keys().is_read_only());
    assert!(view.values().is_read_only());

    assert!(view.is_read_only());
    assert!(view.is_fixed_size());
    assert_eq!(backing, ab());
}

// Test: legacy lookups.
// Verifies: None key is NullArgument; a foreign-typed key is simply absent;
// a well-typed missing key is KeyNotFound.
#[test]
fn legacy_lookups() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);
    let legacy: &dyn ObjectMap = &view;

    assert_eq!(legacy.contains_object(None), Err(CollectionError::NullArgument("key")));
    assert_eq!(legacy.get_object(None).unwrap_err(), CollectionError::NullArgument("key"));
    assert_eq!(legacy.contains_object(Some(&Object::new(42i32))), Ok(false));
    assert!(legacy.get_object(Some(&Object::new(42i32))).unwrap().is_none());
    assert_eq!(
        legacy.get_object(Some(&Object::new(key("z")))).unwrap_err(),
        CollectionError::KeyNotFound
    );

    let one = legacy.get_object(Some(&Object::new(key("a")))).unwrap().unwrap();
    assert_eq!(one.downcast_ref::<i32>(), Some(&1));
}

// Test: legacy enumeration without a native enumerator.
// Verifies: entries are boxed from iter(), in order; restarting by calling
// again yields the same sequence.
#[test]
fn synthesized_object_entries() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);

    let read = |entries: ObjectEntries<'_>| -> Vec<(String, i32)> {
        entries
            .map(|e| {
                (
                    e.key.downcast_ref::<String>().cloned().unwrap(),
                    *e.value.downcast_ref::<i32>().unwrap(),
                )
            })
            .collect()
    };
    let first = read(view.object_entries());
    let again = read(view.object_entries());
    assert_eq!(first, vec![(key("a"), 1), (key("b"), 2)]);
    assert_eq!(first, again);
}

// Test: legacy enumeration with a native enumerator.
// Assumes: Tagged::object_entries prefixes keys with "native:".
// Verifies: the view hands out the store's enumeration unchanged.
#[test]
fn native_object_entries_are_preferred() {
    let backing = Tagged(ab());
    let view = ReadOnlyMap::new(&backing);
    let keys: Vec<String> = ObjectMap::object_entries(&view)
        .filter_map(|e| e.key.downcast_ref::<String>().cloned())
        .collect();
    assert_eq!(keys, vec!["native:a", "native:b"]);

    // Typed reads still go through the ordinary accessors.
    assert_eq!(view.get(&key("a")), Ok(&1));
}

// Test: copy into a value buffer of pairs.
#[test]
fn copy_into_pair_buffer() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);
    let mut buf = UntypedArray::values::<(String, i32)>(3);
    view.copy_to(Some(&mut buf), 1).unwrap();
    assert_eq!(
        buf.value_slots::<(String, i32)>().unwrap(),
        &[None, Some((key("a"), 1)), Some((key("b"), 2))]
    );
}

// Test: copy into a value buffer of ObjectEntry.
#[test]
fn copy_into_entry_buffer() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);
    let mut buf = UntypedArray::values::<ObjectEntry>(2);
    view.copy_to(Some(&mut buf), 0).unwrap();
    let slots = buf.value_slots::<ObjectEntry>().unwrap();
    let second = slots[1].as_ref().unwrap();
    assert_eq!(second.key.downcast_ref::<String>().map(String::as_str), Some("b"));
    assert_eq!(second.value.downcast_ref::<i32>(), Some(&2));
}

// Test: copy into object buffers.
// Verifies: a root-typed buffer takes boxed pairs; a buffer declared for a
// different type rejects the first entry and writes nothing past it.
#[test]
fn copy_into_object_buffers() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);

    let mut any = UntypedArray::objects(ElementType::object(), 2);
    view.copy_to(Some(&mut any), 0).unwrap();
    let first = any.object(0).unwrap();
    assert!(first.is::<(String, i32)>());
    assert_eq!(first.downcast_ref::<(String, i32)>(), Some(&(key("a"), 1)));

    let mut strings = UntypedArray::objects(ElementType::of::<String>(), 2);
    let err = view.copy_to(Some(&mut strings), 0).unwrap_err();
    assert!(matches!(err, CollectionError::InvalidElementType { .. }));
    assert!(strings.object(0).is_none());
    assert!(strings.object(1).is_none());

    let mut numbers = UntypedArray::values::<u64>(2);
    assert!(matches!(
        view.copy_to(Some(&mut numbers), 0),
        Err(CollectionError::InvalidElementType { .. })
    ));
}

// Test: copy validation order on maps.
#[test]
fn copy_validation_order() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);

    assert_eq!(view.copy_to(None, -1), Err(CollectionError::NullArgument("array")));

    let mut grid = UntypedArray::objects_with_shape(ElementType::object(), &[2, 2]);
    assert_eq!(
        view.copy_to(Some(&mut grid), -1),
        Err(CollectionError::InvalidArrayShape(ShapeError::NotSingleDimension { rank: 2 }))
    );

    let mut buf = UntypedArray::objects(ElementType::object(), 3);
    assert!(matches!(
        view.copy_to(Some(&mut buf), -1),
        Err(CollectionError::ArgumentOutOfRange { value: -1, .. })
    ));
    assert_eq!(
        view.copy_to(Some(&mut buf), 2),
        Err(CollectionError::InsufficientCapacity {
            needed: 2,
            available: 1
        })
    );
    assert!((0..3).all(|i| buf.object(i).is_none()));
}

// Test: typed slice copy of entries.
#[test]
fn copy_to_slice_clones_entries() {
    let backing = ab();
    let view = ReadOnlyMap::new(&backing);
    let mut dest = vec![(String::new(), 0); 2];
    view.copy_to_slice(&mut dest, 0).unwrap();
    assert_eq!(dest, vec![(key("a"), 1), (key("b"), 2)]);

    let mut keys = vec![String::new(); 3];
    view.keys().copy_to_slice(&mut keys, 1).unwrap();
    assert_eq!(keys, vec!["", "a", "b"]);
}

// Test: legacy key / value collections.
#[test]
fn object_keys_and_values() {
    let backing: HashMap<u8, char> = [(1, 'x')].into_iter().collect();
    let view = ReadOnlyMap::new(&backing);

    let keys = view.object_keys();
    assert_eq!(keys.count(), 1);
    assert!(!keys.is_synchronized());
    let boxed: Vec<u8> = keys
        .objects()
        .filter_map(|o| o.downcast_ref::<u8>().copied())
        .collect();
    assert_eq!(boxed, vec![1]);

    let mut buf = UntypedArray::values::<char>(1);
    view.object_values().copy_to(Some(&mut buf), 0).unwrap();
    assert_eq!(buf.value_slots::<char>().unwrap(), &[Some('x')]);
}

// Test: sync roots of a map view and its derived views.
// Verifies: a Synchronized map's root is shared by the view, its keys and
// its values; a plain map gets one private root per view.
#[test]
fn sync_roots() {
    let shared = Synchronized::new(ab());
    let view = ReadOnlyMap::new(&shared);
    assert!(SyncRoot::ptr_eq(view.sync_root(), shared.root()));
    assert!(SyncRoot::ptr_eq(view.keys().sync_root(), shared.root()));
    assert!(SyncRoot::ptr_eq(view.values().sync_root(), shared.root()));

    let plain = ab();
    let view = ReadOnlyMap::new(&plain);
    assert!(SyncRoot::ptr_eq(view.sync_root(), view.sync_root()));
    assert!(!SyncRoot::ptr_eq(view.sync_root(), view.keys().sync_root()));
}
