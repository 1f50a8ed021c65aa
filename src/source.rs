//! Backing-store contracts consumed by the views, and their implementations
//! for common containers.
//!
//! A view only ever reads through these traits. Optional capabilities (a
//! faster `index_of`, a store-provided [`SyncRoot`], native untyped
//! enumeration) are default methods a store overrides to opt in.

use crate::object::ObjectEntry;
use crate::sync_root::SyncRoot;
use core::hash::{BuildHasher, Hash};
use core::ops::Deref;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::collections::{btree_map, hash_map, BTreeMap, HashMap, VecDeque};

/// Untyped enumeration over a map's entries.
pub type ObjectEntries<'a> = Box<dyn Iterator<Item = ObjectEntry> + 'a>;

/// An ordered, indexable backing sequence.
pub trait ListSource {
    type Item;

    /// Borrow of one element. Plain containers hand out `&Item`; lock-backed
    /// containers hand out a guard that keeps the lock shared while it lives.
    type Ref<'a>: Deref<Target = Self::Item>
    where
        Self: 'a;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<Self::Ref<'_>>;

    /// First position holding an element equal to `value`.
    fn index_of(&self, value: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        (0..self.len()).find(|&i| self.get(i).is_some_and(|item| *item == *value))
    }

    /// The store's own lock handle, if it has one.
    fn sync_root(&self) -> Option<&SyncRoot> {
        None
    }
}

/// A backing key-to-value mapping.
pub trait MapSource {
    type Key;
    type Value;
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;
    type Keys<'a>: Iterator<Item = &'a Self::Key>
    where
        Self: 'a;
    type Values<'a>: Iterator<Item = &'a Self::Value>
    where
        Self: 'a;

    fn len(&self) -> usize;

    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    fn iter(&self) -> Self::Iter<'_>;

    fn keys(&self) -> Self::Keys<'_>;

    fn values(&self) -> Self::Values<'_>;

    /// Native untyped enumeration, for stores that already speak the legacy
    /// protocol. Views synthesize one from `iter` when this returns `None`.
    fn object_entries(&self) -> Option<ObjectEntries<'_>> {
        None
    }

    fn sync_root(&self) -> Option<&SyncRoot> {
        None
    }
}

impl<T> ListSource for [T] {
    type Item = T;
    type Ref<'a>
        = &'a T
    where
        Self: 'a;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }

    fn index_of(&self, value: &T) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.iter().position(|item| item == value)
    }
}

impl<T> ListSource for Vec<T> {
    type Item = T;
    type Ref<'a>
        = &'a T
    where
        Self: 'a;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn index_of(&self, value: &T) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.iter().position(|item| item == value)
    }
}

impl<T> ListSource for VecDeque<T> {
    type Item = T;
    type Ref<'a>
        = &'a T
    where
        Self: 'a;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }

    fn index_of(&self, value: &T) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.iter().position(|item| item == value)
    }
}

/// A list its owner keeps mutating while views read it. Each read takes the
/// shared lock for as long as the returned guard lives.
///
/// Reads use `read_recursive` so a thread already holding an element guard
/// can keep reading while a writer is queued.
impl<T> ListSource for RwLock<Vec<T>> {
    type Item = T;
    type Ref<'a>
        = MappedRwLockReadGuard<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        self.read_recursive().len()
    }

    fn get(&self, index: usize) -> Option<Self::Ref<'_>> {
        RwLockReadGuard::try_map(self.read_recursive(), |items| items.get(index)).ok()
    }

    fn index_of(&self, value: &T) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.read_recursive().iter().position(|item| item == value)
    }
}

impl<K, V, S> MapSource for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = hash_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Keys<'a>
        = hash_map::Keys<'a, K, V>
    where
        Self: 'a;
    type Values<'a>
        = hash_map::Values<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }

    fn keys(&self) -> Self::Keys<'_> {
        HashMap::keys(self)
    }

    fn values(&self) -> Self::Values<'_> {
        HashMap::values(self)
    }
}

impl<K, V, S> MapSource for hashbrown::HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = hashbrown::hash_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Keys<'a>
        = hashbrown::hash_map::Keys<'a, K, V>
    where
        Self: 'a;
    type Values<'a>
        = hashbrown::hash_map::Values<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        hashbrown::HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        hashbrown::HashMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        hashbrown::HashMap::contains_key(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        hashbrown::HashMap::iter(self)
    }

    fn keys(&self) -> Self::Keys<'_> {
        hashbrown::HashMap::keys(self)
    }

    fn values(&self) -> Self::Values<'_> {
        hashbrown::HashMap::values(self)
    }
}

impl<K: Ord, V> MapSource for BTreeMap<K, V> {
    type Key = K;
    type Value = V;
    type Iter<'a>
        = btree_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Keys<'a>
        = btree_map::Keys<'a, K, V>
    where
        Self: 'a;
    type Values<'a>
        = btree_map::Values<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }

    fn keys(&self) -> Self::Keys<'_> {
        BTreeMap::keys(self)
    }

    fn values(&self) -> Self::Values<'_> {
        BTreeMap::values(self)
    }
}

/// Pairs a backing store with its own [`SyncRoot`], so views over it hand
/// legacy callers the store's handle instead of allocating their own.
#[derive(Debug, Default)]
pub struct Synchronized<S> {
    inner: S,
    root: SyncRoot,
}

impl<S> Synchronized<S> {
    pub fn new(inner: S) -> Self {
        Self::with_root(inner, SyncRoot::new())
    }

    pub fn with_root(inner: S, root: SyncRoot) -> Self {
        Self { inner, root }
    }

    pub fn root(&self) -> &SyncRoot {
        &self.root
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ListSource> ListSource for Synchronized<S> {
    type Item = S::Item;
    type Ref<'a>
        = S::Ref<'a>
    where
        Self: 'a;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Option<Self::Ref<'_>> {
        self.inner.get(index)
    }

    fn index_of(&self, value: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.inner.index_of(value)
    }

    fn sync_root(&self) -> Option<&SyncRoot> {
        Some(&self.root)
    }
}

impl<M: MapSource> MapSource for Synchronized<M> {
    type Key = M::Key;
    type Value = M::Value;
    type Iter<'a>
        = M::Iter<'a>
    where
        Self: 'a;
    type Keys<'a>
        = M::Keys<'a>
    where
        Self: 'a;
    type Values<'a>
        = M::Values<'a>
    where
        Self: 'a;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, key: &Self::Key) -> Option<&Self::Value> {
        self.inner.get(key)
    }

    fn contains_key(&self, key: &Self::Key) -> bool {
        self.inner.contains_key(key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.inner.iter()
    }

    fn keys(&self) -> Self::Keys<'_> {
        self.inner.keys()
    }

    fn values(&self) -> Self::Values<'_> {
        self.inner.values()
    }

    fn object_entries(&self) -> Option<ObjectEntries<'_>> {
        self.inner.object_entries()
    }

    fn sync_root(&self) -> Option<&SyncRoot> {
        Some(&self.root)
    }
}
