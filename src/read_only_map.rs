//! ReadOnlyMap: a live, read-only view over a borrowed key-to-value mapping.

use crate::contract::{Collection, Map, ObjectCollection, ObjectMap};
use crate::copy;
use crate::error::{CollectionError, Result};
use crate::map_views::{KeyView, ValueView};
use crate::object::{ElementType, Object, ObjectEntry};
use crate::source::{MapSource, ObjectEntries};
use crate::sync_root::{LazySyncRoot, SyncRoot};
use crate::untyped_array::UntypedArray;
use core::any::Any;
use core::fmt;
use once_cell::race::OnceBox;

/// Read-only view over a [`MapSource`] the view does not own.
///
/// Lookups and iteration go straight to the source. The [`KeyView`] and
/// [`ValueView`] returned by [`keys`](Self::keys) and [`values`](Self::values)
/// are built on first use and then reused for the life of the view; racing
/// first callers agree on a single instance.
pub struct ReadOnlyMap<'a, M: ?Sized> {
    source: &'a M,
    keys: OnceBox<KeyView<'a, M>>,
    values: OnceBox<ValueView<'a, M>>,
    sync_root: LazySyncRoot,
}

impl<'a, M> ReadOnlyMap<'a, M>
where
    M: MapSource + ?Sized,
{
    pub fn new(source: &'a M) -> Self {
        Self {
            source,
            keys: OnceBox::new(),
            values: OnceBox::new(),
            sync_root: LazySyncRoot::new(),
        }
    }

    /// The wrapped backing map.
    pub fn source(&self) -> &'a M {
        self.source
    }

    pub fn count(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.source.contains_key(key)
    }

    /// The value for `key`, or `None` when absent.
    pub fn try_get(&self, key: &M::Key) -> Option<&'a M::Value> {
        MapSource::get(self.source, key)
    }

    pub fn get(&self, key: &M::Key) -> Result<&'a M::Value> {
        self.try_get(key).ok_or(CollectionError::KeyNotFound)
    }

    /// Entries in the backing map's own order.
    pub fn iter(&self) -> M::Iter<'a> {
        MapSource::iter(self.source)
    }

    pub fn keys(&self) -> &KeyView<'a, M> {
        self.keys.get_or_init(|| {
            tracing::trace!(count = self.count(), "materialized key view");
            Box::new(KeyView::new(self.source))
        })
    }

    pub fn values(&self) -> &ValueView<'a, M> {
        self.values.get_or_init(|| {
            tracing::trace!(count = self.count(), "materialized value view");
            Box::new(ValueView::new(self.source))
        })
    }

    /// True when `key` is present and maps to `value`.
    pub fn contains_entry(&self, key: &M::Key, value: &M::Value) -> bool
    where
        M::Value: PartialEq,
    {
        self.try_get(key).is_some_and(|v| v == value)
    }

    pub fn copy_to_slice(&self, dest: &mut [(M::Key, M::Value)], index: usize) -> Result<()>
    where
        M::Key: Clone,
        M::Value: Clone,
    {
        copy::copy_into_slice(
            self.iter().map(|(k, v)| (k.clone(), v.clone())),
            self.count(),
            dest,
            index,
        )
    }

    /// Copy every entry into an untyped buffer.
    ///
    /// Accepted buffers, in order of preference: a value buffer of
    /// `(K, V)`, a value buffer of [`ObjectEntry`], or an object buffer whose
    /// slots accept boxed `(K, V)` pairs. A slot that rejects its pair stops
    /// the copy; earlier slots keep what was written.
    pub fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()>
    where
        M::Key: Any + Clone + Send + Sync,
        M::Value: Any + Clone + Send + Sync,
    {
        let array = copy::check_shape(array)?;
        if usize::try_from(index).map_or(true, |i| i > array.len()) {
            return Err(CollectionError::ArgumentOutOfRange {
                name: "index",
                value: index,
            });
        }
        let count = self.count();
        let start = copy::check_room(array, index, count)?;
        let entries = self.iter().take(count);

        if let Some(slots) = array.value_slots_mut::<(M::Key, M::Value)>() {
            for (slot, (k, v)) in slots[start..].iter_mut().zip(entries) {
                *slot = Some((k.clone(), v.clone()));
            }
            return Ok(());
        }
        if let Some(slots) = array.value_slots_mut::<ObjectEntry>() {
            for (slot, (k, v)) in slots[start..].iter_mut().zip(entries) {
                *slot = Some(ObjectEntry::boxing(k, v));
            }
            return Ok(());
        }
        if !array.is_object_array() {
            return Err(copy::mismatch(
                ElementType::of::<(M::Key, M::Value)>(),
                array.element_type(),
            ));
        }
        copy::store_boxed(
            array,
            start,
            entries.map(|(k, v)| Object::new((k.clone(), v.clone()))),
        )
    }

    /// Untyped enumeration. Uses the source's own when it has one, otherwise
    /// boxes each entry while walking [`iter`](Self::iter).
    pub fn object_entries(&self) -> ObjectEntries<'a>
    where
        M::Key: Any + Clone + Send + Sync,
        M::Value: Any + Clone + Send + Sync,
    {
        if let Some(native) = MapSource::object_entries(self.source) {
            return native;
        }
        Box::new(self.iter().map(|(k, v)| ObjectEntry::boxing(k, v)))
    }

    pub fn sync_root(&self) -> &SyncRoot {
        self.sync_root.resolve(self.source.sync_root())
    }

    pub fn is_read_only(&self) -> bool {
        true
    }

    pub fn is_fixed_size(&self) -> bool {
        true
    }
}

impl<'a, M> fmt::Debug for ReadOnlyMap<'a, M>
where
    M: MapSource + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOnlyMap")
            .field("count", &self.count())
            .finish()
    }
}

impl<'v, 'a, M: MapSource + ?Sized> IntoIterator for &'v ReadOnlyMap<'a, M> {
    type Item = (&'a M::Key, &'a M::Value);
    type IntoIter = M::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, M> Collection<(M::Key, M::Value)> for ReadOnlyMap<'a, M>
where
    M: MapSource + ?Sized,
    M::Value: PartialEq,
{
    fn count(&self) -> usize {
        ReadOnlyMap::count(self)
    }

    fn contains(&self, item: &(M::Key, M::Value)) -> bool {
        self.contains_entry(&item.0, &item.1)
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn add(&mut self, _item: (M::Key, M::Value)) -> Result<()> {
        Err(CollectionError::read_only("add"))
    }

    fn remove(&mut self, _item: &(M::Key, M::Value)) -> Result<bool> {
        Err(CollectionError::read_only("remove"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::read_only("clear"))
    }
}

impl<'a, M> Map<M::Key, M::Value> for ReadOnlyMap<'a, M>
where
    M: MapSource + ?Sized,
    M::Value: PartialEq,
{
    fn contains_key(&self, key: &M::Key) -> bool {
        ReadOnlyMap::contains_key(self, key)
    }

    fn insert(&mut self, _key: M::Key, _value: M::Value) -> Result<()> {
        Err(CollectionError::read_only("insert"))
    }

    fn remove_key(&mut self, _key: &M::Key) -> Result<bool> {
        Err(CollectionError::read_only("remove"))
    }

    fn set(&mut self, _key: M::Key, _value: M::Value) -> Result<()> {
        Err(CollectionError::read_only("set"))
    }
}

impl<'a, M> ObjectCollection for ReadOnlyMap<'a, M>
where
    M: MapSource + ?Sized,
    M::Key: Any + Clone + Send + Sync,
    M::Value: Any + Clone + Send + Sync,
{
    fn count(&self) -> usize {
        ReadOnlyMap::count(self)
    }

    fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()> {
        ReadOnlyMap::copy_to(self, array, index)
    }

    fn objects(&self) -> Box<dyn Iterator<Item = Object> + '_> {
        Box::new(
            self.iter()
                .map(|(k, v)| Object::new((k.clone(), v.clone()))),
        )
    }

    fn sync_root(&self) -> &SyncRoot {
        ReadOnlyMap::sync_root(self)
    }
}

impl<'a, M> ObjectMap for ReadOnlyMap<'a, M>
where
    M: MapSource + ?Sized,
    M::Key: Any + Clone + Send + Sync,
    M::Value: Any + Clone + Send + Sync,
{
    fn get_object(&self, key: Option<&Object>) -> Result<Option<Object>> {
        let key = key.ok_or(CollectionError::NullArgument("key"))?;
        match key.downcast_ref::<M::Key>() {
            Some(key) => self.get(key).map(|v| Some(Object::new(v.clone()))),
            None => Ok(None),
        }
    }

    fn contains_object(&self, key: Option<&Object>) -> Result<bool> {
        let key = key.ok_or(CollectionError::NullArgument("key"))?;
        Ok(key
            .downcast_ref::<M::Key>()
            .is_some_and(|key| self.contains_key(key)))
    }

    fn object_entries(&self) -> ObjectEntries<'_> {
        ReadOnlyMap::object_entries(self)
    }

    fn object_keys(&self) -> &dyn ObjectCollection {
        self.keys()
    }

    fn object_values(&self) -> &dyn ObjectCollection {
        self.values()
    }

    fn is_fixed_size(&self) -> bool {
        true
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn set_object(&mut self, _key: Object, _value: Option<Object>) -> Result<()> {
        Err(CollectionError::read_only("set"))
    }

    fn add_object(&mut self, _key: Object, _value: Option<Object>) -> Result<()> {
        Err(CollectionError::read_only("add"))
    }

    fn remove_object(&mut self, _key: Option<&Object>) -> Result<()> {
        Err(CollectionError::read_only("remove"))
    }

    fn clear_objects(&mut self) -> Result<()> {
        Err(CollectionError::read_only("clear"))
    }
}
