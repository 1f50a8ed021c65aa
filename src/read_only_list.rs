//! ReadOnlyList: a live, read-only view over a borrowed sequence.

use crate::contract::{Collection, List, ObjectCollection, ObjectList};
use crate::copy;
use crate::error::{CollectionError, Result};
use crate::object::Object;
use crate::source::ListSource;
use crate::sync_root::{LazySyncRoot, SyncRoot};
use crate::untyped_array::UntypedArray;
use core::any::Any;
use core::fmt;

/// Read-only view over a [`ListSource`] the view does not own.
///
/// Every read is forwarded to the source at the moment it is made, so the
/// view reflects whatever the owner has written since. Nothing about the
/// elements is cached; only the legacy [`SyncRoot`] is allocated lazily.
pub struct ReadOnlyList<'a, S: ?Sized> {
    source: &'a S,
    sync_root: LazySyncRoot,
}

impl<'a, S> ReadOnlyList<'a, S>
where
    S: ListSource + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            sync_root: LazySyncRoot::new(),
        }
    }

    /// The wrapped backing store.
    pub fn source(&self) -> &'a S {
        self.source
    }

    pub fn count(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn get(&self, index: usize) -> Option<S::Ref<'a>> {
        ListSource::get(self.source, index)
    }

    /// Like [`get`](Self::get), but an index past the end is an error.
    pub fn at(&self, index: usize) -> Result<S::Ref<'a>> {
        self.get(index)
            .ok_or_else(|| CollectionError::index_out_of_range(index))
    }

    pub fn contains(&self, value: &S::Item) -> bool
    where
        S::Item: PartialEq,
    {
        self.index_of(value).is_some()
    }

    pub fn index_of(&self, value: &S::Item) -> Option<usize>
    where
        S::Item: PartialEq,
    {
        self.source.index_of(value)
    }

    /// Iterate from the front. Each step reads the source afresh.
    pub fn iter(&self) -> Iter<'a, S> {
        Iter {
            source: self.source,
            next: 0,
        }
    }

    /// Clone every element into `dest[index..]`.
    pub fn copy_to_slice(&self, dest: &mut [S::Item], index: usize) -> Result<()>
    where
        S::Item: Clone,
    {
        copy::copy_into_slice(
            self.iter().map(|item| (*item).clone()),
            self.count(),
            dest,
            index,
        )
    }

    /// Copy every element into an untyped buffer.
    pub fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()>
    where
        S::Item: Any + Clone + Send + Sync,
    {
        copy::copy_into(
            self.iter().map(|item| (*item).clone()),
            self.count(),
            array,
            index,
        )
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

impl<'a, S> fmt::Debug for ReadOnlyList<'a, S>
where
    S: ListSource + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOnlyList")
            .field("count", &self.count())
            .finish()
    }
}

/// Forward iterator over a [`ReadOnlyList`].
pub struct Iter<'a, S: ?Sized> {
    source: &'a S,
    next: usize,
}

impl<'a, S> Iterator for Iter<'a, S>
where
    S: ListSource + ?Sized,
{
    type Item = S::Ref<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = ListSource::get(self.source, self.next)?;
        self.next += 1;
        Some(item)
    }
}

impl<'a, S: ?Sized> Clone for Iter<'a, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            next: self.next,
        }
    }
}

impl<'v, 'a, S> IntoIterator for &'v ReadOnlyList<'a, S>
where
    S: ListSource + ?Sized,
{
    type Item = S::Ref<'a>;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S> Collection<S::Item> for ReadOnlyList<'a, S>
where
    S: ListSource + ?Sized,
    S::Item: PartialEq,
{
    fn count(&self) -> usize {
        ReadOnlyList::count(self)
    }

    fn contains(&self, item: &S::Item) -> bool {
        ReadOnlyList::contains(self, item)
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn add(&mut self, _item: S::Item) -> Result<()> {
        Err(CollectionError::read_only("add"))
    }

    fn remove(&mut self, _item: &S::Item) -> Result<bool> {
        Err(CollectionError::read_only("remove"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::read_only("clear"))
    }
}

impl<'a, S> List<S::Item> for ReadOnlyList<'a, S>
where
    S: ListSource + ?Sized,
    S::Item: PartialEq,
{
    fn index_of(&self, item: &S::Item) -> Option<usize> {
        ReadOnlyList::index_of(self, item)
    }

    fn insert(&mut self, _index: usize, _item: S::Item) -> Result<()> {
        Err(CollectionError::read_only("insert"))
    }

    fn remove_at(&mut self, _index: usize) -> Result<()> {
        Err(CollectionError::read_only("remove_at"))
    }

    fn set(&mut self, _index: usize, _item: S::Item) -> Result<()> {
        Err(CollectionError::read_only("set"))
    }
}

impl<'a, S> ObjectCollection for ReadOnlyList<'a, S>
where
    S: ListSource + ?Sized,
    S::Item: Any + Clone + Send + Sync,
{
    fn count(&self) -> usize {
        ReadOnlyList::count(self)
    }

    fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()> {
        ReadOnlyList::copy_to(self, array, index)
    }

    fn objects(&self) -> Box<dyn Iterator<Item = Object> + '_> {
        Box::new(self.iter().map(|item| Object::new((*item).clone())))
    }

    fn sync_root(&self) -> &SyncRoot {
        ReadOnlyList::sync_root(self)
    }
}

impl<'a, S> ObjectList for ReadOnlyList<'a, S>
where
    S: ListSource + ?Sized,
    S::Item: Any + Clone + PartialEq + Send + Sync,
{
    fn get_object(&self, index: usize) -> Result<Object> {
        self.at(index).map(|item| Object::new((*item).clone()))
    }

    fn contains_object(&self, value: Option<&Object>) -> bool {
        ObjectList::index_of_object(self, value).is_some()
    }

    fn index_of_object(&self, value: Option<&Object>) -> Option<usize> {
        // Objects of another type are never equal to an element.
        let value = value?.downcast_ref::<S::Item>()?;
        self.index_of(value)
    }

    fn is_fixed_size(&self) -> bool {
        true
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn set_object(&mut self, _index: usize, _value: Option<Object>) -> Result<()> {
        Err(CollectionError::read_only("set"))
    }

    fn add_object(&mut self, _value: Option<Object>) -> Result<usize> {
        Err(CollectionError::read_only("add"))
    }

    fn insert_object(&mut self, _index: usize, _value: Option<Object>) -> Result<()> {
        Err(CollectionError::read_only("insert"))
    }

    fn remove_object(&mut self, _value: Option<&Object>) -> Result<()> {
        Err(CollectionError::read_only("remove"))
    }

    fn remove_object_at(&mut self, _index: usize) -> Result<()> {
        Err(CollectionError::read_only("remove_at"))
    }

    fn clear_objects(&mut self) -> Result<()> {
        Err(CollectionError::read_only("clear"))
    }
}
