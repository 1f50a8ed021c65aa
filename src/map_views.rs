//! Key and value views of a [`ReadOnlyMap`](crate::ReadOnlyMap).
//!
//! Both read straight through to the backing map; neither copies it. They
//! have no positional access because map key/value sequences need not be
//! indexable.

use crate::contract::{Collection, ObjectCollection};
use crate::copy;
use crate::error::{CollectionError, Result};
use crate::object::Object;
use crate::source::MapSource;
use crate::sync_root::{LazySyncRoot, SyncRoot};
use crate::untyped_array::UntypedArray;
use core::any::Any;
use core::fmt;

/// Read-only view of a map's keys.
pub struct KeyView<'a, M: ?Sized> {
    map: &'a M,
    sync_root: LazySyncRoot,
}

impl<'a, M> KeyView<'a, M>
where
    M: MapSource + ?Sized,
{
    pub(crate) fn new(map: &'a M) -> Self {
        Self {
            map,
            sync_root: LazySyncRoot::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn contains(&self, key: &M::Key) -> bool {
        self.map.contains_key(key)
    }

    pub fn iter(&self) -> M::Keys<'a> {
        MapSource::keys(self.map)
    }

    pub fn copy_to_slice(&self, dest: &mut [M::Key], index: usize) -> Result<()>
    where
        M::Key: Clone,
    {
        copy::copy_into_slice(self.iter().cloned(), self.count(), dest, index)
    }

    pub fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()>
    where
        M::Key: Any + Clone + Send + Sync,
    {
        copy::copy_into(self.iter().cloned(), self.count(), array, index)
    }

    pub fn sync_root(&self) -> &SyncRoot {
        self.sync_root.resolve(self.map.sync_root())
    }

    pub fn is_read_only(&self) -> bool {
        true
    }
}

/// Read-only view of a map's values.
pub struct ValueView<'a, M: ?Sized> {
    map: &'a M,
    sync_root: LazySyncRoot,
}

impl<'a, M> ValueView<'a, M>
where
    M: MapSource + ?Sized,
{
    pub(crate) fn new(map: &'a M) -> Self {
        Self {
            map,
            sync_root: LazySyncRoot::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Linear scan; values carry no index.
    pub fn contains(&self, value: &M::Value) -> bool
    where
        M::Value: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> M::Values<'a> {
        MapSource::values(self.map)
    }

    pub fn copy_to_slice(&self, dest: &mut [M::Value], index: usize) -> Result<()>
    where
        M::Value: Clone,
    {
        copy::copy_into_slice(self.iter().cloned(), self.count(), dest, index)
    }

    pub fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()>
    where
        M::Value: Any + Clone + Send + Sync,
    {
        copy::copy_into(self.iter().cloned(), self.count(), array, index)
    }

    pub fn sync_root(&self) -> &SyncRoot {
        self.sync_root.resolve(self.map.sync_root())
    }

    pub fn is_read_only(&self) -> bool {
        true
    }
}

impl<'a, M: MapSource + ?Sized> fmt::Debug for KeyView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyView").field("count", &self.count()).finish()
    }
}

impl<'a, M: MapSource + ?Sized> fmt::Debug for ValueView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueView").field("count", &self.count()).finish()
    }
}

impl<'v, 'a, M: MapSource + ?Sized> IntoIterator for &'v KeyView<'a, M> {
    type Item = &'a M::Key;
    type IntoIter = M::Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'v, 'a, M: MapSource + ?Sized> IntoIterator for &'v ValueView<'a, M> {
    type Item = &'a M::Value;
    type IntoIter = M::Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, M: MapSource + ?Sized> Collection<M::Key> for KeyView<'a, M> {
    fn count(&self) -> usize {
        KeyView::count(self)
    }

    fn contains(&self, item: &M::Key) -> bool {
        KeyView::contains(self, item)
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn add(&mut self, _item: M::Key) -> Result<()> {
        Err(CollectionError::read_only("add"))
    }

    fn remove(&mut self, _item: &M::Key) -> Result<bool> {
        Err(CollectionError::read_only("remove"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::read_only("clear"))
    }
}

impl<'a, M> Collection<M::Value> for ValueView<'a, M>
where
    M: MapSource + ?Sized,
    M::Value: PartialEq,
{
    fn count(&self) -> usize {
        ValueView::count(self)
    }

    fn contains(&self, item: &M::Value) -> bool {
        ValueView::contains(self, item)
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn add(&mut self, _item: M::Value) -> Result<()> {
        Err(CollectionError::read_only("add"))
    }

    fn remove(&mut self, _item: &M::Value) -> Result<bool> {
        Err(CollectionError::read_only("remove"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::read_only("clear"))
    }
}

impl<'a, M> ObjectCollection for KeyView<'a, M>
where
    M: MapSource + ?Sized,
    M::Key: Any + Clone + Send + Sync,
{
    fn count(&self) -> usize {
        KeyView::count(self)
    }

    fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()> {
        KeyView::copy_to(self, array, index)
    }

    fn objects(&self) -> Box<dyn Iterator<Item = Object> + '_> {
        Box::new(self.iter().map(|k| Object::new(k.clone())))
    }

    fn sync_root(&self) -> &SyncRoot {
        KeyView::sync_root(self)
    }
}

impl<'a, M> ObjectCollection for ValueView<'a, M>
where
    M: MapSource + ?Sized,
    M::Value: Any + Clone + Send + Sync,
{
    fn count(&self) -> usize {
        ValueView::count(self)
    }

    fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()> {
        ValueView::copy_to(self, array, index)
    }

    fn objects(&self) -> Box<dyn Iterator<Item = Object> + '_> {
        Box::new(self.iter().map(|v| Object::new(v.clone())))
    }

    fn sync_root(&self) -> &SyncRoot {
        ValueView::sync_root(self)
    }
}
