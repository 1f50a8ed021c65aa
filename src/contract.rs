//! Collection contracts the views satisfy.
//!
//! Two families, implemented side by side on each view:
//! - typed contracts ([`Collection`], [`List`], [`Map`]) carry the full
//!   mutating surface of a generic collection;
//! - object contracts ([`ObjectCollection`], [`ObjectList`], [`ObjectMap`])
//!   serve legacy callers that only deal in [`Object`]s.
//!
//! On the read-only views every mutator returns
//! [`CollectionError::UnsupportedOperation`](crate::CollectionError) and leaves
//! the backing store untouched.

use crate::error::Result;
use crate::object::Object;
use crate::source::ObjectEntries;
use crate::sync_root::SyncRoot;
use crate::untyped_array::UntypedArray;

pub trait Collection<T> {
    fn count(&self) -> usize;
    fn contains(&self, item: &T) -> bool;
    fn is_read_only(&self) -> bool;

    fn add(&mut self, item: T) -> Result<()>;
    fn remove(&mut self, item: &T) -> Result<bool>;
    fn clear(&mut self) -> Result<()>;
}

pub trait List<T>: Collection<T> {
    fn index_of(&self, item: &T) -> Option<usize>;

    fn insert(&mut self, index: usize, item: T) -> Result<()>;
    fn remove_at(&mut self, index: usize) -> Result<()>;
    fn set(&mut self, index: usize, item: T) -> Result<()>;
}

pub trait Map<K, V>: Collection<(K, V)> {
    fn contains_key(&self, key: &K) -> bool;

    fn insert(&mut self, key: K, value: V) -> Result<()>;
    fn remove_key(&mut self, key: &K) -> Result<bool>;
    fn set(&mut self, key: K, value: V) -> Result<()>;
}

/// Untyped collection surface.
pub trait ObjectCollection {
    fn count(&self) -> usize;

    /// Copy every element into `array` starting at `index`.
    fn copy_to(&self, array: Option<&mut UntypedArray>, index: isize) -> Result<()>;

    /// Elements boxed as objects, in iteration order.
    fn objects(&self) -> Box<dyn Iterator<Item = Object> + '_>;

    fn sync_root(&self) -> &SyncRoot;

    /// Whether access is already serialized internally. Views never are.
    fn is_synchronized(&self) -> bool {
        false
    }
}

pub trait ObjectList: ObjectCollection {
    fn get_object(&self, index: usize) -> Result<Object>;
    fn contains_object(&self, value: Option<&Object>) -> bool;
    fn index_of_object(&self, value: Option<&Object>) -> Option<usize>;
    fn is_fixed_size(&self) -> bool;
    fn is_read_only(&self) -> bool;

    fn set_object(&mut self, index: usize, value: Option<Object>) -> Result<()>;
    fn add_object(&mut self, value: Option<Object>) -> Result<usize>;
    fn insert_object(&mut self, index: usize, value: Option<Object>) -> Result<()>;
    fn remove_object(&mut self, value: Option<&Object>) -> Result<()>;
    fn remove_object_at(&mut self, index: usize) -> Result<()>;
    fn clear_objects(&mut self) -> Result<()>;
}

pub trait ObjectMap: ObjectCollection {
    /// Look up a boxed key. `None` is rejected; a key of the wrong type is
    /// simply not found.
    fn get_object(&self, key: Option<&Object>) -> Result<Option<Object>>;
    fn contains_object(&self, key: Option<&Object>) -> Result<bool>;
    fn object_entries(&self) -> ObjectEntries<'_>;
    fn object_keys(&self) -> &dyn ObjectCollection;
    fn object_values(&self) -> &dyn ObjectCollection;
    fn is_fixed_size(&self) -> bool;
    fn is_read_only(&self) -> bool;

    fn set_object(&mut self, key: Object, value: Option<Object>) -> Result<()>;
    fn add_object(&mut self, key: Object, value: Option<Object>) -> Result<()>;
    fn remove_object(&mut self, key: Option<&Object>) -> Result<()>;
    fn clear_objects(&mut self) -> Result<()>;
}
