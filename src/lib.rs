//! readonly-collections: live, read-only views over lists and maps owned by
//! someone else, usable both through typed APIs and through legacy untyped
//! (object-based) collection contracts.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: hand out an immutable window onto a collection without copying
//!   it, while still answering callers written against a pre-generics,
//!   type-erased collection protocol.
//! - Layers:
//!   - `ListSource` / `MapSource`: the narrow read contracts a backing store
//!     implements. Optional capabilities (own sync root, native untyped
//!     enumeration, faster `index_of`) are default methods.
//!   - `copy`: one routine that validates and fills an `UntypedArray`; all
//!     views share it so errors surface in the same order everywhere.
//!   - `ReadOnlyList`: forwards indexed reads to a `ListSource`.
//!   - `ReadOnlyMap`: forwards keyed reads to a `MapSource` and lazily
//!     builds its `KeyView` / `ValueView`.
//!
//! Constraints
//! - Views borrow their source (`&'a S`); they never outlive it and never
//!   own element data. `count()` is read from the source on every call.
//! - Live: an owner mutating through interior mutability (for example a
//!   `parking_lot::RwLock<Vec<T>>`) is seen by the next read.
//! - Every mutator on every view fails with
//!   `CollectionError::UnsupportedOperation` and leaves the source untouched.
//!
//! Concurrency
//! - Views are `Send + Sync` when the source is `Sync`. No lock is taken to
//!   forward a read, and nothing is atomic across two reads.
//! - `keys()`, `values()` and the private `SyncRoot` are initialized with a
//!   compare-and-set on a `OnceBox`: racing first callers may each build a
//!   candidate, exactly one is kept, and all callers see that one.
//! - A source that provides its own `SyncRoot` is handed out as is, so legacy
//!   callers locking through the view and through the source contend on the
//!   same lock.
//!
//! Untyped copies
//! - `copy_to` accepts only single-dimension, zero-based buffers. A value
//!   buffer must match the element type exactly; an object buffer takes boxed
//!   elements and checks each store against its declared `ElementType`.
//! - A store rejected midway stops the copy without undoing earlier slots.
//!
//! Notes and non-goals
//! - No insertion, removal, resizing, hashing or ordering logic lives here.
//! - Legacy keys of the wrong runtime type are "not found", never an error;
//!   a missing (`None`) legacy key is `NullArgument`.

mod contract;
pub mod copy;
mod error;
mod map_views;
mod object;
mod read_only_list;
mod read_only_map;
mod read_only_proptest;
pub mod source;
mod sync_root;
mod untyped_array;

// Public surface
pub use contract::{Collection, List, Map, ObjectCollection, ObjectList, ObjectMap};
pub use error::{CollectionError, Result, ShapeError};
pub use map_views::{KeyView, ValueView};
pub use object::{ElementType, Object, ObjectEntry};
pub use read_only_list::{Iter, ReadOnlyList};
pub use read_only_map::ReadOnlyMap;
pub use source::{ListSource, MapSource, ObjectEntries, Synchronized};
pub use sync_root::SyncRoot;
pub use untyped_array::UntypedArray;
