//! Type-erased values and the element-type descriptors used to check them.
//!
//! Legacy consumers see every element as an [`Object`]: a shared, boxed value
//! that remembers the [`ElementType`] it was created from. `ElementType` is the
//! crate's only notion of runtime typing. Two descriptors are compatible when
//! they name the same Rust type, or when the target is the `Object` root, which
//! accepts anything.

use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

/// Runtime descriptor for an element type.
#[derive(Clone, Copy)]
pub struct ElementType {
    id: TypeId,
    name: &'static str,
}

impl ElementType {
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// The root type: every element can be stored as an `Object`.
    pub fn object() -> Self {
        Self::of::<Object>()
    }

    pub fn is_object(&self) -> bool {
        self.id == TypeId::of::<Object>()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True when a value of type `other` may be stored where `self` is expected.
    pub fn is_assignable_from(&self, other: ElementType) -> bool {
        *self == other || self.is_object()
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ElementType {}

impl Hash for ElementType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A boxed value of any `Send + Sync` type. Cloning shares the allocation.
#[derive(Clone)]
pub struct Object {
    ty: ElementType,
    value: Arc<dyn Any + Send + Sync>,
}

impl Object {
    /// Box `value`. An `Object` passed in is returned unchanged instead of
    /// being nested inside another box.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        let boxed: Box<dyn Any + Send + Sync> = Box::new(value);
        match boxed.downcast::<Object>() {
            Ok(object) => *object,
            Err(boxed) => Object {
                ty: ElementType::of::<T>(),
                value: Arc::from(boxed),
            },
        }
    }

    /// The runtime type of the boxed value.
    pub fn element_type(&self) -> ElementType {
        self.ty
    }

    pub fn is<T: Any>(&self) -> bool {
        self.ty == ElementType::of::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Identity comparison: both objects share one allocation.
    pub fn ptr_eq(a: &Object, b: &Object) -> bool {
        Arc::ptr_eq(&a.value, &b.value)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Object").field(&self.ty).finish()
    }
}

/// An untyped key/value record, as produced by legacy map enumeration.
#[derive(Clone, Debug)]
pub struct ObjectEntry {
    pub key: Object,
    pub value: Object,
}

impl ObjectEntry {
    pub fn new(key: Object, value: Object) -> Self {
        Self { key, value }
    }

    pub(crate) fn boxing<K, V>(key: &K, value: &V) -> Self
    where
        K: Any + Clone + Send + Sync,
        V: Any + Clone + Send + Sync,
    {
        Self::new(Object::new(key.clone()), Object::new(value.clone()))
    }
}
