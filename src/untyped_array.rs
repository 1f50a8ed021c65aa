//! UntypedArray: a fixed-length buffer whose element type is only known at
//! runtime.
//!
//! A buffer is one of two kinds:
//! - a *value* buffer holds `Option<T>` slots for one concrete `T`; it only
//!   accepts `T` and is filled by direct typed copies;
//! - an *object* buffer holds `Option<Object>` slots declared with an
//!   [`ElementType`]; every store is checked against that declaration at
//!   runtime, like a covariant reference array.
//!
//! Buffers may be built with several dimensions or with a non-zero lower
//! bound so callers can describe any legacy array; the copy routines in this
//! crate only accept single-dimension, zero-based buffers.

use crate::error::{CollectionError, Result};
use crate::object::{ElementType, Object};
use core::any::Any;
use core::fmt;

enum Slots {
    // Always a `Vec<Option<T>>` where `T` is the buffer's element type.
    Values(Box<dyn Any + Send + Sync>),
    Objects(Vec<Option<Object>>),
}

pub struct UntypedArray {
    element: ElementType,
    lengths: Vec<usize>,
    lower_bounds: Vec<isize>,
    slots: Slots,
}

impl UntypedArray {
    /// A single-dimension value buffer of `len` empty `T` slots.
    pub fn values<T: Any + Send + Sync>(len: usize) -> Self {
        Self::values_with_shape::<T>(&[len])
    }

    pub fn values_with_shape<T: Any + Send + Sync>(lengths: &[usize]) -> Self {
        let total = lengths.iter().product();
        let slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
        Self {
            element: ElementType::of::<T>(),
            lengths: lengths.to_vec(),
            lower_bounds: vec![0; lengths.len()],
            slots: Slots::Values(Box::new(slots)),
        }
    }

    /// A single-dimension object buffer whose slots accept `element`.
    pub fn objects(element: ElementType, len: usize) -> Self {
        Self::objects_with_shape(element, &[len])
    }

    pub fn objects_with_shape(element: ElementType, lengths: &[usize]) -> Self {
        let total = lengths.iter().product();
        Self {
            element,
            lengths: lengths.to_vec(),
            lower_bounds: vec![0; lengths.len()],
            slots: Slots::Objects(vec![None; total]),
        }
    }

    /// Rebase the first dimension so it starts at `lower_bound`.
    pub fn with_lower_bound(mut self, lower_bound: isize) -> Self {
        if let Some(first) = self.lower_bounds.first_mut() {
            *first = lower_bound;
        }
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.element
    }

    pub fn rank(&self) -> usize {
        self.lengths.len()
    }

    /// Total number of slots across all dimensions.
    pub fn len(&self) -> usize {
        self.lengths.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lower_bound(&self, dimension: usize) -> Option<isize> {
        self.lower_bounds.get(dimension).copied()
    }

    /// True for buffers of reference slots, which accept boxed elements.
    pub fn is_object_array(&self) -> bool {
        matches!(self.slots, Slots::Objects(_))
    }

    /// Typed view of a value buffer of exactly `T`.
    pub fn value_slots<T: Any>(&self) -> Option<&[Option<T>]> {
        match &self.slots {
            Slots::Values(v) => v.downcast_ref::<Vec<Option<T>>>().map(Vec::as_slice),
            Slots::Objects(_) => None,
        }
    }

    pub fn value_slots_mut<T: Any>(&mut self) -> Option<&mut [Option<T>]> {
        match &mut self.slots {
            Slots::Values(v) => v
                .downcast_mut::<Vec<Option<T>>>()
                .map(Vec::as_mut_slice),
            Slots::Objects(_) => None,
        }
    }

    pub fn object(&self, index: usize) -> Option<&Object> {
        match &self.slots {
            Slots::Objects(slots) => slots.get(index).and_then(Option::as_ref),
            Slots::Values(_) => None,
        }
    }

    /// Store a boxed value, checking its runtime type against the buffer's
    /// declared element type.
    pub fn store(&mut self, index: usize, value: Object) -> Result<()> {
        let declared = self.element;
        let slots = match &mut self.slots {
            Slots::Objects(slots) => slots,
            Slots::Values(_) => return Err(mismatch(value.element_type(), declared)),
        };
        if !declared.is_assignable_from(value.element_type()) {
            return Err(mismatch(value.element_type(), declared));
        }
        let slot = slots
            .get_mut(index)
            .ok_or_else(|| CollectionError::index_out_of_range(index))?;
        *slot = Some(value);
        Ok(())
    }
}

fn mismatch(element: ElementType, array: ElementType) -> CollectionError {
    CollectionError::InvalidElementType {
        element: element.name(),
        array: array.name(),
    }
}

impl fmt::Debug for UntypedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UntypedArray")
            .field("element", &self.element)
            .field("lengths", &self.lengths)
            .field("lower_bounds", &self.lower_bounds)
            .field("objects", &self.is_object_array())
            .finish()
    }
}
