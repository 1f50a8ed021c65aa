//! Copying typed elements into an [`UntypedArray`].
//!
//! Every view funnels its untyped `copy_to` through here so validation runs
//! in one order everywhere: missing buffer, rank, lower bound, negative
//! offset, capacity, then element-type compatibility. A type mismatch found
//! while boxing element by element stops the copy; slots written before it
//! stay written.

use crate::error::{CollectionError, Result, ShapeError};
use crate::object::{ElementType, Object};
use crate::untyped_array::UntypedArray;
use core::any::Any;

/// Copy `count` elements from `items` into `array` starting at `offset`.
pub fn copy_into<T, I>(
    items: I,
    count: usize,
    array: Option<&mut UntypedArray>,
    offset: isize,
) -> Result<()>
where
    T: Any + Send + Sync,
    I: IntoIterator<Item = T>,
{
    let array = check_shape(array)?;
    let start = check_room(array, offset, count)?;
    let items = items.into_iter().take(count);

    if let Some(slots) = array.value_slots_mut::<T>() {
        for (slot, item) in slots[start..].iter_mut().zip(items) {
            *slot = Some(item);
        }
        return Ok(());
    }

    let source = ElementType::of::<T>();
    let target = array.element_type();
    if !(target.is_assignable_from(source) || source.is_assignable_from(target)) {
        return Err(mismatch(source, target));
    }
    // Value buffers only take their exact type; no widening.
    if !array.is_object_array() {
        return Err(mismatch(source, target));
    }
    store_boxed(array, start, items.map(Object::new))
}

/// Steps 1-3: the buffer must exist, have one dimension, and start at zero.
pub(crate) fn check_shape(array: Option<&mut UntypedArray>) -> Result<&mut UntypedArray> {
    let array = array.ok_or(CollectionError::NullArgument("array"))?;
    if array.rank() != 1 {
        return Err(CollectionError::InvalidArrayShape(
            ShapeError::NotSingleDimension { rank: array.rank() },
        ));
    }
    match array.lower_bound(0) {
        Some(0) => Ok(array),
        other => Err(CollectionError::InvalidArrayShape(
            ShapeError::NonZeroLowerBound {
                lower_bound: other.unwrap_or_default(),
            },
        )),
    }
}

/// Steps 4-5: the offset is non-negative and leaves room for `count` slots.
/// Returns the offset as a slot index.
pub(crate) fn check_room(array: &UntypedArray, offset: isize, count: usize) -> Result<usize> {
    let start = usize::try_from(offset).map_err(|_| CollectionError::ArgumentOutOfRange {
        name: "index",
        value: offset,
    })?;
    let available = array.len().saturating_sub(start);
    if start > array.len() || available < count {
        return Err(CollectionError::InsufficientCapacity {
            needed: count,
            available,
        });
    }
    Ok(start)
}

/// Store boxed items one by one, stopping at the first rejected slot.
pub(crate) fn store_boxed<I>(array: &mut UntypedArray, start: usize, items: I) -> Result<()>
where
    I: Iterator<Item = Object>,
{
    for (i, item) in items.enumerate() {
        if let Err(e) = array.store(start + i, item) {
            tracing::debug!(written = i, error = %e, "untyped copy aborted; earlier slots keep their values");
            return Err(e);
        }
    }
    Ok(())
}

/// Typed counterpart of [`copy_into`]: write `count` items into `dest[index..]`.
pub(crate) fn copy_into_slice<T, I>(items: I, count: usize, dest: &mut [T], index: usize) -> Result<()>
where
    I: IntoIterator<Item = T>,
{
    if index > dest.len() {
        return Err(CollectionError::index_out_of_range(index));
    }
    let available = dest.len() - index;
    if available < count {
        return Err(CollectionError::InsufficientCapacity {
            needed: count,
            available,
        });
    }
    for (slot, item) in dest[index..].iter_mut().zip(items.into_iter().take(count)) {
        *slot = item;
    }
    Ok(())
}

pub(crate) fn mismatch(element: ElementType, array: ElementType) -> CollectionError {
    CollectionError::InvalidElementType {
        element: element.name(),
        array: array.name(),
    }
}
