//! Error type shared by every view in the crate.

use thiserror::Error;

/// Why an untyped buffer's shape was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The buffer does not have exactly one dimension.
    #[error("buffers must have exactly one dimension, found rank {rank}")]
    NotSingleDimension { rank: usize },
    /// The buffer's single dimension does not start at index zero.
    #[error("buffers with a non-zero lower bound are not supported ({lower_bound})")]
    NonZeroLowerBound { lower_bound: isize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A required argument was absent.
    #[error("argument `{0}` must not be null")]
    NullArgument(&'static str),

    /// An index or offset fell outside the valid range.
    #[error("argument `{name}` is out of range: {value}")]
    ArgumentOutOfRange { name: &'static str, value: isize },

    /// A mutation was attempted through a read-only view.
    #[error("`{0}` is not supported on a read-only collection")]
    UnsupportedOperation(&'static str),

    #[error("invalid buffer shape: {0}")]
    InvalidArrayShape(#[from] ShapeError),

    /// The destination cannot hold every element past the requested offset.
    #[error("destination too small: {needed} elements needed, {available} available past the offset")]
    InsufficientCapacity { needed: usize, available: usize },

    /// The destination's element type cannot hold the copied elements.
    #[error("invalid array type: cannot store `{element}` in a buffer of `{array}`")]
    InvalidElementType {
        element: &'static str,
        array: &'static str,
    },

    #[error("the given key was not present in the map")]
    KeyNotFound,
}

impl CollectionError {
    /// Rejection for any mutator invoked through a view.
    pub(crate) fn read_only(op: &'static str) -> Self {
        tracing::debug!(op, "rejected mutation on read-only view");
        CollectionError::UnsupportedOperation(op)
    }

    /// Out-of-range error for an unsigned index. Indexes past `isize::MAX`
    /// saturate instead of wrapping negative.
    pub(crate) fn index_out_of_range(index: usize) -> Self {
        CollectionError::ArgumentOutOfRange {
            name: "index",
            value: isize::try_from(index).unwrap_or(isize::MAX),
        }
    }
}

/// A convenience `Result` alias using [`CollectionError`].
pub type Result<T> = std::result::Result<T, CollectionError>;
