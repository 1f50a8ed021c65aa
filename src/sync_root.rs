//! Synchronization handles for legacy callers that lock on the collection.

use core::fmt;
use once_cell::race::OnceBox;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// An opaque handle legacy callers lock on to serialize access to a
/// collection. Clones share the same lock; identity is the allocation.
#[derive(Clone, Default)]
pub struct SyncRoot(Arc<Mutex<()>>);

impl SyncRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.0.lock()
    }

    pub fn try_lock(&self) -> Option<MutexGuard<'_, ()>> {
        self.0.try_lock()
    }

    pub fn ptr_eq(a: &SyncRoot, b: &SyncRoot) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for SyncRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyncRoot({:p})", Arc::as_ptr(&self.0))
    }
}

/// A view's sync root slot: the backing store's handle when it has one,
/// otherwise a private handle allocated once by compare-and-set.
pub(crate) struct LazySyncRoot(OnceBox<SyncRoot>);

impl LazySyncRoot {
    pub(crate) const fn new() -> Self {
        Self(OnceBox::new())
    }

    pub(crate) fn resolve<'s>(&'s self, backing: Option<&'s SyncRoot>) -> &'s SyncRoot {
        if let Some(root) = backing {
            return root;
        }
        self.0.get_or_init(|| {
            tracing::trace!("allocated private sync root");
            Box::new(SyncRoot::new())
        })
    }
}
