// marketplace/src/state.rs
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, interior-mutable store state using parking_lot::RwLock.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points. Store operations read what they
/// need, drop the guard, call the collaborator, then lock again to apply.
#[derive(Debug)]
pub struct StoreCell<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> StoreCell<T> {
  pub fn new(data: T) -> Self {
    StoreCell(Arc::new(RwLock::new(data)))
  }

  /// The returned guard MUST be dropped before any `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  /// The returned guard MUST be dropped before any `.await` point.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Borrows one part of the state under the read lock.
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&T) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Runs `f` under the write lock and returns its result.
  pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = self.write();
    f(&mut *guard)
  }
}

impl<T: Send + Sync + 'static> Clone for StoreCell<T> {
  fn clone(&self) -> Self {
    StoreCell(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for StoreCell<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
