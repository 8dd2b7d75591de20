use alloc::sync::{Arc, Weak};
use core::{fmt, ops::Deref};

/// Shared pointer used wherever the runtime hands out co-owned state.
///
/// Thin wrapper over [`Arc`] that keeps call sites independent of the concrete pointer type.
pub struct ArcShared<T: ?Sized>(Arc<T>);

impl<T> ArcShared<T> {
  /// Moves `value` into a new shared allocation.
  #[must_use]
  pub fn new(value: T) -> Self {
    Self(Arc::new(value))
  }
}

impl<T: ?Sized> ArcShared<T> {
  /// Wraps an existing [`Arc`], which is how unsized (`dyn`) values are shared.
  #[must_use]
  pub const fn from_arc(inner: Arc<T>) -> Self {
    Self(inner)
  }

  /// Runs `f` against the shared value.
  pub fn with_ref<R>(&self, f: impl FnOnce(&T) -> R) -> R {
    f(&self.0)
  }

  /// Returns `true` when both handles point at the same allocation.
  #[must_use]
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }

  /// Creates a non-owning handle to the same allocation.
  #[must_use]
  pub fn downgrade(&self) -> Weak<T> {
    Arc::downgrade(&self.0)
  }

  /// Number of strong handles currently alive.
  #[must_use]
  pub fn strong_count(&self) -> usize {
    Arc::strong_count(&self.0)
  }
}

impl<T: ?Sized> Clone for ArcShared<T> {
  fn clone(&self) -> Self {
    Self(Arc::clone(&self.0))
  }
}

impl<T: ?Sized> Deref for ArcShared<T> {
  type Target = T;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for ArcShared<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&*self.0, f)
  }
}

#[cfg(test)]
mod tests {
  use alloc::sync::Arc;

  use super::ArcShared;

  #[test]
  fn clones_share_the_same_allocation() {
    let shared = ArcShared::new(7_u32);
    let other = shared.clone();

    assert!(shared.ptr_eq(&other));
    assert_eq!(shared.strong_count(), 2);
    assert_eq!(other.with_ref(|value| *value + 1), 8);
  }

  #[test]
  fn from_arc_shares_unsized_values() {
    let inner: Arc<dyn Fn(u32) -> u32 + Send + Sync> = Arc::new(|value| value * 2);
    let shared = ArcShared::from_arc(inner);

    assert_eq!(shared(21), 42);
    assert!(shared.downgrade().upgrade().is_some());
  }
}
