use portable_atomic::{AtomicBool, Ordering};

/// Atomic boolean used for one-way state transitions such as "closed" or "cleaned up".
#[derive(Debug, Default)]
pub struct Flag {
  inner: AtomicBool,
}

impl Flag {
  /// Creates a flag with the given initial value.
  #[must_use]
  pub const fn new(value: bool) -> Self {
    Self { inner: AtomicBool::new(value) }
  }

  /// Current value.
  #[must_use]
  pub fn get(&self) -> bool {
    self.inner.load(Ordering::SeqCst)
  }

  /// Stores `value` unconditionally.
  pub fn set(&self, value: bool) {
    self.inner.store(value, Ordering::SeqCst);
  }

  /// Raises the flag and reports whether this call performed the transition.
  ///
  /// Exactly one of any number of concurrent callers observes `true`.
  #[must_use]
  pub fn raise(&self) -> bool {
    !self.inner.swap(true, Ordering::SeqCst)
  }
}

#[cfg(test)]
mod tests {
  use super::Flag;

  #[test]
  fn raise_reports_the_first_transition_only() {
    let flag = Flag::default();

    assert!(!flag.get());
    assert!(flag.raise());
    assert!(!flag.raise());
    assert!(flag.get());

    flag.set(false);
    assert!(flag.raise());
  }
}
