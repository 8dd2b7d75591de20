use alloc::vec::Vec;

use maildrop_utils_core_rs::sync::ArcShared;
use portable_atomic::{AtomicUsize, Ordering};

use super::DeadLetter;

/// Callback receiving every published dead letter.
pub type DeadLetterListener<M> = dyn Fn(&DeadLetter<M>) + Send + Sync + 'static;

/// Fans dead letters out to subscribers.
///
/// Letters published while nobody listens are only counted.
pub struct DeadLetterHub<M> {
  listeners: Vec<ArcShared<DeadLetterListener<M>>>,
  published: AtomicUsize,
}

impl<M> DeadLetterHub<M> {
  /// Creates a hub without subscribers.
  #[must_use]
  pub const fn new() -> Self {
    Self { listeners: Vec::new(), published: AtomicUsize::new(0) }
  }

  /// Adds `listener`; it sees letters published from now on.
  pub fn subscribe(&mut self, listener: ArcShared<DeadLetterListener<M>>) {
    self.listeners.push(listener);
  }

  /// Hands `dead_letter` to every listener and returns how many were reached.
  pub fn publish(&self, dead_letter: &DeadLetter<M>) -> usize {
    let listeners = self.announce();
    listeners.iter().for_each(|listener| listener(dead_letter));
    listeners.len()
  }

  /// Counts one published letter and returns the listeners that should see it.
  ///
  /// The returned list is detached from the hub, so it can be invoked after a lock guarding
  /// the hub has been released.
  pub fn announce(&self) -> Vec<ArcShared<DeadLetterListener<M>>> {
    self.published.fetch_add(1, Ordering::Relaxed);
    self.listeners.clone()
  }

  /// Number of subscribers.
  #[must_use]
  pub fn listener_count(&self) -> usize {
    self.listeners.len()
  }

  /// Total letters published so far, listened to or not.
  #[must_use]
  pub fn published(&self) -> usize {
    self.published.load(Ordering::Relaxed)
  }
}

impl<M> Default for DeadLetterHub<M> {
  fn default() -> Self {
    Self::new()
  }
}
