//! Closable multi-producer queue built on [`SegQueue`].

use alloc::vec::Vec;

use crossbeam_queue::SegQueue;
use portable_atomic::{AtomicBool, AtomicUsize, Ordering};

use super::QueueError;

#[cfg(test)]
mod tests;

/// Lock-free multi-producer queue with an atomic close gate.
///
/// Producers never take a lock: an offer registers itself in an in-flight counter, checks the
/// closed flag and pushes. [`close`](Self::close) raises the flag and then waits for the
/// in-flight counter to drain, so once it returns no element can slip in behind the drain.
/// Consumption is meant for a single logical consumer; the queue itself stays safe if more
/// than one thread polls.
#[derive(Debug)]
pub struct GatedMpscQueue<T> {
  queue:     SegQueue<T>,
  closed:    AtomicBool,
  in_flight: AtomicUsize,
}

impl<T> GatedMpscQueue<T> {
  /// Creates an open, empty queue.
  #[must_use]
  pub const fn new() -> Self {
    Self { queue: SegQueue::new(), closed: AtomicBool::new(false), in_flight: AtomicUsize::new(0) }
  }

  /// Pushes `item` unless the queue has been closed.
  ///
  /// # Errors
  /// Returns [`QueueError::Closed`] carrying `item` back when the queue is closed.
  pub fn offer(&self, item: T) -> Result<(), QueueError<T>> {
    // SeqCst on both sides pairs with `close`: either this offer is counted before the
    // closer reads the counter, or it observes the raised flag.
    self.in_flight.fetch_add(1, Ordering::SeqCst);
    if self.closed.load(Ordering::SeqCst) {
      self.in_flight.fetch_sub(1, Ordering::Release);
      return Err(QueueError::Closed(item));
    }
    self.queue.push(item);
    self.in_flight.fetch_sub(1, Ordering::Release);
    Ok(())
  }

  /// Pops the oldest element.
  #[must_use]
  pub fn poll(&self) -> Option<T> {
    self.queue.pop()
  }

  /// Closes the queue. Returns `true` for the call that performed the transition.
  ///
  /// Waits for producers that passed the gate before the flag was raised.
  pub fn close(&self) -> bool {
    if self.closed.swap(true, Ordering::SeqCst) {
      return false;
    }
    while self.in_flight.load(Ordering::Acquire) != 0 {
      core::hint::spin_loop();
    }
    true
  }

  /// Removes every element currently queued, oldest first.
  #[must_use]
  pub fn drain(&self) -> Vec<T> {
    let mut drained = Vec::with_capacity(self.queue.len());
    while let Some(item) = self.queue.pop() {
      drained.push(item);
    }
    drained
  }

  /// Whether [`close`](Self::close) has been called.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.closed.load(Ordering::SeqCst)
  }

  /// Number of queued elements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.queue.len()
  }

  /// Whether nothing is queued.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }
}

impl<T> Default for GatedMpscQueue<T> {
  fn default() -> Self {
    Self::new()
  }
}
