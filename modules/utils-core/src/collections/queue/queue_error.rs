use core::fmt;

/// Errors surfaced by queue operations. The rejected element is always handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError<T> {
  /// The queue was closed before the element could be pushed.
  Closed(T),
}

impl<T> QueueError<T> {
  /// Recovers the element that could not be enqueued.
  pub fn into_inner(self) -> T {
    match self {
      | Self::Closed(item) => item,
    }
  }
}

impl<T> fmt::Display for QueueError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Closed(_) => f.write_str("queue closed"),
    }
  }
}

impl<T: fmt::Debug> core::error::Error for QueueError<T> {}
