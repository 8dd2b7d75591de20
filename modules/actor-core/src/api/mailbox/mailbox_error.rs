//! Mailbox-specific error types and conversions from queue errors.

use core::fmt;

use maildrop_utils_core_rs::collections::queue::QueueError;

/// Error surfaced by mailbox enqueue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailboxError<M> {
  /// The mailbox was closed. The rejected envelope is handed back so the caller can bounce it.
  Closed(M),
}

impl<M> MailboxError<M> {
  /// Returns the rejected envelope.
  pub fn into_inner(self) -> M {
    match self {
      | Self::Closed(message) => message,
    }
  }
}

impl<M> From<QueueError<M>> for MailboxError<M> {
  fn from(error: QueueError<M>) -> Self {
    match error {
      | QueueError::Closed(message) => Self::Closed(message),
    }
  }
}

impl<M> fmt::Display for MailboxError<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Closed(_) => f.write_str("mailbox closed"),
    }
  }
}

impl<M: fmt::Debug> core::error::Error for MailboxError<M> {}
