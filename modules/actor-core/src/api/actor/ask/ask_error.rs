use core::fmt;

use crate::api::failure::{ActorError, ExitReason};

/// Why an `ask` produced no reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskError {
  /// No reply before the timeout.
  Timeout,
  /// The target terminated (or never existed) before answering.
  ReceiverDown(ExitReason),
  /// The target answered with a failure.
  Failed(ActorError),
  /// The asking actor was stopped before a reply arrived, e.g. by a system shutdown.
  Stopped(ExitReason),
  /// The asking side vanished without producing a result.
  Cancelled,
}

impl From<ActorError> for AskError {
  fn from(error: ActorError) -> Self {
    match error {
      | ActorError::RequestTimeout => Self::Timeout,
      | ActorError::RequestReceiverDown(reason) => Self::ReceiverDown(reason),
      | other => Self::Failed(other),
    }
  }
}

impl fmt::Display for AskError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Timeout => f.write_str("ask timed out"),
      | Self::ReceiverDown(reason) => write!(f, "ask receiver down: {reason}"),
      | Self::Failed(error) => write!(f, "ask failed: {error}"),
      | Self::Stopped(reason) => write!(f, "ask stopped: {reason}"),
      | Self::Cancelled => f.write_str("ask cancelled"),
    }
  }
}

impl core::error::Error for AskError {}
