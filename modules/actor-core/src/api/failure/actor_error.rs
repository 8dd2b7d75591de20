use alloc::borrow::Cow;
use core::fmt;

use super::ExitReason;

/// Failure carried by a response envelope instead of a regular reply.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActorError {
  /// No response arrived before the request timeout fired.
  RequestTimeout,
  /// The receiver terminated (or never existed) before answering.
  RequestReceiverDown(ExitReason),
  /// A response arrived that the receiver could not interpret.
  UnexpectedResponse,
  /// The receiving behavior returned an error while handling the request.
  Behavior(Cow<'static, str>),
}

impl ActorError {
  /// Creates a behavior error from a message.
  pub fn behavior(message: impl Into<Cow<'static, str>>) -> Self {
    Self::Behavior(message.into())
  }
}

impl fmt::Display for ActorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::RequestTimeout => f.write_str("request timed out"),
      | Self::RequestReceiverDown(reason) => write!(f, "request receiver down: {reason}"),
      | Self::UnexpectedResponse => f.write_str("unexpected response"),
      | Self::Behavior(message) => write!(f, "behavior failed: {message}"),
    }
  }
}

impl core::error::Error for ActorError {}
