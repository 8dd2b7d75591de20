use alloc::{borrow::Cow, string::ToString};
use core::fmt;

use super::ActorError;


/// Why an actor terminated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExitReason {
  /// Regular completion.
  Normal,
  /// The actor was torn down without ever being reachable again (handle dropped).
  Unreachable,
  /// The reason could not be determined, e.g. the target vanished before it was observed.
  Unknown,
  /// The owning system is shutting down.
  UserShutdown,
  /// Forced termination. Cannot be trapped.
  Kill,
  /// Abnormal termination with a description.
  Failure(Cow<'static, str>),
}

impl ExitReason {
  /// Creates a failure reason from a message.
  pub fn failure(message: impl Into<Cow<'static, str>>) -> Self {
    Self::Failure(message.into())
  }

  /// `true` for the non-error categories, [`ExitReason::Normal`] and [`ExitReason::Unreachable`].
  #[must_use]
  pub const fn is_normal(&self) -> bool {
    matches!(self, Self::Normal | Self::Unreachable)
  }

  /// `true` when a behavior may not trap an exit signal carrying this reason.
  #[must_use]
  pub const fn is_untrappable(&self) -> bool {
    matches!(self, Self::Kill | Self::UserShutdown)
  }
}

impl fmt::Display for ExitReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Normal => f.write_str("normal"),
      | Self::Unreachable => f.write_str("unreachable"),
      | Self::Unknown => f.write_str("unknown"),
      | Self::UserShutdown => f.write_str("user shutdown"),
      | Self::Kill => f.write_str("kill"),
      | Self::Failure(message) => write!(f, "failure: {message}"),
    }
  }
}

impl From<ActorError> for ExitReason {
  fn from(error: ActorError) -> Self {
    Self::Failure(Cow::Owned(error.to_string()))
  }
}
