use crate::api::{
  failure::{ActorError, ExitReason},
  process::Pid,
};

/// Exit signal asking the receiver to terminate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExitSignal {
  /// Sender of the signal, `None` when sent from outside any actor.
  pub source: Option<Pid>,
  /// Reason the receiver should terminate with.
  pub reason: ExitReason,
}

/// Notification that a monitored actor terminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownSignal {
  /// The terminated actor.
  pub source: Pid,
  /// Its final reason.
  pub reason: ExitReason,
}

/// Content of an envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload<M> {
  /// Application message.
  User(M),
  /// Reserved exit control payload.
  Exit(ExitSignal),
  /// Monitor notification.
  Down(DownSignal),
  /// Failure response: bounce, timeout or behavior error.
  Failure(ActorError),
}

impl<M> Payload<M> {
  /// `true` for the control payloads (`Exit`, `Down`), which are never bounced.
  #[must_use]
  pub const fn is_control(&self) -> bool {
    matches!(self, Self::Exit(_) | Self::Down(_))
  }

  /// Returns the application message if this is a user payload.
  #[must_use]
  pub const fn as_user(&self) -> Option<&M> {
    match self {
      | Self::User(message) => Some(message),
      | _ => None,
    }
  }
}
