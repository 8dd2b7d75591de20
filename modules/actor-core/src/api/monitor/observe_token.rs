use crate::api::process::Pid;

/// Kind of observation an attachable represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObserveKind {
  /// Monitor delivering a `Down` envelope.
  Monitor,
}

/// Key used to find and remove an attachable without firing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserveToken {
  /// Actor that registered the observation.
  pub observer: Pid,
  /// What kind of observation it is.
  pub kind:     ObserveKind,
}

impl ObserveToken {
  /// Token of a monitor registered by `observer`.
  #[must_use]
  pub const fn monitor(observer: Pid) -> Self {
    Self { observer, kind: ObserveKind::Monitor }
  }
}
