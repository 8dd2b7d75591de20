use alloc::boxed::Box;

use maildrop_utils_core_rs::Element;

use super::{Attachable, ObserveKind, ObserveToken};
use crate::api::{actor_system::ActorSystem, failure::ExitReason, messaging::MessageEnvelope, process::Pid};

/// Delivers a `Down` envelope to the observer when the target terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorAttachable {
  observer: Pid,
}

impl MonitorAttachable {
  /// Creates a monitor registered by `observer`.
  #[must_use]
  pub const fn new(observer: Pid) -> Self {
    Self { observer }
  }

  /// Actor notified on termination.
  #[must_use]
  pub const fn observer(&self) -> Pid {
    self.observer
  }
}

impl<M: Element> Attachable<M> for MonitorAttachable {
  fn actor_exited(self: Box<Self>, source: Pid, reason: &ExitReason, system: &ActorSystem<M>) {
    system.deliver(&self.observer, MessageEnvelope::down(source, reason.clone()));
  }

  fn matches(&self, token: &ObserveToken) -> bool {
    token.kind == ObserveKind::Monitor && token.observer == self.observer
  }
}
