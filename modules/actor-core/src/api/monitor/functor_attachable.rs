use alloc::boxed::Box;

use maildrop_utils_core_rs::Element;

use super::Attachable;
use crate::api::{actor_system::ActorSystem, failure::ExitReason, process::Pid};

/// Runs a callback when the actor terminates.
pub struct FunctorAttachable<F> {
  callback: F,
}

impl<F> FunctorAttachable<F>
where
  F: FnOnce(Pid, &ExitReason) + Send,
{
  /// Wraps `callback`.
  pub const fn new(callback: F) -> Self {
    Self { callback }
  }
}

impl<M, F> Attachable<M> for FunctorAttachable<F>
where
  M: Element,
  F: FnOnce(Pid, &ExitReason) + Send,
{
  fn actor_exited(self: Box<Self>, source: Pid, reason: &ExitReason, _system: &ActorSystem<M>) {
    (self.callback)(source, reason);
  }
}
