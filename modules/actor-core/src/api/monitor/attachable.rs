use alloc::boxed::Box;

use maildrop_utils_core_rs::Element;

use super::ObserveToken;
use crate::api::{actor_system::ActorSystem, failure::ExitReason, process::Pid};

/// One-shot observer bound to an actor, fired exactly once when the actor terminates.
pub trait Attachable<M: Element>: Send {
  /// Called with the terminated actor and its final reason.
  fn actor_exited(self: Box<Self>, source: Pid, reason: &ExitReason, system: &ActorSystem<M>);

  /// `true` when `token` identifies this attachable. Attachables that cannot be removed
  /// explicitly keep the default.
  fn matches(&self, token: &ObserveToken) -> bool {
    let _ = token;
    false
  }
}
