use maildrop_utils_core_rs::{sync::ArcShared, Element};

use super::ActorHandle;
use crate::api::{actor_system::ActorSystem, process::Pid};

/// Spawned actor that has not run `pre_start` yet.
///
/// Its pid is registered and its mailbox accepts envelopes, which are parked in the
/// pre-start cache until [`DeferredActor::start`].
pub struct DeferredActor<M: Element> {
  handle: ArcShared<ActorHandle<M>>,
  system: ActorSystem<M>,
}

impl<M: Element> DeferredActor<M> {
  pub(crate) const fn new(handle: ArcShared<ActorHandle<M>>, system: ActorSystem<M>) -> Self {
    Self { handle, system }
  }

  /// Pid of the actor.
  #[must_use]
  pub fn pid(&self) -> Pid {
    self.handle.pid()
  }

  /// Runs `pre_start`, releases the cache and schedules the actor if it has work.
  pub fn start(self) -> Pid {
    let needs_schedule = self.handle.acquire().start(&self.system);
    if needs_schedule {
      self.system.schedule(self.handle.clone());
    }
    self.handle.pid()
  }
}
