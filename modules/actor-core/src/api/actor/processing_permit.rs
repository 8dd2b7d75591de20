use maildrop_utils_core_rs::Element;
use spin::MutexGuard;

use super::{ActorHandle, ResumeResult};
use crate::{
  api::{actor_system::ActorSystem, failure::ExitReason, process::Pid},
  internal::actor_cell::ActorCell,
};

/// Proof of being the single consumer of an actor.
///
/// Obtained from [`ActorHandle::try_acquire`]; dropping it releases the actor.
pub struct ProcessingPermit<'a, M: Element> {
  handle: &'a ActorHandle<M>,
  cell:   MutexGuard<'a, ActorCell<M>>,
}

impl<'a, M: Element> ProcessingPermit<'a, M> {
  pub(crate) const fn new(handle: &'a ActorHandle<M>, cell: MutexGuard<'a, ActorCell<M>>) -> Self {
    Self { handle, cell }
  }

  /// Pid of the actor.
  #[must_use]
  pub const fn pid(&self) -> Pid {
    self.handle.pid()
  }

  /// Drains up to the configured throughput in DRR rounds.
  pub fn resume(&mut self, system: &ActorSystem<M>) -> ResumeResult {
    self.cell.resume(self.handle, system, system.config().throughput)
  }

  /// Runs `pre_start` and releases the cached envelopes. Returns `true` if the actor now has
  /// work and the caller must schedule it.
  pub fn start(&mut self, system: &ActorSystem<M>) -> bool {
    self.cell.start(self.handle, system)
  }

  /// Runs the termination protocol. Returns `false` if the actor was already cleaned up.
  pub fn cleanup(&mut self, system: &ActorSystem<M>, reason: ExitReason) -> bool {
    self.cell.cleanup(self.handle, system, reason, alloc::vec::Vec::new())
  }

  /// Terminal state of the cell, once cleanup completed.
  #[must_use]
  pub fn exit_state(&self) -> Option<&ExitReason> {
    self.cell.exit_state()
  }

  /// Number of envelopes waiting in the pre-start cache.
  #[must_use]
  pub fn cached_len(&self) -> usize {
    self.cell.cached_len()
  }
}
