use alloc::{collections::BTreeMap, vec::Vec};

use maildrop_utils_core_rs::sync::ArcShared;
use portable_atomic::{AtomicU64, Ordering};
use spin::RwLock;

use super::{
  dead_letter::{DeadLetter, DeadLetterHub, DeadLetterListener, DeadLetterReason},
  pid::{ActorId, Pid},
};
use crate::api::failure::ExitReason;

#[cfg(test)]
mod tests;

/// Directory mapping pids to process handles, plus the dead letter hub.
///
/// The registry holds the only long-lived strong reference to each handle; everything else
/// addresses actors by [`Pid`] and resolves on demand.
///
/// Final exit reasons of terminated processes are kept for the most recent
/// `exit_capacity` pids so late monitors and requests still learn why a process went away.
pub struct ProcessRegistry<T, M> {
  generation:    u32,
  next_id:       AtomicU64,
  processes:     RwLock<BTreeMap<Pid, ArcShared<T>>>,
  exits:         RwLock<BTreeMap<Pid, ExitReason>>,
  exit_capacity: usize,
  dead_letters:  RwLock<DeadLetterHub<M>>,
}

impl<T, M> ProcessRegistry<T, M> {
  /// Default number of exit reasons remembered after deregistration.
  pub const DEFAULT_EXIT_CAPACITY: usize = 1024;

  /// Creates an empty registry issuing pids tagged with `generation`.
  #[must_use]
  pub const fn new(generation: u32) -> Self {
    Self::with_exit_capacity(generation, Self::DEFAULT_EXIT_CAPACITY)
  }

  /// Creates an empty registry remembering up to `exit_capacity` exit reasons.
  #[must_use]
  pub const fn with_exit_capacity(generation: u32, exit_capacity: usize) -> Self {
    Self {
      generation,
      next_id: AtomicU64::new(1),
      processes: RwLock::new(BTreeMap::new()),
      exits: RwLock::new(BTreeMap::new()),
      exit_capacity,
      dead_letters: RwLock::new(DeadLetterHub::new()),
    }
  }

  /// Returns the generation stamped into every pid this registry issues.
  #[must_use]
  pub const fn generation(&self) -> u32 {
    self.generation
  }

  /// Allocates a fresh pid. Ids increase monotonically and are never handed out twice.
  pub fn allocate_pid(&self) -> Pid {
    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    Pid::new(ActorId(id), self.generation)
  }

  /// Registers a handle under `pid`. Returns `false` when the pid is already present.
  pub fn register(&self, pid: Pid, handle: ArcShared<T>) -> bool {
    let mut processes = self.processes.write();
    if processes.contains_key(&pid) {
      return false;
    }
    processes.insert(pid, handle);
    true
  }

  /// Removes a process entry, returning the handle if it was registered.
  pub fn deregister(&self, pid: &Pid) -> Option<ArcShared<T>> {
    self.processes.write().remove(pid)
  }

  /// Records the final reason of `pid`. The oldest entry is evicted once the capacity is
  /// exceeded.
  pub fn record_exit(&self, pid: Pid, reason: ExitReason) {
    if self.exit_capacity == 0 {
      return;
    }
    let mut exits = self.exits.write();
    exits.insert(pid, reason);
    while exits.len() > self.exit_capacity {
      exits.pop_first();
    }
  }

  /// Final reason recorded for `pid`, if it terminated recently enough to be remembered.
  #[must_use]
  pub fn exit_reason(&self, pid: &Pid) -> Option<ExitReason> {
    self.exits.read().get(pid).cloned()
  }

  /// Resolves a pid to its handle.
  #[must_use]
  pub fn resolve(&self, pid: &Pid) -> Option<ArcShared<T>> {
    self.processes.read().get(pid).cloned()
  }

  /// Resolves the pid and, if not found, records a dead letter entry.
  pub fn resolve_or_dead_letter(&self, pid: &Pid, message: M) -> Option<ArcShared<T>> {
    let resolved = self.resolve(pid);
    if resolved.is_none() {
      self.publish_dead_letter(&DeadLetter::new(*pid, message, DeadLetterReason::UnregisteredPid));
    }
    resolved
  }

  /// Snapshot of the registered pids in ascending order.
  #[must_use]
  pub fn pids(&self) -> Vec<Pid> {
    self.processes.read().keys().copied().collect()
  }

  /// Number of registered processes.
  #[must_use]
  pub fn len(&self) -> usize {
    self.processes.read().len()
  }

  /// Returns `true` when no process is registered.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.processes.read().is_empty()
  }

  /// Subscribes a listener to the dead letter hub.
  pub fn subscribe_dead_letters(&self, listener: ArcShared<DeadLetterListener<M>>) {
    self.dead_letters.write().subscribe(listener);
  }

  /// Publishes a dead letter; returns how many listeners saw it.
  ///
  /// Listeners run after the hub lock is released and may subscribe further listeners.
  pub fn publish_dead_letter(&self, dead_letter: &DeadLetter<M>) -> usize {
    let listeners = self.dead_letters.read().announce();
    listeners.iter().for_each(|listener| listener(dead_letter));
    listeners.len()
  }

  /// Dead letters published since the registry was created.
  #[must_use]
  pub fn dead_letter_count(&self) -> usize {
    self.dead_letters.read().published()
  }
}

impl<T, M> Default for ProcessRegistry<T, M> {
  fn default() -> Self {
    Self::new(0)
  }
}
