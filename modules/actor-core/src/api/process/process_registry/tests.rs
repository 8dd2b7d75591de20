use alloc::{sync::Arc, vec::Vec};
use core::sync::atomic::{AtomicBool, Ordering};

use maildrop_utils_core_rs::sync::ArcShared;
use spin::Mutex;

use super::ProcessRegistry;
use crate::api::{
  failure::ExitReason,
  process::{
    dead_letter::{DeadLetter, DeadLetterListener, DeadLetterReason},
    pid::{ActorId, Pid},
  },
};

#[test]
fn register_and_resolve() {
  let registry: ProcessRegistry<u32, usize> = ProcessRegistry::new(4);
  let pid = registry.allocate_pid();
  assert_eq!(pid.generation(), 4);
  assert!(registry.register(pid, ArcShared::new(10)));

  let handle = registry.resolve(&pid).expect("registered");
  assert_eq!(*handle, 10);
  assert_eq!(registry.len(), 1);
}

#[test]
fn allocated_ids_are_never_reused() {
  let registry: ProcessRegistry<u32, usize> = ProcessRegistry::default();
  let first = registry.allocate_pid();
  assert!(registry.register(first, ArcShared::new(1)));
  assert!(registry.deregister(&first).is_some());

  let second = registry.allocate_pid();
  assert!(second.id() > first.id());
  assert!(registry.resolve(&first).is_none());
}

#[test]
fn duplicate_registration_is_rejected() {
  let registry: ProcessRegistry<u32, usize> = ProcessRegistry::default();
  let pid = registry.allocate_pid();
  assert!(registry.register(pid, ArcShared::new(1)));
  assert!(!registry.register(pid, ArcShared::new(2)));
  assert_eq!(*registry.resolve(&pid).unwrap(), 1);
}

#[test]
fn deregister_twice_is_a_noop() {
  let registry: ProcessRegistry<u32, usize> = ProcessRegistry::default();
  let pid = registry.allocate_pid();
  registry.register(pid, ArcShared::new(1));

  assert!(registry.deregister(&pid).is_some());
  assert!(registry.deregister(&pid).is_none());
  assert!(registry.is_empty());
}

#[test]
fn publishes_dead_letter_when_unresolved() {
  let registry: ProcessRegistry<u32, i32> = ProcessRegistry::default();
  let pid = Pid::new(ActorId(77), 0);

  let observed = Arc::new(Mutex::new(Vec::new()));
  let observed_clone = Arc::clone(&observed);
  let listener: Arc<DeadLetterListener<i32>> = Arc::new(move |letter: &DeadLetter<i32>| {
    observed_clone.lock().push((letter.pid, letter.message, letter.reason));
  });
  registry.subscribe_dead_letters(ArcShared::from_arc(listener));

  assert!(registry.resolve_or_dead_letter(&pid, 5).is_none());
  assert_eq!(*observed.lock(), [(pid, 5, DeadLetterReason::UnregisteredPid)]);
}

#[test]
fn pids_are_listed_in_order() {
  let registry: ProcessRegistry<u32, usize> = ProcessRegistry::default();
  let pids: Vec<Pid> = (0..3).map(|_| registry.allocate_pid()).collect();
  for pid in pids.iter().rev() {
    registry.register(*pid, ArcShared::new(0));
  }
  assert_eq!(registry.pids(), pids);
}

#[test]
fn exit_reason_outlives_deregistration() {
  let registry: ProcessRegistry<u32, usize> = ProcessRegistry::default();
  let pid = registry.allocate_pid();
  registry.register(pid, ArcShared::new(1));
  assert_eq!(registry.exit_reason(&pid), None);

  registry.record_exit(pid, ExitReason::failure("boom"));
  registry.deregister(&pid);

  assert!(registry.resolve(&pid).is_none());
  assert_eq!(registry.exit_reason(&pid), Some(ExitReason::failure("boom")));
}

#[test]
fn oldest_exit_reasons_are_evicted_first() {
  let registry: ProcessRegistry<u32, usize> = ProcessRegistry::with_exit_capacity(0, 2);
  let pids: Vec<Pid> = (0..3).map(|_| registry.allocate_pid()).collect();
  for pid in &pids {
    registry.record_exit(*pid, ExitReason::Normal);
  }

  assert_eq!(registry.exit_reason(&pids[0]), None);
  assert_eq!(registry.exit_reason(&pids[1]), Some(ExitReason::Normal));
  assert_eq!(registry.exit_reason(&pids[2]), Some(ExitReason::Normal));
}

#[test]
fn zero_exit_capacity_remembers_nothing() {
  let registry: ProcessRegistry<u32, usize> = ProcessRegistry::with_exit_capacity(0, 0);
  let pid = registry.allocate_pid();
  registry.record_exit(pid, ExitReason::Kill);
  assert_eq!(registry.exit_reason(&pid), None);
}

#[test]
fn listener_may_subscribe_while_being_notified() {
  let registry: Arc<ProcessRegistry<u32, usize>> = Arc::new(ProcessRegistry::default());
  let inner = Arc::clone(&registry);
  let added = AtomicBool::new(false);
  let listener: Arc<DeadLetterListener<usize>> = Arc::new(move |_letter: &DeadLetter<usize>| {
    if !added.swap(true, Ordering::SeqCst) {
      let extra: Arc<DeadLetterListener<usize>> = Arc::new(|_letter: &DeadLetter<usize>| {});
      inner.subscribe_dead_letters(ArcShared::from_arc(extra));
    }
  });
  registry.subscribe_dead_letters(ArcShared::from_arc(listener));

  let letter = DeadLetter::new(Pid::new(ActorId(9), 0), 1, DeadLetterReason::UnregisteredPid);
  assert_eq!(registry.publish_dead_letter(&letter), 1);
  assert_eq!(registry.publish_dead_letter(&letter), 2);
  assert_eq!(registry.dead_letter_count(), 2);
}
