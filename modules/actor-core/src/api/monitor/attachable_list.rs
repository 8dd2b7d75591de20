use alloc::{boxed::Box, vec::Vec};

use maildrop_utils_core_rs::Element;
use spin::Mutex;

use super::{Attachable, ObserveToken};
use crate::api::{actor_system::ActorSystem, failure::ExitReason, process::Pid};


struct AttachableState<M> {
  entries:      Vec<Box<dyn Attachable<M>>>,
  final_reason: Option<ExitReason>,
}

/// Attachables of one actor together with its final reason.
///
/// Both live under one lock so an attach racing with termination either lands in the list
/// before it is taken or sees the recorded reason and fires at once.
pub(crate) struct AttachableList<M> {
  state: Mutex<AttachableState<M>>,
}

impl<M: Element> AttachableList<M> {
  pub(crate) const fn new() -> Self {
    Self { state: Mutex::new(AttachableState { entries: Vec::new(), final_reason: None }) }
  }

  /// Registers `attachable`, or fires it immediately if `source` already terminated.
  pub(crate) fn attach(&self, source: Pid, attachable: Box<dyn Attachable<M>>, system: &ActorSystem<M>) {
    let reason = {
      let mut state = self.state.lock();
      match state.final_reason.clone() {
        | Some(reason) => reason,
        | None => {
          state.entries.push(attachable);
          return;
        },
      }
    };
    attachable.actor_exited(source, &reason, system);
  }

  /// Removes the first attachable matching `token` without firing it.
  pub(crate) fn detach(&self, token: &ObserveToken) -> bool {
    let mut state = self.state.lock();
    match state.entries.iter().position(|entry| entry.matches(token)) {
      | Some(index) => {
        drop(state.entries.remove(index));
        true
      },
      | None => false,
    }
  }

  /// Records the final reason and takes every attachable. `None` if already terminated.
  pub(crate) fn terminate(&self, reason: &ExitReason) -> Option<Vec<Box<dyn Attachable<M>>>> {
    let mut state = self.state.lock();
    if state.final_reason.is_some() {
      return None;
    }
    state.final_reason = Some(reason.clone());
    Some(core::mem::take(&mut state.entries))
  }

  pub(crate) fn final_reason(&self) -> Option<ExitReason> {
    self.state.lock().final_reason.clone()
  }

  pub(crate) fn len(&self) -> usize {
    self.state.lock().entries.len()
  }
}
