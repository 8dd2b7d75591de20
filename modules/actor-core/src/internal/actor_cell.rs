use alloc::{boxed::Box, vec::Vec};

use maildrop_utils_core_rs::Element;
use tracing::{debug, trace, warn};

use crate::api::{
  actor::{ActorContext, ActorHandle, Behavior, CurrentMessage, ExitDirective, RequestTracker, ResumeResult},
  actor_system::ActorSystem,
  failure::{ActorError, ExitReason},
  mailbox::PriorityMailbox,
  messaging::{ExitSignal, MessageEnvelope, MessageId, Payload},
  process::{DeadLetterReason, Pid},
};

/// Everything only the permit holder may touch.
pub(crate) struct ActorCell<M: Element> {
  pid:        Pid,
  mailbox:    PriorityMailbox<M>,
  behavior:   Box<dyn Behavior<M>>,
  tracker:    RequestTracker,
  started:    bool,
  exit_state: Option<ExitReason>,
}

impl<M: Element> ActorCell<M> {
  pub(crate) fn new(pid: Pid, mailbox: PriorityMailbox<M>, behavior: Box<dyn Behavior<M>>) -> Self {
    Self { pid, mailbox, behavior, tracker: RequestTracker::new(), started: false, exit_state: None }
  }

  pub(crate) const fn exit_state(&self) -> Option<&ExitReason> {
    self.exit_state.as_ref()
  }

  pub(crate) fn cached_len(&self) -> usize {
    self.mailbox.cached_len()
  }

  pub(crate) fn start(&mut self, handle: &ActorHandle<M>, system: &ActorSystem<M>) -> bool {
    if self.started || self.exit_state.is_some() {
      return false;
    }
    self.started = true;

    let mut exit = None;
    let result = {
      let mut ctx = ActorContext::new(self.pid, system, &mut self.tracker, None, &mut exit);
      self.behavior.pre_start(&mut ctx)
    };
    if let Some(reason) = Self::exit_after(self.pid, result, exit) {
      self.cleanup(handle, system, reason, Vec::new());
      return false;
    }

    let released = self.mailbox.release_cached();
    trace!(pid = %self.pid, released, "actor started");
    self.mailbox.has_pending() && self.mailbox.try_schedule()
  }

  pub(crate) fn resume(&mut self, handle: &ActorHandle<M>, system: &ActorSystem<M>, throughput: usize) -> ResumeResult {
    if self.exit_state.is_some() {
      return ResumeResult::Done;
    }
    let quantum = self.mailbox.options().quantum;
    let mut handled = 0;
    while handled < throughput {
      let batch = self.mailbox.new_round(quantum);
      if batch.is_empty() {
        break;
      }
      let mut batch = batch.into_iter();
      while let Some(envelope) = batch.next() {
        handled += 1;
        if let Some(reason) = self.dispatch(system, envelope) {
          self.cleanup(handle, system, reason, batch.collect());
          return ResumeResult::Done;
        }
      }
    }
    if self.mailbox.try_block() {
      ResumeResult::AwaitingMessage
    } else {
      ResumeResult::ResumeLater
    }
  }

  /// Termination protocol. Runs at most once per actor; later calls return `false`.
  pub(crate) fn cleanup(
    &mut self,
    handle: &ActorHandle<M>,
    system: &ActorSystem<M>,
    reason: ExitReason,
    leftovers: Vec<MessageEnvelope<M>>,
  ) -> bool {
    if !handle.begin_cleanup() {
      return false;
    }

    system.registry().record_exit(self.pid, reason.clone());
    let mut drained = leftovers;
    drained.extend(self.mailbox.close());
    let bounced = drained.len();
    for envelope in drained {
      system.reject(&self.pid, envelope, &reason, DeadLetterReason::Terminated);
    }

    system.registry().deregister(&self.pid);
    self.behavior.post_stop(&reason);

    if let Some(attachables) = handle.attachables().terminate(&reason) {
      for attachable in attachables {
        attachable.actor_exited(self.pid, &reason, system);
      }
    }

    debug!(pid = %self.pid, %reason, bounced, "actor terminated");
    self.exit_state = Some(reason);
    true
  }

  fn dispatch(&mut self, system: &ActorSystem<M>, envelope: MessageEnvelope<M>) -> Option<ExitReason> {
    if !self.started {
      if let Payload::Exit(signal) = envelope.payload() {
        return Some(signal.reason.clone());
      }
      self.mailbox.cache(envelope);
      return None;
    }

    let (sender, message_id, stages, payload) = envelope.into_parts();
    match payload {
      | Payload::User(message) if message_id.is_response() => self.handle_response(system, message_id, Ok(message)),
      | Payload::Failure(error) if message_id.is_response() => self.handle_response(system, message_id, Err(error)),
      | Payload::User(message) => self.handle_message(system, CurrentMessage::new(sender, message_id, stages), message),
      | Payload::Failure(error) => {
        warn!(pid = %self.pid, %error, "failure payload without matching request dropped");
        None
      },
      | Payload::Down(signal) => {
        let mut exit = None;
        let result = {
          let mut ctx = ActorContext::new(self.pid, system, &mut self.tracker, None, &mut exit);
          self.behavior.on_down(&mut ctx, signal)
        };
        Self::exit_after(self.pid, result, exit)
      },
      | Payload::Exit(signal) => self.handle_exit(system, &signal),
    }
  }

  fn handle_message(&mut self, system: &ActorSystem<M>, mut current: CurrentMessage, message: M) -> Option<ExitReason> {
    let mut exit = None;
    let result = {
      let mut ctx = ActorContext::new(self.pid, system, &mut self.tracker, Some(&mut current), &mut exit);
      self.behavior.receive(&mut ctx, message)
    };
    if let Err(error) = &result {
      if let Some(promise) = current.take_promise::<M>(self.pid) {
        promise.deliver_failure(system, error.clone());
      }
    }
    Self::exit_after(self.pid, result, exit)
  }

  fn handle_response(
    &mut self,
    system: &ActorSystem<M>,
    response_id: MessageId,
    response: Result<M, ActorError>,
  ) -> Option<ExitReason> {
    if !self.tracker.resolve(response_id) {
      trace!(pid = %self.pid, message_id = %response_id, "stale response discarded");
      return None;
    }
    let mut exit = None;
    let result = {
      let mut ctx = ActorContext::new(self.pid, system, &mut self.tracker, None, &mut exit);
      self.behavior.on_response(&mut ctx, response_id.request_id(), response)
    };
    Self::exit_after(self.pid, result, exit)
  }

  fn handle_exit(&mut self, system: &ActorSystem<M>, signal: &ExitSignal) -> Option<ExitReason> {
    if signal.reason.is_untrappable() {
      return Some(signal.reason.clone());
    }
    let mut exit = None;
    let directive = {
      let mut ctx = ActorContext::new(self.pid, system, &mut self.tracker, None, &mut exit);
      self.behavior.on_exit_signal(&mut ctx, signal)
    };
    match directive {
      | ExitDirective::Terminate => Some(signal.reason.clone()),
      | ExitDirective::Ignore => {
        trace!(pid = %self.pid, reason = %signal.reason, "exit signal trapped");
        exit
      },
    }
  }

  /// Reason the actor terminates with after a handler, if any. Errors win over `quit`.
  fn exit_after(pid: Pid, result: Result<(), ActorError>, exit: Option<ExitReason>) -> Option<ExitReason> {
    match result {
      | Ok(()) => exit,
      | Err(error) => {
        warn!(pid = %pid, %error, "behavior failed");
        Some(ExitReason::from(error))
      },
    }
  }
}
