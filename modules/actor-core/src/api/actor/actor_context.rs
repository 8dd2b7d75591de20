use alloc::vec::Vec;
use core::time::Duration;

use maildrop_utils_core_rs::Element;

use super::{Behavior, RequestTracker, ResponsePromise};
use crate::api::{
  actor_system::ActorSystem,
  failure::{ActorError, ExitReason},
  messaging::{MessageEnvelope, MessageId, MessagePriority, Payload},
  process::Pid,
};

/// Header of the envelope currently being handled.
pub(crate) struct CurrentMessage {
  sender:     Option<Pid>,
  message_id: MessageId,
  stages:     Vec<Pid>,
  answered:   bool,
}

impl CurrentMessage {
  pub(crate) const fn new(sender: Option<Pid>, message_id: MessageId, stages: Vec<Pid>) -> Self {
    Self { sender, message_id, stages, answered: false }
  }

  /// Hands out the obligation to answer, at most once and only for requests.
  pub(crate) fn take_promise<M: Element>(&mut self, responder: Pid) -> Option<ResponsePromise<M>> {
    if self.answered || !self.message_id.is_request() {
      return None;
    }
    self.answered = true;
    Some(ResponsePromise::new(responder, self.sender, self.message_id, core::mem::take(&mut self.stages)))
  }
}

/// Handle given to behavior callbacks.
pub struct ActorContext<'a, M: Element> {
  pid:     Pid,
  system:  &'a ActorSystem<M>,
  tracker: &'a mut RequestTracker,
  current: Option<&'a mut CurrentMessage>,
  exit:    &'a mut Option<ExitReason>,
}

impl<'a, M: Element> ActorContext<'a, M> {
  pub(crate) fn new(
    pid: Pid,
    system: &'a ActorSystem<M>,
    tracker: &'a mut RequestTracker,
    current: Option<&'a mut CurrentMessage>,
    exit: &'a mut Option<ExitReason>,
  ) -> Self {
    Self { pid, system, tracker, current, exit }
  }

  /// Pid of the running actor.
  #[must_use]
  pub const fn self_pid(&self) -> Pid {
    self.pid
  }

  /// The owning system.
  #[must_use]
  pub const fn system(&self) -> &'a ActorSystem<M> {
    self.system
  }

  /// Sender of the current message, `None` for anonymous messages or outside a handler.
  #[must_use]
  pub fn sender(&self) -> Option<Pid> {
    self.current.as_ref().and_then(|current| current.sender)
  }

  /// Correlation id of the current message.
  #[must_use]
  pub fn message_id(&self) -> Option<MessageId> {
    self.current.as_ref().map(|current| current.message_id)
  }

  /// Sends an asynchronous message.
  pub fn send(&self, target: &Pid, message: M) {
    self.send_with_priority(target, message, MessagePriority::Normal);
  }

  /// Sends an asynchronous message on the given lane.
  pub fn send_with_priority(&self, target: &Pid, message: M, priority: MessagePriority) {
    self.system.deliver(target, MessageEnvelope::user(Some(self.pid), message, priority));
  }

  /// Issues the next request id of this actor.
  pub fn new_request_id(&mut self, priority: MessagePriority) -> MessageId {
    self.tracker.new_request_id(priority)
  }

  /// Schedules a `RequestTimeout` failure for `request_id` after `timeout`.
  ///
  /// A zero timeout means "wait forever" and schedules nothing; returns whether a timeout
  /// was scheduled.
  pub fn request_response_timeout(&self, timeout: Duration, request_id: MessageId) -> bool {
    if timeout.is_zero() {
      return false;
    }
    let envelope =
      MessageEnvelope::new(Some(self.pid), request_id.response_id(), Payload::Failure(ActorError::RequestTimeout));
    self.system.delay_send(timeout, self.pid, envelope);
    true
  }

  /// Sends a request and returns its id. The response arrives in
  /// [`Behavior::on_response`]; a zero `timeout` waits forever.
  pub fn request(&mut self, target: &Pid, message: M, timeout: Duration) -> MessageId {
    self.request_with_priority(target, message, timeout, MessagePriority::Normal)
  }

  /// [`Self::request`] on the given lane.
  pub fn request_with_priority(
    &mut self,
    target: &Pid,
    message: M,
    timeout: Duration,
    priority: MessagePriority,
  ) -> MessageId {
    let request_id = self.new_request_id(priority);
    self.tracker.await_response(request_id.response_id());
    self.system.deliver(target, MessageEnvelope::new(Some(self.pid), request_id, Payload::User(message)));
    self.request_response_timeout(timeout, request_id);
    request_id
  }

  /// Answers the current request. Returns `false` if it is not a request or was already answered.
  pub fn reply(&mut self, message: M) -> bool {
    self.promise().is_some_and(|promise| promise.deliver(self.system, message))
  }

  /// Answers the current request with a failure.
  pub fn reply_failure(&mut self, error: ActorError) -> bool {
    self.promise().is_some_and(|promise| promise.deliver_failure(self.system, error))
  }

  /// Takes over the obligation to answer the current request later.
  pub fn promise(&mut self) -> Option<ResponsePromise<M>> {
    let pid = self.pid;
    self.current.as_deref_mut().and_then(|current| current.take_promise(pid))
  }

  /// Forwards the current message to `target`, which then answers the original sender.
  ///
  /// Returns `false` outside a handler or when the current request was already answered.
  pub fn delegate(&mut self, target: &Pid, message: M) -> bool {
    let Some(current) = self.current.as_deref_mut() else {
      return false;
    };
    if current.answered {
      return false;
    }
    current.answered = true;
    let stages = core::mem::take(&mut current.stages);
    self.system.deliver(target, MessageEnvelope::with_stages(current.sender, current.message_id, stages, Payload::User(message)));
    true
  }

  /// Monitors `target`: a `Down` arrives in [`Behavior::on_down`] when it terminates.
  pub fn monitor(&self, target: &Pid) {
    self.system.monitor(&self.pid, target);
  }

  /// Removes one monitor on `target`.
  pub fn demonitor(&self, target: &Pid) -> bool {
    self.system.demonitor(&self.pid, target)
  }

  /// Sends an exit signal from this actor.
  pub fn send_exit(&self, target: &Pid, reason: ExitReason) {
    self.system.send_exit_from(Some(self.pid), target, reason);
  }

  /// Terminates this actor after the current handler returns.
  pub fn quit(&mut self, reason: ExitReason) {
    *self.exit = Some(reason);
  }

  /// Spawns a new actor in the same system.
  pub fn spawn<B>(&self, behavior: B) -> Pid
  where
    B: Behavior<M> + 'static, {
    self.system.spawn(behavior)
  }
}
