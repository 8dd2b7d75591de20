use alloc::vec::Vec;
use core::time::Duration;

use maildrop_utils_core_rs::{sync::ArcShared, Element};
use spin::Mutex;

use crate::api::{
  actor::{ActorContext, Behavior, ExitDirective, ResponsePromise},
  failure::{ActorError, ExitReason},
  messaging::{DownSignal, ExitSignal, MessageId},
  process::Pid,
};

/// Something a [`ProbeBehavior`] observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeEvent<M> {
  /// `pre_start` ran.
  Started,
  /// A user message arrived.
  Received {
    /// Sender of the message.
    sender:  Option<Pid>,
    /// The message.
    message: M,
    /// Whether it was a request.
    request: bool,
  },
  /// A response (or failure) for one of the probe's requests arrived.
  Response {
    /// Id of the answered request.
    request_id: MessageId,
    /// What came back.
    response:   Result<M, ActorError>,
  },
  /// A monitored actor terminated.
  Down(DownSignal),
  /// An exit signal arrived.
  Exit(ExitSignal),
  /// The probe terminated.
  Stopped(ExitReason),
}

/// Shared record of everything a probe behavior saw.
pub struct Probe<M> {
  events:   ArcShared<Mutex<Vec<ProbeEvent<M>>>>,
  promises: ArcShared<Mutex<Vec<ResponsePromise<M>>>>,
}

impl<M> Clone for Probe<M> {
  fn clone(&self) -> Self {
    Self { events: self.events.clone(), promises: self.promises.clone() }
  }
}

impl<M: Element + Clone> Probe<M> {
  /// Creates an empty probe.
  #[must_use]
  pub fn new() -> Self {
    Self { events: ArcShared::new(Mutex::new(Vec::new())), promises: ArcShared::new(Mutex::new(Vec::new())) }
  }

  /// Behavior recording into this probe. It answers nothing unless configured.
  #[must_use]
  pub fn behavior(&self) -> ProbeBehavior<M> {
    ProbeBehavior { probe: self.clone(), responder: None, defer_replies: false, trap_exits: false, initial_request: None }
  }

  /// Snapshot of the recorded events.
  #[must_use]
  pub fn events(&self) -> Vec<ProbeEvent<M>> {
    self.events.lock().clone()
  }

  /// Removes and returns the recorded events.
  pub fn take(&self) -> Vec<ProbeEvent<M>> {
    core::mem::take(&mut *self.events.lock())
  }

  /// Removes and returns the promises of deferred requests.
  pub fn take_promises(&self) -> Vec<ResponsePromise<M>> {
    core::mem::take(&mut *self.promises.lock())
  }

  fn record(&self, event: ProbeEvent<M>) {
    self.events.lock().push(event);
  }
}

impl<M: Element + Clone> Default for Probe<M> {
  fn default() -> Self {
    Self::new()
  }
}

/// Behavior that records every callback into a [`Probe`].
pub struct ProbeBehavior<M> {
  probe:           Probe<M>,
  responder:       Option<fn(&M) -> M>,
  defer_replies:   bool,
  trap_exits:      bool,
  initial_request: Option<(Pid, M, Duration)>,
}

impl<M: Element + Clone> ProbeBehavior<M> {
  /// Answers every request with `responder(&message)`.
  #[must_use]
  pub fn with_responder(mut self, responder: fn(&M) -> M) -> Self {
    self.responder = Some(responder);
    self
  }

  /// Keeps request promises in the probe instead of answering.
  #[must_use]
  pub fn deferring_replies(mut self) -> Self {
    self.defer_replies = true;
    self
  }

  /// Sends `message` as a request to `target` from `pre_start`.
  #[must_use]
  pub fn requesting(mut self, target: Pid, message: M, timeout: Duration) -> Self {
    self.initial_request = Some((target, message, timeout));
    self
  }

  /// Ignores trappable exit signals.
  #[must_use]
  pub fn trapping_exits(mut self) -> Self {
    self.trap_exits = true;
    self
  }
}

impl<M: Element + Clone> Behavior<M> for ProbeBehavior<M> {
  fn pre_start(&mut self, ctx: &mut ActorContext<'_, M>) -> Result<(), ActorError> {
    self.probe.record(ProbeEvent::Started);
    if let Some((target, message, timeout)) = self.initial_request.take() {
      ctx.request(&target, message, timeout);
    }
    Ok(())
  }

  fn receive(&mut self, ctx: &mut ActorContext<'_, M>, message: M) -> Result<(), ActorError> {
    let request = ctx.message_id().is_some_and(MessageId::is_request);
    let reply = self.responder.map(|responder| responder(&message));
    self.probe.record(ProbeEvent::Received { sender: ctx.sender(), message, request });
    if self.defer_replies {
      if let Some(promise) = ctx.promise() {
        self.probe.promises.lock().push(promise);
      }
    } else if let Some(reply) = reply {
      ctx.reply(reply);
    }
    Ok(())
  }

  fn on_response(
    &mut self,
    _ctx: &mut ActorContext<'_, M>,
    request_id: MessageId,
    response: Result<M, ActorError>,
  ) -> Result<(), ActorError> {
    self.probe.record(ProbeEvent::Response { request_id, response });
    Ok(())
  }

  fn on_down(&mut self, _ctx: &mut ActorContext<'_, M>, signal: DownSignal) -> Result<(), ActorError> {
    self.probe.record(ProbeEvent::Down(signal));
    Ok(())
  }

  fn on_exit_signal(&mut self, _ctx: &mut ActorContext<'_, M>, signal: &ExitSignal) -> ExitDirective {
    self.probe.record(ProbeEvent::Exit(signal.clone()));
    if self.trap_exits {
      ExitDirective::Ignore
    } else {
      ExitDirective::Terminate
    }
  }

  fn post_stop(&mut self, reason: &ExitReason) {
    self.probe.record(ProbeEvent::Stopped(reason.clone()));
  }
}
