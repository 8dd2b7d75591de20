use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};

use maildrop_utils_core_rs::Element;
use tracing::trace;

use crate::api::{
  actor_system::ActorSystem,
  failure::ActorError,
  messaging::{reply_route, MessageEnvelope, MessageId, Payload},
  process::Pid,
};

/// Deferred answer to a request, detached from the handler that received it.
pub struct ResponsePromise<M> {
  responder:  Pid,
  sender:     Option<Pid>,
  request_id: MessageId,
  stages:     Vec<Pid>,
  _marker:    PhantomData<fn(M)>,
}

impl<M: Element> ResponsePromise<M> {
  pub(crate) const fn new(responder: Pid, sender: Option<Pid>, request_id: MessageId, stages: Vec<Pid>) -> Self {
    Self { responder, sender, request_id, stages, _marker: PhantomData }
  }

  /// Id of the request this promise answers.
  #[must_use]
  pub const fn request_id(&self) -> MessageId {
    self.request_id
  }

  /// Sends `message` as the response. Returns `false` when there is nobody to answer.
  pub fn deliver(self, system: &ActorSystem<M>, message: M) -> bool {
    self.fulfill(system, Payload::User(message))
  }

  /// Sends `error` as the response. Returns `false` when there is nobody to answer.
  pub fn deliver_failure(self, system: &ActorSystem<M>, error: ActorError) -> bool {
    self.fulfill(system, Payload::Failure(error))
  }

  fn fulfill(self, system: &ActorSystem<M>, payload: Payload<M>) -> bool {
    let Some((target, stages)) = reply_route(self.sender, &self.stages) else {
      trace!(responder = %self.responder, request = %self.request_id, "anonymous request, response dropped");
      return false;
    };
    let envelope = MessageEnvelope::with_stages(Some(self.responder), self.request_id.response_id(), stages, payload);
    system.deliver(&target, envelope);
    true
  }
}

impl<M> fmt::Debug for ResponsePromise<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResponsePromise")
      .field("responder", &self.responder)
      .field("sender", &self.sender)
      .field("request_id", &self.request_id)
      .finish_non_exhaustive()
  }
}
