use alloc::vec::Vec;

use super::{DownSignal, ExitSignal, MessageId, MessagePriority, Payload};
use crate::api::{
  failure::{ActorError, ExitReason},
  process::Pid,
};

#[cfg(test)]
mod tests;

/// Unit of mailbox traffic. Immutable once constructed.
#[derive(Clone, Debug)]
pub struct MessageEnvelope<M> {
  sender:     Option<Pid>,
  message_id: MessageId,
  stages:     Vec<Pid>,
  payload:    Payload<M>,
}

impl<M> MessageEnvelope<M> {
  /// Creates an envelope without forwarding stages.
  #[must_use]
  pub const fn new(sender: Option<Pid>, message_id: MessageId, payload: Payload<M>) -> Self {
    Self { sender, message_id, stages: Vec::new(), payload }
  }

  /// Creates an envelope that still has to pass through `stages`; the last stage receives the reply.
  #[must_use]
  pub const fn with_stages(sender: Option<Pid>, message_id: MessageId, stages: Vec<Pid>, payload: Payload<M>) -> Self {
    Self { sender, message_id, stages, payload }
  }

  /// Asynchronous user message.
  #[must_use]
  pub const fn user(sender: Option<Pid>, message: M, priority: MessagePriority) -> Self {
    Self::new(sender, MessageId::asynchronous(priority), Payload::User(message))
  }

  /// Exit signal envelope.
  #[must_use]
  pub const fn exit(source: Option<Pid>, reason: ExitReason) -> Self {
    Self::new(source, MessageId::asynchronous(MessagePriority::Normal), Payload::Exit(ExitSignal { source, reason }))
  }

  /// Monitor notification envelope.
  #[must_use]
  pub const fn down(source: Pid, reason: ExitReason) -> Self {
    Self::new(Some(source), MessageId::asynchronous(MessagePriority::Normal), Payload::Down(DownSignal { source, reason }))
  }

  /// Sender, if the envelope was sent from inside an actor.
  #[must_use]
  pub const fn sender(&self) -> Option<Pid> {
    self.sender
  }

  /// Correlation id.
  #[must_use]
  pub const fn message_id(&self) -> MessageId {
    self.message_id
  }

  /// Priority derived from the correlation id.
  #[must_use]
  pub const fn priority(&self) -> MessagePriority {
    self.message_id.priority()
  }

  /// Remaining forwarding stages, in order.
  #[must_use]
  pub fn stages(&self) -> &[Pid] {
    &self.stages
  }

  /// Payload reference.
  #[must_use]
  pub const fn payload(&self) -> &Payload<M> {
    &self.payload
  }

  /// Every envelope accounts for one unit of mailbox work.
  #[must_use]
  pub const fn task_size(&self) -> usize {
    1
  }

  /// `true` when the sender awaits a response.
  #[must_use]
  pub const fn is_request(&self) -> bool {
    self.message_id.is_request()
  }

  /// Where a response to this envelope goes: the last stage if any, otherwise the sender.
  #[must_use]
  pub fn reply_target(&self) -> Option<Pid> {
    self.stages.last().copied().or(self.sender)
  }

  /// Builds the response to this request, returning it with its destination.
  ///
  /// Returns `None` for non-requests and for requests without anyone to reply to.
  #[must_use]
  pub fn response(&self, responder: Option<Pid>, payload: Payload<M>) -> Option<(Pid, MessageEnvelope<M>)> {
    if !self.is_request() {
      return None;
    }
    let (target, stages) = reply_route(self.sender, &self.stages)?;
    Some((target, MessageEnvelope::with_stages(responder, self.message_id.response_id(), stages, payload)))
  }

  /// Failure response reporting that `responder` terminated with `reason`.
  #[must_use]
  pub fn bounce(&self, responder: Pid, reason: ExitReason) -> Option<(Pid, MessageEnvelope<M>)> {
    self.response(Some(responder), Payload::Failure(ActorError::RequestReceiverDown(reason)))
  }

  /// Consumes the envelope, returning the payload.
  pub fn into_payload(self) -> Payload<M> {
    self.payload
  }

  /// Consumes the envelope, returning `(sender, message_id, stages, payload)`.
  pub fn into_parts(self) -> (Option<Pid>, MessageId, Vec<Pid>, Payload<M>) {
    (self.sender, self.message_id, self.stages, self.payload)
  }
}

/// Destination of a reply and the stages it still has to travel back through.
pub(crate) fn reply_route(sender: Option<Pid>, stages: &[Pid]) -> Option<(Pid, Vec<Pid>)> {
  match stages.split_last() {
    | Some((last, rest)) => Some((*last, rest.to_vec())),
    | None => sender.map(|sender| (sender, Vec::new())),
  }
}
