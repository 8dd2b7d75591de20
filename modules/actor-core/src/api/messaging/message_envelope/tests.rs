use alloc::vec;

use super::MessageEnvelope;
use crate::api::{
  failure::{ActorError, ExitReason},
  messaging::{MessageId, MessagePriority, Payload},
  process::{ActorId, Pid},
};

fn pid(id: u64) -> Pid {
  Pid::new(ActorId(id), 0)
}

#[test]
fn priority_follows_the_message_id() {
  let urgent = MessageEnvelope::user(None, 1_u32, MessagePriority::High);
  assert_eq!(urgent.priority(), MessagePriority::High);
  assert_eq!(urgent.task_size(), 1);

  let exit = MessageEnvelope::<u32>::exit(None, ExitReason::Kill);
  assert_eq!(exit.priority(), MessagePriority::Normal);
  assert!(exit.payload().is_control());
}

#[test]
fn response_goes_to_the_sender_without_stages() {
  let request = MessageEnvelope::new(Some(pid(1)), MessageId::request(4, MessagePriority::Normal), Payload::User(10_u32));
  let (target, response) = request.response(Some(pid(2)), Payload::User(11)).expect("request");

  assert_eq!(target, pid(1));
  assert_eq!(response.sender(), Some(pid(2)));
  assert_eq!(response.message_id(), request.message_id().response_id());
  assert!(response.stages().is_empty());
}

#[test]
fn response_goes_to_the_last_stage_when_forwarded() {
  let request = MessageEnvelope::with_stages(
    Some(pid(1)),
    MessageId::request(1, MessagePriority::Normal),
    vec![pid(5), pid(6)],
    Payload::User(0_u32),
  );
  assert_eq!(request.reply_target(), Some(pid(6)));

  let (target, response) = request.response(Some(pid(2)), Payload::User(1)).unwrap();
  assert_eq!(target, pid(6));
  assert_eq!(response.stages(), &[pid(5)]);
}

#[test]
fn asynchronous_messages_have_no_response() {
  let message = MessageEnvelope::user(Some(pid(1)), 3_u32, MessagePriority::Normal);
  assert!(message.response(Some(pid(2)), Payload::User(4)).is_none());
  assert!(message.bounce(pid(2), ExitReason::Kill).is_none());
}

#[test]
fn anonymous_requests_have_nobody_to_answer() {
  let request = MessageEnvelope::new(None, MessageId::request(2, MessagePriority::Normal), Payload::User(1_u32));
  assert!(request.bounce(pid(3), ExitReason::Normal).is_none());
}

#[test]
fn bounce_carries_the_receiver_down_reason() {
  let request = MessageEnvelope::new(Some(pid(1)), MessageId::request(9, MessagePriority::High), Payload::User(0_u32));
  let (target, bounced) = request.bounce(pid(2), ExitReason::Kill).unwrap();

  assert_eq!(target, pid(1));
  assert_eq!(bounced.priority(), MessagePriority::High);
  assert_eq!(bounced.into_payload(), Payload::Failure(ActorError::RequestReceiverDown(ExitReason::Kill)));
}
