use alloc::collections::BTreeSet;

use crate::api::messaging::{MessageId, MessagePriority};


/// Actor-local request correlation state.
///
/// Issues strictly increasing request ids and remembers which response ids are still
/// outstanding. The first response for an id, real reply or synthetic timeout, resolves it;
/// anything arriving later is stale.
#[derive(Debug, Default)]
pub struct RequestTracker {
  last_request_id: u64,
  awaiting:        BTreeSet<MessageId>,
}

impl RequestTracker {
  /// Creates a tracker that has issued nothing yet.
  #[must_use]
  pub const fn new() -> Self {
    Self { last_request_id: 0, awaiting: BTreeSet::new() }
  }

  /// Issues the next request id tagged with `priority`.
  pub fn new_request_id(&mut self, priority: MessagePriority) -> MessageId {
    self.last_request_id = if self.last_request_id >= MessageId::MAX_COUNTER { 1 } else { self.last_request_id + 1 };
    MessageId::request(self.last_request_id, priority)
  }

  /// Starts waiting for `response_id`.
  pub fn await_response(&mut self, response_id: MessageId) {
    self.awaiting.insert(response_id);
  }

  /// Resolves `response_id`. Returns `false` when it was not (or no longer) awaited.
  pub fn resolve(&mut self, response_id: MessageId) -> bool {
    self.awaiting.remove(&response_id)
  }

  /// `true` while `response_id` is outstanding.
  #[must_use]
  pub fn is_awaiting(&self, response_id: MessageId) -> bool {
    self.awaiting.contains(&response_id)
  }

  /// Number of outstanding requests.
  #[must_use]
  pub fn awaiting_len(&self) -> usize {
    self.awaiting.len()
  }

  /// Last counter value issued.
  #[must_use]
  pub const fn last_request_id(&self) -> u64 {
    self.last_request_id
  }
}
