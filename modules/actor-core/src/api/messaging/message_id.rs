use core::fmt;

use super::MessagePriority;


const RESPONSE_FLAG: u64 = 1;
const HIGH_PRIORITY_FLAG: u64 = 1 << 1;
const COUNTER_SHIFT: u32 = 2;

/// Correlation id attached to every envelope.
///
/// Bit layout: bit 0 marks a response, bit 1 marks high priority, the remaining bits carry the
/// actor-local request counter. A counter of zero denotes an asynchronous message. Because the
/// counter sits above the flag bits, ids issued by one actor grow strictly with the counter no
/// matter which priority they carry.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
  /// Largest counter value that fits next to the flag bits.
  pub const MAX_COUNTER: u64 = u64::MAX >> COUNTER_SHIFT;

  /// Id for a message that expects no reply.
  #[must_use]
  pub const fn asynchronous(priority: MessagePriority) -> Self {
    Self(Self::priority_bits(priority))
  }

  /// Request id for the given counter value. The counter is truncated to [`Self::MAX_COUNTER`].
  #[must_use]
  pub const fn request(counter: u64, priority: MessagePriority) -> Self {
    Self(((counter & Self::MAX_COUNTER) << COUNTER_SHIFT) | Self::priority_bits(priority))
  }

  /// Rebuilds an id from its raw representation.
  #[must_use]
  pub const fn from_raw(raw: u64) -> Self {
    Self(raw)
  }

  /// Raw 64-bit representation.
  #[must_use]
  pub const fn integer_value(self) -> u64 {
    self.0
  }

  /// Actor-local request counter.
  #[must_use]
  pub const fn counter(self) -> u64 {
    self.0 >> COUNTER_SHIFT
  }

  /// `true` when no reply is expected.
  #[must_use]
  pub const fn is_async(self) -> bool {
    self.counter() == 0
  }

  /// `true` for a request awaiting a response.
  #[must_use]
  pub const fn is_request(self) -> bool {
    !self.is_async() && !self.is_response()
  }

  /// `true` for a response.
  #[must_use]
  pub const fn is_response(self) -> bool {
    self.0 & RESPONSE_FLAG != 0
  }

  /// Id of the response matching this request. Asynchronous ids are returned unchanged.
  #[must_use]
  pub const fn response_id(self) -> Self {
    if self.is_async() {
      self
    } else {
      Self(self.0 | RESPONSE_FLAG)
    }
  }

  /// Id of the request this response answers.
  #[must_use]
  pub const fn request_id(self) -> Self {
    Self(self.0 & !RESPONSE_FLAG)
  }

  /// Priority encoded in the id.
  #[must_use]
  pub const fn priority(self) -> MessagePriority {
    if self.0 & HIGH_PRIORITY_FLAG != 0 {
      MessagePriority::High
    } else {
      MessagePriority::Normal
    }
  }

  /// Same id with the given priority.
  #[must_use]
  pub const fn with_priority(self, priority: MessagePriority) -> Self {
    Self((self.0 & !HIGH_PRIORITY_FLAG) | Self::priority_bits(priority))
  }

  /// Same id tagged as high priority.
  #[must_use]
  pub const fn with_high_priority(self) -> Self {
    self.with_priority(MessagePriority::High)
  }

  const fn priority_bits(priority: MessagePriority) -> u64 {
    match priority {
      | MessagePriority::High => HIGH_PRIORITY_FLAG,
      | MessagePriority::Normal => 0,
    }
  }
}

impl fmt::Debug for MessageId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MessageId")
      .field("counter", &self.counter())
      .field("response", &self.is_response())
      .field("priority", &self.priority())
      .finish()
  }
}

impl fmt::Display for MessageId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let kind = if self.is_async() {
      "async"
    } else if self.is_response() {
      "response"
    } else {
      "request"
    };
    let urgent = if matches!(self.priority(), MessagePriority::High) { "!" } else { "" };
    write!(f, "{kind}#{}{urgent}", self.counter())
  }
}
