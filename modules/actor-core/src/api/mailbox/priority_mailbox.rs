use alloc::vec::Vec;

use maildrop_utils_core_rs::sync::{ArcShared, Flag};
use tracing::trace;

use super::{EnqueueOutcome, MailboxError, MailboxOptions};
use crate::api::messaging::{MessageEnvelope, MessagePriority};

mod lane;


use lane::{LaneCursor, LaneInbox};

const URGENT: usize = 0;
const DEFAULT: usize = 1;
const LANES: [usize; 2] = [URGENT, DEFAULT];

/// State shared between the producer handles and the consumer half.
struct MailboxCore<M> {
  lanes:     [LaneInbox<M>; 2],
  closed:    Flag,
  scheduled: Flag,
  options:   MailboxOptions,
}

/// Builds a mailbox, returning the consumer half and a producer handle.
#[must_use]
pub fn build_priority_mailbox<M>(options: MailboxOptions) -> (PriorityMailbox<M>, PriorityMailboxProducer<M>) {
  let core = ArcShared::new(MailboxCore {
    lanes: [LaneInbox::new(), LaneInbox::new()],
    closed: Flag::default(),
    scheduled: Flag::default(),
    options,
  });
  let producer = PriorityMailboxProducer { core: core.clone() };
  (PriorityMailbox { core, lanes: [LaneCursor::new(), LaneCursor::new()] }, producer)
}

/// Producer handle. Cheap to clone; enqueue is lock-free.
pub struct PriorityMailboxProducer<M> {
  core: ArcShared<MailboxCore<M>>,
}

impl<M> Clone for PriorityMailboxProducer<M> {
  fn clone(&self) -> Self {
    Self { core: self.core.clone() }
  }
}

impl<M> PriorityMailboxProducer<M> {
  /// Routes the envelope to the lane its priority selects.
  ///
  /// # Errors
  /// Returns [`MailboxError::Closed`] with the envelope when the mailbox no longer accepts work.
  pub fn enqueue(&self, envelope: MessageEnvelope<M>) -> Result<EnqueueOutcome, MailboxError<MessageEnvelope<M>>> {
    let lane = &self.core.lanes[envelope.priority().lane_index()];
    lane.offer(envelope)?;
    if self.core.scheduled.raise() {
      Ok(EnqueueOutcome::Unblocked)
    } else {
      Ok(EnqueueOutcome::Accepted)
    }
  }

  /// `true` once the mailbox has been closed.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.core.closed.get()
  }
}

/// Consumer half of the mailbox.
///
/// Only one instance exists per mailbox and every draining operation takes `&mut self`, so
/// whoever owns it (the actor cell, behind the processing permit) is the single consumer.
pub struct PriorityMailbox<M> {
  core:  ArcShared<MailboxCore<M>>,
  lanes: [LaneCursor<M>; 2],
}

impl<M> PriorityMailbox<M> {
  /// Returns a new producer handle.
  #[must_use]
  pub fn producer(&self) -> PriorityMailboxProducer<M> {
    PriorityMailboxProducer { core: self.core.clone() }
  }

  /// Options the mailbox was built with.
  #[must_use]
  pub fn options(&self) -> MailboxOptions {
    self.core.options
  }

  /// Opens one DRR round and returns the envelopes it covers, urgent lane first.
  pub fn new_round(&mut self, quantum: usize) -> Vec<MessageEnvelope<M>> {
    let options = self.core.options;
    let mut batch = Vec::new();
    for index in LANES {
      let weight = if index == URGENT { options.high_priority_weight } else { options.default_weight };
      self.lanes[index].run_round(&self.core.lanes[index], quantum.saturating_mul(weight), &mut batch);
    }
    batch
  }

  /// Parks an envelope until [`Self::release_cached`] is called.
  pub fn cache(&mut self, envelope: MessageEnvelope<M>) {
    let index = envelope.priority().lane_index();
    self.core.lanes[index].reserve(envelope.task_size());
    self.lanes[index].cache.push_back(envelope);
  }

  /// Moves every cached envelope back in front of the pending ones. Returns how many moved.
  pub fn release_cached(&mut self) -> usize {
    self.lanes.iter_mut().map(LaneCursor::release_cached).sum()
  }

  /// Number of cached envelopes.
  #[must_use]
  pub fn cached_len(&self) -> usize {
    self.lanes.iter().map(|lane| lane.cache.len()).sum()
  }

  /// Closes the mailbox and hands back everything it still holds, urgent lane first and
  /// oldest first within a lane (cache, pending, inbox).
  ///
  /// The first call waits for producers that already passed the closed check to finish their
  /// push, so nothing accepted is left behind. Later calls return an empty vector.
  pub fn close(&mut self) -> Vec<MessageEnvelope<M>> {
    if !self.core.closed.raise() {
      return Vec::new();
    }
    for inbox in &self.core.lanes {
      inbox.close();
    }
    let mut drained = Vec::new();
    for index in LANES {
      let inbox = &self.core.lanes[index];
      let start = drained.len();
      drained.extend(self.lanes[index].take_all());
      drained.extend(inbox.drain());
      let released: usize = drained[start..].iter().map(MessageEnvelope::task_size).sum();
      inbox.release(released);
      self.lanes[index].deficit = 0;
    }
    trace!(drained = drained.len(), "mailbox closed");
    drained
  }

  /// `true` once the mailbox has been closed.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.core.closed.get()
  }

  /// `true` when a round would yield something (cached envelopes do not count).
  #[must_use]
  pub fn has_pending(&self) -> bool {
    LANES.iter().any(|&index| !self.lanes[index].pending.is_empty() || !self.core.lanes[index].is_empty())
  }

  /// Marks the mailbox idle.
  ///
  /// Returns `false` when work raced in after the last round; the caller then owns the
  /// scheduled state again and must keep draining.
  pub fn try_block(&self) -> bool {
    self.core.scheduled.set(false);
    !(self.has_pending() && self.core.scheduled.raise())
  }

  /// Claims the scheduled state without an enqueue. Returns `true` if the caller must schedule.
  pub fn try_schedule(&self) -> bool {
    self.core.scheduled.raise()
  }

  /// Active envelopes (pending and queued, excluding the cache).
  #[must_use]
  pub fn len(&self) -> usize {
    LANES.iter().map(|&index| self.lanes[index].pending.len() + self.core.lanes[index].len()).sum()
  }

  /// `true` when [`Self::len`] is zero.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    !self.has_pending()
  }

  /// Accumulated task size of a lane, including cached envelopes.
  #[must_use]
  pub fn total_task_size(&self, priority: MessagePriority) -> usize {
    self.core.lanes[priority.lane_index()].total_task_size()
  }
}
