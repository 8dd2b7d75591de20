use alloc::{collections::VecDeque, vec::Vec};

use maildrop_utils_core_rs::{collections::queue::QueueError, GatedMpscQueue};
use portable_atomic::{AtomicUsize, Ordering};

use crate::api::messaging::MessageEnvelope;

/// Shared half of a lane: what producers touch.
pub(super) struct LaneInbox<M> {
  queue:           GatedMpscQueue<MessageEnvelope<M>>,
  total_task_size: AtomicUsize,
}

impl<M> LaneInbox<M> {
  pub(super) const fn new() -> Self {
    Self { queue: GatedMpscQueue::new(), total_task_size: AtomicUsize::new(0) }
  }

  pub(super) fn offer(&self, envelope: MessageEnvelope<M>) -> Result<(), QueueError<MessageEnvelope<M>>> {
    let size = envelope.task_size();
    self.total_task_size.fetch_add(size, Ordering::SeqCst);
    self.queue.offer(envelope).inspect_err(|_| self.release(size))
  }

  pub(super) fn poll(&self) -> Option<MessageEnvelope<M>> {
    self.queue.poll()
  }

  pub(super) fn close(&self) -> bool {
    self.queue.close()
  }

  pub(super) fn drain(&self) -> Vec<MessageEnvelope<M>> {
    self.queue.drain()
  }

  pub(super) fn reserve(&self, size: usize) {
    self.total_task_size.fetch_add(size, Ordering::SeqCst);
  }

  pub(super) fn release(&self, size: usize) {
    self.total_task_size.fetch_sub(size, Ordering::SeqCst);
  }

  pub(super) fn total_task_size(&self) -> usize {
    self.total_task_size.load(Ordering::SeqCst)
  }

  pub(super) fn len(&self) -> usize {
    self.queue.len()
  }

  pub(super) fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }
}

/// Consumer-local half of a lane.
pub(super) struct LaneCursor<M> {
  pub(super) pending: VecDeque<MessageEnvelope<M>>,
  pub(super) cache:   VecDeque<MessageEnvelope<M>>,
  pub(super) deficit: usize,
}

impl<M> LaneCursor<M> {
  pub(super) const fn new() -> Self {
    Self { pending: VecDeque::new(), cache: VecDeque::new(), deficit: 0 }
  }

  /// Task size of the next envelope, pulling one from the inbox if nothing is pending.
  pub(super) fn front_task_size(&mut self, inbox: &LaneInbox<M>) -> Option<usize> {
    if self.pending.is_empty() {
      let envelope = inbox.poll()?;
      self.pending.push_back(envelope);
    }
    self.pending.front().map(MessageEnvelope::task_size)
  }

  /// Credits `credit` and moves every envelope it covers into `batch`.
  pub(super) fn run_round(&mut self, inbox: &LaneInbox<M>, credit: usize, batch: &mut Vec<MessageEnvelope<M>>) {
    self.deficit = self.deficit.saturating_add(credit);
    loop {
      let Some(size) = self.front_task_size(inbox) else {
        self.deficit = 0;
        return;
      };
      if size > self.deficit {
        return;
      }
      let Some(envelope) = self.pending.pop_front() else {
        return;
      };
      self.deficit -= size;
      inbox.release(size);
      batch.push(envelope);
    }
  }

  /// Prepends the cached envelopes to the pending queue, keeping arrival order.
  pub(super) fn release_cached(&mut self) -> usize {
    let released = self.cache.len();
    if released > 0 {
      let mut merged = core::mem::take(&mut self.cache);
      merged.append(&mut self.pending);
      self.pending = merged;
    }
    released
  }

  /// Everything the consumer still holds for this lane, oldest first: cache, then pending.
  pub(super) fn take_all(&mut self) -> impl Iterator<Item = MessageEnvelope<M>> + '_ {
    self.cache.drain(..).chain(self.pending.drain(..))
  }
}
