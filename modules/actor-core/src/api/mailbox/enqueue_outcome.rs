/// Result of a successful enqueue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueOutcome {
  /// The envelope was queued; the actor was already scheduled.
  Accepted,
  /// The envelope was queued and this call moved the mailbox from idle to scheduled.
  /// The caller must ask the scheduler to resume the actor.
  Unblocked,
}

impl EnqueueOutcome {
  /// `true` when the caller has to schedule the actor.
  #[must_use]
  pub const fn is_unblocked(self) -> bool {
    matches!(self, Self::Unblocked)
  }
}
