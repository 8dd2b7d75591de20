/// Construction options for [`PriorityMailbox`](super::PriorityMailbox).
///
/// A round credits the urgent lane `quantum * high_priority_weight` units of work and the
/// default lane `quantum * default_weight`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MailboxOptions {
  /// Base credit per weight unit and round.
  pub quantum:              usize,
  /// Weight of the default lane.
  pub default_weight:       usize,
  /// Weight of the urgent lane.
  pub high_priority_weight: usize,
}

impl MailboxOptions {
  /// Default base credit.
  pub const DEFAULT_QUANTUM: usize = 10;

  /// Options with the default weights (`1` for the default lane, `2` for the urgent lane).
  #[must_use]
  pub const fn new() -> Self {
    Self { quantum: Self::DEFAULT_QUANTUM, default_weight: 1, high_priority_weight: 2 }
  }

  /// Sets the base credit. Zero is raised to one.
  #[must_use]
  pub const fn with_quantum(mut self, quantum: usize) -> Self {
    self.quantum = if quantum == 0 { 1 } else { quantum };
    self
  }

  /// Sets the default lane weight. Zero is raised to one.
  #[must_use]
  pub const fn with_default_weight(mut self, weight: usize) -> Self {
    self.default_weight = if weight == 0 { 1 } else { weight };
    self
  }

  /// Sets the urgent lane weight. Zero is raised to one.
  #[must_use]
  pub const fn with_high_priority_weight(mut self, weight: usize) -> Self {
    self.high_priority_weight = if weight == 0 { 1 } else { weight };
    self
  }
}

impl Default for MailboxOptions {
  fn default() -> Self {
    Self::new()
  }
}
