/// Lane an envelope is routed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessagePriority {
  /// Default lane.
  #[default]
  Normal,
  /// Urgent lane, credited more per round.
  High,
}

impl MessagePriority {
  /// Lane index used by the mailbox (`0` urgent, `1` default).
  #[must_use]
  pub(crate) const fn lane_index(self) -> usize {
    match self {
      | Self::High => 0,
      | Self::Normal => 1,
    }
  }
}
