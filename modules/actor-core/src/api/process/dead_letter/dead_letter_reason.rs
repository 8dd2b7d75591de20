use core::fmt;

/// Reason why an envelope was routed to dead letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadLetterReason {
  /// No process is registered for the given pid.
  UnregisteredPid,
  /// The process closed its mailbox and discarded the envelope during cleanup.
  Terminated,
}

impl fmt::Display for DeadLetterReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::UnregisteredPid => f.write_str("unregistered pid"),
      | Self::Terminated => f.write_str("terminated"),
    }
  }
}
