//! Envelopes that reached no actor.

mod dead_letter_hub;
mod dead_letter_reason;


pub use dead_letter_hub::{DeadLetterHub, DeadLetterListener};
pub use dead_letter_reason::DeadLetterReason;

use crate::api::process::pid::Pid;

/// Envelope that could not be delivered and expected no reply.
#[derive(Debug, Clone)]
pub struct DeadLetter<M> {
  /// Pid the envelope was addressed to.
  pub pid:     Pid,
  /// The undeliverable envelope.
  pub message: M,
  /// Why delivery failed.
  pub reason:  DeadLetterReason,
}

impl<M> DeadLetter<M> {
  /// Bundles an undeliverable `message` with its addressee.
  pub const fn new(pid: Pid, message: M, reason: DeadLetterReason) -> Self {
    Self { pid, message, reason }
  }
}
