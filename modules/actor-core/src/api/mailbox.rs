//! Two-lane priority mailbox.

mod enqueue_outcome;
mod mailbox_error;
mod mailbox_options;
/// Mailbox halves and the DRR round.
pub mod priority_mailbox;

pub use enqueue_outcome::EnqueueOutcome;
pub use mailbox_error::MailboxError;
pub use mailbox_options::MailboxOptions;
pub use priority_mailbox::{build_priority_mailbox, PriorityMailbox, PriorityMailboxProducer};
