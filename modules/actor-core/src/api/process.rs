/// Dead letter hub and records.
pub mod dead_letter;
/// Actor identity.
pub mod pid;
/// Directory of live actors.
pub mod process_registry;

pub use dead_letter::{DeadLetter, DeadLetterHub, DeadLetterListener, DeadLetterReason};
pub use pid::{ActorId, Pid};
pub use process_registry::ProcessRegistry;
