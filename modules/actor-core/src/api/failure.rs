mod actor_error;
mod exit_reason;

pub use actor_error::ActorError;
pub use exit_reason::ExitReason;
