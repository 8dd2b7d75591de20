mod ask_behavior;
mod ask_error;
mod ask_future;

pub(crate) use ask_behavior::AskBehavior;
pub use ask_error::AskError;
pub use ask_future::AskFuture;

/// Result alias used by `ask` helpers.
pub type AskResult<T> = Result<T, AskError>;
