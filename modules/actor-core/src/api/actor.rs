mod actor_context;
mod actor_handle;
/// `ask` from non-actor code.
pub mod ask;
mod behavior;
mod deferred_actor;
mod processing_permit;
mod request_tracker;
mod response_promise;
mod resume_result;

pub use actor_context::ActorContext;
pub(crate) use actor_context::CurrentMessage;
pub use actor_handle::ActorHandle;
pub use ask::{AskError, AskFuture, AskResult};
pub use behavior::{from_fn, Behavior, ExitDirective, FnBehavior};
pub use deferred_actor::DeferredActor;
pub use processing_permit::ProcessingPermit;
pub use request_tracker::RequestTracker;
pub use response_promise::ResponsePromise;
pub use resume_result::ResumeResult;
