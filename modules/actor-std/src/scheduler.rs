mod tokio_scheduler;

pub use tokio_scheduler::{tokio_actor_system, TokioScheduler};
