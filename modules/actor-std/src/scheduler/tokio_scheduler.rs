use core::{marker::PhantomData, time::Duration};
use std::sync::Arc;

use maildrop_actor_core_rs::api::{
  actor::ResumeResult,
  actor_system::{ActorSystem, ActorSystemConfig},
  scheduler::{DelayedDelivery, ResumeJob, Scheduler},
};
use maildrop_utils_core_rs::{sync::ArcShared, Element};
use tokio::{runtime::Handle, task::yield_now};
use tracing::trace;

/// Scheduler running every resume job as a Tokio task.
///
/// A job that reports [`ResumeResult::ResumeLater`] cooperatively yields with
/// `tokio::task::yield_now` before running again, so one busy actor does not starve the others.
pub struct TokioScheduler<M: Element> {
  handle:  Handle,
  _marker: PhantomData<fn(M)>,
}

impl<M: Element> TokioScheduler<M> {
  /// Creates a scheduler spawning onto `handle`.
  #[must_use]
  pub const fn new(handle: Handle) -> Self {
    Self { handle, _marker: PhantomData }
  }

  /// Creates a scheduler for the runtime the caller runs in.
  ///
  /// # Errors
  /// Returns [`tokio::runtime::TryCurrentError`] outside a Tokio runtime.
  pub fn try_current() -> Result<Self, tokio::runtime::TryCurrentError> {
    Handle::try_current().map(Self::new)
  }

  /// Runtime handle jobs are spawned onto.
  #[must_use]
  pub const fn handle(&self) -> &Handle {
    &self.handle
  }

  /// Builds an actor system driven by this scheduler.
  #[must_use]
  pub fn into_system(self, config: ActorSystemConfig) -> ActorSystem<M> {
    let scheduler: Arc<dyn Scheduler<M>> = Arc::new(self);
    ActorSystem::new(config, ArcShared::from_arc(scheduler))
  }
}

impl<M: Element> Scheduler<M> for TokioScheduler<M> {
  fn schedule(&self, job: ResumeJob<M>) {
    self.handle.spawn(async move {
      while job.run() == ResumeResult::ResumeLater {
        yield_now().await;
      }
      trace!(pid = %job.pid(), "resume job finished");
    });
  }

  fn delay_send(&self, delay: Duration, delivery: DelayedDelivery<M>) {
    self.handle.spawn(async move {
      tokio::time::sleep(delay).await;
      delivery.deliver();
    });
  }
}

/// Builds an actor system on the current Tokio runtime.
///
/// # Errors
/// Returns [`tokio::runtime::TryCurrentError`] outside a Tokio runtime.
pub fn tokio_actor_system<M: Element>(
  config: ActorSystemConfig,
) -> Result<ActorSystem<M>, tokio::runtime::TryCurrentError> {
  TokioScheduler::try_current().map(|scheduler| scheduler.into_system(config))
}
