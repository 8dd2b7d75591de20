//! Scheduler collaborator interface.

mod delayed_delivery;
mod resume_job;

use core::time::Duration;

pub use delayed_delivery::DelayedDelivery;
use maildrop_utils_core_rs::Element;
pub use resume_job::ResumeJob;

/// Executes resume jobs and delayed deliveries.
///
/// Implementations decide on which worker a job runs. A job returning
/// [`ResumeResult::ResumeLater`](crate::api::actor::ResumeResult::ResumeLater) must be run again;
/// the other results end the job.
pub trait Scheduler<M: Element>: Send + Sync {
  /// Queues `job` for execution.
  fn schedule(&self, job: ResumeJob<M>);

  /// Runs `delivery` once `delay` has elapsed.
  fn delay_send(&self, delay: Duration, delivery: DelayedDelivery<M>);
}
