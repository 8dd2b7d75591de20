use core::fmt;

use maildrop_utils_core_rs::{sync::ArcShared, Element};

use crate::api::{
  actor::{ActorHandle, ResumeResult},
  actor_system::ActorSystem,
  process::Pid,
};

/// Unit of work handed to the scheduler: resume one actor.
pub struct ResumeJob<M: Element> {
  handle: ArcShared<ActorHandle<M>>,
  system: ActorSystem<M>,
}

impl<M: Element> ResumeJob<M> {
  pub(crate) const fn new(handle: ArcShared<ActorHandle<M>>, system: ActorSystem<M>) -> Self {
    Self { handle, system }
  }

  /// Actor this job resumes.
  #[must_use]
  pub fn pid(&self) -> Pid {
    self.handle.pid()
  }

  /// Runs one slice of the actor.
  pub fn run(&self) -> ResumeResult {
    self.handle.resume(&self.system)
  }
}

impl<M: Element> fmt::Debug for ResumeJob<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResumeJob").field("pid", &self.pid()).finish()
  }
}
