use alloc::{collections::VecDeque, sync::Arc, vec::Vec};
use core::time::Duration;

use maildrop_utils_core_rs::{sync::ArcShared, Element};
use spin::Mutex;

use crate::api::{
  actor::ResumeResult,
  actor_system::{ActorSystem, ActorSystemConfig},
  scheduler::{DelayedDelivery, ResumeJob, Scheduler},
};

struct Timer<M: Element> {
  due:      Duration,
  sequence: u64,
  delivery: DelayedDelivery<M>,
}

struct ManualState<M: Element> {
  jobs:     VecDeque<ResumeJob<M>>,
  timers:   Vec<Timer<M>>,
  now:      Duration,
  sequence: u64,
}

/// Scheduler that runs nothing on its own.
///
/// Jobs run when the test calls [`ManualScheduler::run_until_idle`]; delayed deliveries fire
/// when the virtual clock is moved with [`ManualScheduler::advance`].
pub struct ManualScheduler<M: Element> {
  state: Mutex<ManualState<M>>,
}

impl<M: Element> ManualScheduler<M> {
  /// Creates an idle scheduler with the clock at zero.
  #[must_use]
  pub const fn new() -> Self {
    Self { state: Mutex::new(ManualState { jobs: VecDeque::new(), timers: Vec::new(), now: Duration::ZERO, sequence: 0 }) }
  }

  /// Builds a system driven by a new manual scheduler.
  #[must_use]
  pub fn system(config: ActorSystemConfig) -> (ActorSystem<M>, ArcShared<Self>) {
    let scheduler = Arc::new(Self::new());
    let dynamic: Arc<dyn Scheduler<M>> = scheduler.clone();
    (ActorSystem::new(config, ArcShared::from_arc(dynamic)), ArcShared::from_arc(scheduler))
  }

  /// Runs queued jobs until none is left. Returns the number of job runs.
  pub fn run_until_idle(&self) -> usize {
    let mut runs = 0;
    loop {
      let Some(job) = self.state.lock().jobs.pop_front() else {
        return runs;
      };
      runs += 1;
      if job.run() == ResumeResult::ResumeLater {
        self.state.lock().jobs.push_back(job);
      }
    }
  }

  /// Moves the clock forward, fires every due delivery in due order, then runs jobs until idle.
  /// Returns the number of deliveries fired.
  pub fn advance(&self, by: Duration) -> usize {
    let due = {
      let mut state = self.state.lock();
      state.now += by;
      let now = state.now;
      let (mut due, pending): (Vec<_>, Vec<_>) = state.timers.drain(..).partition(|timer| timer.due <= now);
      state.timers = pending;
      due.sort_by_key(|timer| (timer.due, timer.sequence));
      due
    };
    let fired = due.len();
    for timer in due {
      timer.delivery.deliver();
    }
    self.run_until_idle();
    fired
  }

  /// Current virtual time.
  #[must_use]
  pub fn now(&self) -> Duration {
    self.state.lock().now
  }

  /// Number of jobs waiting to run.
  #[must_use]
  pub fn pending_jobs(&self) -> usize {
    self.state.lock().jobs.len()
  }

  /// Number of deliveries waiting for the clock.
  #[must_use]
  pub fn pending_timers(&self) -> usize {
    self.state.lock().timers.len()
  }
}

impl<M: Element> Default for ManualScheduler<M> {
  fn default() -> Self {
    Self::new()
  }
}

impl<M: Element> Scheduler<M> for ManualScheduler<M> {
  fn schedule(&self, job: ResumeJob<M>) {
    self.state.lock().jobs.push_back(job);
  }

  fn delay_send(&self, delay: Duration, delivery: DelayedDelivery<M>) {
    let mut state = self.state.lock();
    state.sequence += 1;
    let timer = Timer { due: state.now + delay, sequence: state.sequence, delivery };
    state.timers.push(timer);
  }
}
