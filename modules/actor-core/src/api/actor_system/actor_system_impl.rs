use alloc::{boxed::Box, sync::Arc};
use core::time::Duration;

use maildrop_utils_core_rs::{sync::ArcShared, Element};
use tracing::{debug, trace};

use super::ActorSystemConfig;
use crate::api::{
  actor::{ask::AskBehavior, ActorHandle, AskFuture, Behavior, DeferredActor},
  failure::ExitReason,
  mailbox::MailboxError,
  messaging::{MessageEnvelope, MessagePriority},
  monitor::{Attachable, FunctorAttachable, MonitorAttachable, ObserveToken},
  process::{DeadLetter, DeadLetterListener, DeadLetterReason, Pid, ProcessRegistry},
  scheduler::{DelayedDelivery, ResumeJob, Scheduler},
};


struct ActorSystemInner<M: Element> {
  config:    ActorSystemConfig,
  registry:  ProcessRegistry<ActorHandle<M>, MessageEnvelope<M>>,
  scheduler: ArcShared<dyn Scheduler<M>>,
}

/// Entry point wiring the directory, the scheduler and the configuration together.
///
/// Cheap to clone; every clone refers to the same system.
pub struct ActorSystem<M: Element> {
  inner: ArcShared<ActorSystemInner<M>>,
}

impl<M: Element> Clone for ActorSystem<M> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<M: Element> ActorSystem<M> {
  /// Creates a system driven by `scheduler`.
  #[must_use]
  pub fn new(config: ActorSystemConfig, scheduler: ArcShared<dyn Scheduler<M>>) -> Self {
    let registry = ProcessRegistry::with_exit_capacity(config.generation, config.exit_capacity);
    Self { inner: ArcShared::new(ActorSystemInner { config, registry, scheduler }) }
  }

  /// Active configuration.
  #[must_use]
  pub fn config(&self) -> &ActorSystemConfig {
    &self.inner.config
  }

  /// Directory of live actors.
  #[must_use]
  pub fn registry(&self) -> &ProcessRegistry<ActorHandle<M>, MessageEnvelope<M>> {
    &self.inner.registry
  }

  /// Resolves a pid to its handle.
  #[must_use]
  pub fn resolve(&self, pid: &Pid) -> Option<ArcShared<ActorHandle<M>>> {
    self.inner.registry.resolve(pid)
  }

  /// Spawns and starts an actor.
  pub fn spawn<B>(&self, behavior: B) -> Pid
  where
    B: Behavior<M> + 'static, {
    self.spawn_deferred(behavior).start()
  }

  /// Registers an actor without starting it. Envelopes sent to it are cached until
  /// [`DeferredActor::start`].
  pub fn spawn_deferred<B>(&self, behavior: B) -> DeferredActor<M>
  where
    B: Behavior<M> + 'static, {
    let registry = &self.inner.registry;
    let pid = registry.allocate_pid();
    let handle = ArcShared::new(ActorHandle::new(pid, Box::new(behavior), self.inner.config.mailbox));
    registry.register(pid, handle.clone());
    debug!(pid = %pid, "actor spawned");
    DeferredActor::new(handle, self.clone())
  }

  /// Sends an anonymous asynchronous message.
  pub fn send(&self, target: &Pid, message: M) {
    self.send_with_priority(target, message, MessagePriority::Normal);
  }

  /// Sends an anonymous asynchronous message on the given lane.
  pub fn send_with_priority(&self, target: &Pid, message: M, priority: MessagePriority) {
    self.deliver(target, MessageEnvelope::user(None, message, priority));
  }

  /// Enqueues `envelope` into `target`'s mailbox, scheduling the actor when it was idle.
  ///
  /// Undeliverable requests are answered with `RequestReceiverDown`, other undeliverable
  /// envelopes go to dead letters and control envelopes are dropped.
  pub fn deliver(&self, target: &Pid, envelope: MessageEnvelope<M>) {
    let Some(handle) = self.inner.registry.resolve(target) else {
      match self.inner.registry.exit_reason(target) {
        | Some(reason) => self.reject(target, envelope, &reason, DeadLetterReason::Terminated),
        | None => self.reject(target, envelope, &ExitReason::Unknown, DeadLetterReason::UnregisteredPid),
      }
      return;
    };
    match handle.enqueue(envelope) {
      | Ok(outcome) => {
        if outcome.is_unblocked() {
          self.schedule(handle);
        }
      },
      | Err(MailboxError::Closed(envelope)) => {
        let reason = handle
          .final_reason()
          .or_else(|| self.inner.registry.exit_reason(target))
          .unwrap_or(ExitReason::Unknown);
        self.reject(target, envelope, &reason, DeadLetterReason::Terminated);
      },
    }
  }

  /// Sends an anonymous exit signal.
  pub fn send_exit(&self, target: &Pid, reason: ExitReason) {
    self.send_exit_from(None, target, reason);
  }

  /// Sends an exit signal on behalf of `source`. A target that cannot take it is ignored.
  pub fn send_exit_from(&self, source: Option<Pid>, target: &Pid, reason: ExitReason) {
    self.deliver(target, MessageEnvelope::exit(source, reason));
  }

  /// Makes `observer` receive a `Down` when `target` terminates.
  ///
  /// A target that already terminated produces the `Down` immediately, carrying the recorded
  /// reason. [`ExitReason::Unknown`] is only used for pids the system never saw or no longer
  /// remembers.
  pub fn monitor(&self, observer: &Pid, target: &Pid) {
    self.attach(target, Box::new(MonitorAttachable::new(*observer)));
  }

  /// Removes one monitor of `observer` on `target` without firing it.
  pub fn demonitor(&self, observer: &Pid, target: &Pid) -> bool {
    self.inner.registry.resolve(target).is_some_and(|handle| handle.detach(&ObserveToken::monitor(*observer)))
  }

  /// Binds `attachable` to `target`; fires at once if the target does not resolve, with its
  /// recorded exit reason or [`ExitReason::Unknown`].
  pub fn attach(&self, target: &Pid, attachable: Box<dyn Attachable<M>>) {
    match self.inner.registry.resolve(target) {
      | Some(handle) => handle.attach(attachable, self),
      | None => {
        let reason = self.inner.registry.exit_reason(target).unwrap_or(ExitReason::Unknown);
        attachable.actor_exited(*target, &reason, self);
      },
    }
  }

  /// Runs `callback` once `target` terminates.
  pub fn attach_functor<F>(&self, target: &Pid, callback: F)
  where
    F: FnOnce(Pid, &ExitReason) + Send + 'static, {
    self.attach(target, Box::new(FunctorAttachable::new(callback)));
  }

  /// Sends `message` as a request from a temporary actor and resolves with the reply.
  ///
  /// A zero `timeout` waits forever.
  pub fn ask(&self, target: &Pid, message: M, timeout: Duration) -> AskFuture<M> {
    let (behavior, future) = AskBehavior::new(*target, message, timeout);
    self.spawn(behavior);
    future
  }

  /// Subscribes to envelopes that could not be delivered.
  pub fn subscribe_dead_letters<F>(&self, listener: F)
  where
    F: Fn(&DeadLetter<MessageEnvelope<M>>) + Send + Sync + 'static, {
    let listener: Arc<DeadLetterListener<MessageEnvelope<M>>> = Arc::new(listener);
    self.inner.registry.subscribe_dead_letters(ArcShared::from_arc(listener));
  }

  /// Terminates every registered actor with [`ExitReason::UserShutdown`]. Returns how many
  /// were cleaned up directly.
  pub fn shutdown(&self) -> usize {
    let pids = self.inner.registry.pids();
    debug!(actors = pids.len(), "actor system shutting down");
    pids
      .iter()
      .filter_map(|pid| self.inner.registry.resolve(pid))
      .filter(|handle| handle.terminate(self, ExitReason::UserShutdown))
      .count()
  }

  /// Delivers `envelope` to `target` after `delay`, through the scheduler.
  pub fn delay_send(&self, delay: Duration, target: Pid, envelope: MessageEnvelope<M>) {
    self.inner.scheduler.delay_send(delay, DelayedDelivery::new(self.clone(), target, envelope));
  }

  pub(crate) fn schedule(&self, handle: ArcShared<ActorHandle<M>>) {
    self.inner.scheduler.schedule(ResumeJob::new(handle, self.clone()));
  }

  /// Disposes of an envelope `target` will never process.
  pub(crate) fn reject(
    &self,
    target: &Pid,
    envelope: MessageEnvelope<M>,
    reason: &ExitReason,
    dead_letter_reason: DeadLetterReason,
  ) {
    if envelope.payload().is_control() {
      trace!(target = %target, "control envelope dropped");
      return;
    }
    if let Some((reply_to, bounce)) = envelope.bounce(*target, reason.clone()) {
      self.deliver(&reply_to, bounce);
      return;
    }
    let listeners = self.inner.registry.publish_dead_letter(&DeadLetter::new(*target, envelope, dead_letter_reason));
    trace!(target = %target, reason = %dead_letter_reason, listeners, "dead letter");
  }
}
