use alloc::boxed::Box;

use maildrop_utils_core_rs::{sync::Flag, Element};
use spin::Mutex;

use super::{Behavior, ProcessingPermit, ResumeResult};
use crate::{
  api::{
    actor_system::ActorSystem,
    failure::ExitReason,
    mailbox::{build_priority_mailbox, EnqueueOutcome, MailboxError, MailboxOptions, PriorityMailboxProducer},
    messaging::MessageEnvelope,
    monitor::{Attachable, AttachableList, ObserveToken},
    process::Pid,
  },
  internal::actor_cell::ActorCell,
};

/// Shared handle of one actor, owned by the directory.
///
/// Producers only touch the mailbox producer; the cell (consumer half of the mailbox,
/// behavior, correlator) sits behind a lock whose guard is the [`ProcessingPermit`].
pub struct ActorHandle<M: Element> {
  pid:         Pid,
  producer:    PriorityMailboxProducer<M>,
  cell:        Mutex<ActorCell<M>>,
  attachables: AttachableList<M>,
  cleaned_up:  Flag,
}

impl<M: Element> ActorHandle<M> {
  pub(crate) fn new(pid: Pid, behavior: Box<dyn Behavior<M>>, options: MailboxOptions) -> Self {
    let (mailbox, producer) = build_priority_mailbox(options);
    Self {
      pid,
      producer,
      cell: Mutex::new(ActorCell::new(pid, mailbox, behavior)),
      attachables: AttachableList::new(),
      cleaned_up: Flag::default(),
    }
  }

  /// Pid of the actor.
  #[must_use]
  pub const fn pid(&self) -> Pid {
    self.pid
  }

  /// Enqueues an envelope into the actor's mailbox.
  ///
  /// # Errors
  /// Returns [`MailboxError::Closed`] with the envelope once the actor has terminated.
  pub fn enqueue(&self, envelope: MessageEnvelope<M>) -> Result<EnqueueOutcome, MailboxError<MessageEnvelope<M>>> {
    self.producer.enqueue(envelope)
  }

  /// Tries to become the single consumer. `None` while someone else holds the permit.
  #[must_use]
  pub fn try_acquire(&self) -> Option<ProcessingPermit<'_, M>> {
    self.cell.try_lock().map(|cell| ProcessingPermit::new(self, cell))
  }

  /// Waits for the permit. Must not be called from inside this actor's own handlers.
  #[must_use]
  pub fn acquire(&self) -> ProcessingPermit<'_, M> {
    ProcessingPermit::new(self, self.cell.lock())
  }

  /// Runs one scheduling slice if the permit is free.
  pub fn resume(&self, system: &ActorSystem<M>) -> ResumeResult {
    match self.try_acquire() {
      | Some(mut permit) => permit.resume(system),
      | None => ResumeResult::ResumeLater,
    }
  }

  /// Terminates the actor with `reason` right away.
  ///
  /// When the permit is busy (for instance because the caller runs inside this actor) an exit
  /// signal is sent instead. Returns `true` if this call performed the cleanup.
  pub fn terminate(&self, system: &ActorSystem<M>, reason: ExitReason) -> bool {
    match self.try_acquire() {
      | Some(mut permit) => permit.cleanup(system, reason),
      | None => {
        system.send_exit_from(None, &self.pid, reason);
        false
      },
    }
  }

  /// Registers an attachable, firing it at once if the actor already terminated.
  pub fn attach(&self, attachable: Box<dyn Attachable<M>>, system: &ActorSystem<M>) {
    self.attachables.attach(self.pid, attachable, system);
  }

  /// Removes the first attachable matching `token` without firing it.
  pub fn detach(&self, token: &ObserveToken) -> bool {
    self.attachables.detach(token)
  }

  /// Number of attachables still waiting for termination.
  #[must_use]
  pub fn attachable_count(&self) -> usize {
    self.attachables.len()
  }

  /// Final reason, once the attachables have been fired.
  #[must_use]
  pub fn final_reason(&self) -> Option<ExitReason> {
    self.attachables.final_reason()
  }

  /// `true` once cleanup started.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.cleaned_up.get()
  }

  pub(crate) fn begin_cleanup(&self) -> bool {
    self.cleaned_up.raise()
  }

  pub(crate) const fn attachables(&self) -> &AttachableList<M> {
    &self.attachables
  }
}
