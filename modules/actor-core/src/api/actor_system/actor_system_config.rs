use crate::api::{mailbox::MailboxOptions, process::ProcessRegistry};

/// Configuration passed to [`ActorSystem::new`](super::ActorSystem::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorSystemConfig {
  /// Options applied to every mailbox.
  pub mailbox:       MailboxOptions,
  /// Maximum number of envelopes an actor handles per resume before yielding its worker.
  pub throughput:    usize,
  /// Generation stamped into every pid of this system.
  pub generation:    u32,
  /// Number of exit reasons remembered after actors leave the directory.
  pub exit_capacity: usize,
}

impl ActorSystemConfig {
  /// Default throughput per resume.
  pub const DEFAULT_THROUGHPUT: usize = 300;

  /// Configuration with default mailbox options and throughput.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      mailbox: MailboxOptions::new(),
      throughput: Self::DEFAULT_THROUGHPUT,
      generation: 0,
      exit_capacity: ProcessRegistry::<(), ()>::DEFAULT_EXIT_CAPACITY,
    }
  }

  /// Replaces the mailbox options.
  #[must_use]
  pub const fn with_mailbox(mut self, mailbox: MailboxOptions) -> Self {
    self.mailbox = mailbox;
    self
  }

  /// Sets the throughput. Zero is raised to one.
  #[must_use]
  pub const fn with_throughput(mut self, throughput: usize) -> Self {
    self.throughput = if throughput == 0 { 1 } else { throughput };
    self
  }

  /// Sets the pid generation.
  #[must_use]
  pub const fn with_generation(mut self, generation: u32) -> Self {
    self.generation = generation;
    self
  }

  /// Sets how many exit reasons outlive deregistration.
  #[must_use]
  pub const fn with_exit_capacity(mut self, exit_capacity: usize) -> Self {
    self.exit_capacity = exit_capacity;
    self
  }
}

impl Default for ActorSystemConfig {
  fn default() -> Self {
    Self::new()
  }
}
