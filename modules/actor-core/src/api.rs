/// Behaviors, contexts, handles and the ask pattern.
pub mod actor;
/// System facade wiring directory, scheduler and configuration.
pub mod actor_system;
/// Exit reasons and failure payloads.
pub mod failure;
/// Priority mailbox.
pub mod mailbox;
/// Envelopes, payloads and correlation ids.
pub mod messaging;
/// Monitors and termination observers.
pub mod monitor;
/// Actor identity, directory and dead letters.
pub mod process;
/// Scheduler collaborator interface.
pub mod scheduler;
/// Deterministic scheduler and probe behaviors for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
