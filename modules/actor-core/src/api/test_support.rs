//! Deterministic scheduler and recording behaviors for tests and benches.

mod manual_scheduler;
mod probe;

pub use manual_scheduler::ManualScheduler;
pub use probe::{Probe, ProbeBehavior, ProbeEvent};
