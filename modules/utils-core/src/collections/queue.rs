//! no_std-friendly queue primitives shared between runtimes.

mod gated_mpsc_queue;
mod queue_error;

pub use gated_mpsc_queue::GatedMpscQueue;
pub use queue_error::QueueError;
