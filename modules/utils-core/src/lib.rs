//! maildrop utils core
//!
//! `no_std` building blocks shared by the actor crates: an `Arc` wrapper with a uniform
//! shared-access API, an atomic one-way flag, and a closable lock-free MPSC queue.

#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::len_without_is_empty)]
#![no_std]

extern crate alloc;

/// Collection primitives (element bound, queues).
pub mod collections;
/// Shared ownership and synchronization helpers.
pub mod sync;

pub use collections::{
  queue::{GatedMpscQueue, QueueError},
  Element,
};
pub use sync::{ArcShared, Flag};
