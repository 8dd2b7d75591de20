//! maildrop actor core
//!
//! Message-passing core of an actor runtime, independent of any executor.
//!
//! # Key Features
//! - Two-lane priority mailbox with deficit-round-robin rounds and a pre-start cache
//! - Exactly-once termination that closes the mailbox and bounces leftovers
//! - Exit signals, monitors and callback attachables
//! - Request/response correlation with optional timeouts
//! - `ask` futures for non-actor callers
//!
//! The scheduler is a collaborator behind [`api::scheduler::Scheduler`]; a deterministic
//! implementation lives in `api::test_support` and a Tokio one in `maildrop-actor-std-rs`.
//!
//! # Example Usage
//! ```ignore
//! use maildrop_actor_core_rs::api::{actor::from_fn, actor_system::ActorSystem};
//!
//! let pid = system.spawn(from_fn(|ctx, msg: u32| {
//!   ctx.reply(msg + 1);
//!   Ok(())
//! }));
//! system.send(&pid, 41);
//! ```

#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_types))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::redundant_pattern)]
#![deny(clippy::redundant_static_lifetimes)]
#![deny(clippy::unnecessary_to_owned)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_ok_or)]
#![deny(clippy::manual_map)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unused_async)]
#![deny(clippy::unreachable)]
#![deny(clippy::empty_enum)]
#![deny(clippy::no_effect)]
#![deny(dropping_copy_types)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::len_without_is_empty)]
#![deny(clippy::wrong_self_convention)]
#![deny(clippy::from_over_into)]
#![deny(clippy::eq_op)]
#![deny(clippy::bool_comparison)]
#![deny(clippy::needless_bool)]
#![deny(clippy::match_like_matches_macro)]
#![deny(clippy::manual_assert)]
#![deny(clippy::if_same_then_else)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Public API for actors
pub mod api;
/// Internal implementation details
pub(crate) mod internal;

#[cfg(test)]
mod tests;
