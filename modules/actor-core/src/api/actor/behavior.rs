use maildrop_utils_core_rs::Element;

use super::ActorContext;
use crate::api::{
  failure::{ActorError, ExitReason},
  messaging::{DownSignal, ExitSignal, MessageId},
};

/// Decision of a behavior that received an exit signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitDirective {
  /// Terminate with the signal's reason.
  #[default]
  Terminate,
  /// Keep running. Ignored for untrappable reasons.
  Ignore,
}

/// Message handlers of an actor.
///
/// Returning `Err` from any handler terminates the actor with the error as failure reason; an
/// unanswered request is answered with [`ActorError::Behavior`] first.
pub trait Behavior<M: Element>: Send {
  /// Runs once before the first envelope is dispatched.
  ///
  /// # Errors
  /// An error terminates the actor before it processes anything.
  fn pre_start(&mut self, ctx: &mut ActorContext<'_, M>) -> Result<(), ActorError> {
    let _ = ctx;
    Ok(())
  }

  /// Handles an application message, either asynchronous or a request.
  ///
  /// # Errors
  /// An error terminates the actor.
  fn receive(&mut self, ctx: &mut ActorContext<'_, M>, message: M) -> Result<(), ActorError>;

  /// Handles the response (or failure) for a request this actor issued.
  ///
  /// # Errors
  /// An error terminates the actor.
  fn on_response(
    &mut self,
    ctx: &mut ActorContext<'_, M>,
    request_id: MessageId,
    response: Result<M, ActorError>,
  ) -> Result<(), ActorError> {
    let _ = (ctx, request_id, response);
    Ok(())
  }

  /// Handles the termination of a monitored actor.
  ///
  /// # Errors
  /// An error terminates the actor.
  fn on_down(&mut self, ctx: &mut ActorContext<'_, M>, signal: DownSignal) -> Result<(), ActorError> {
    let _ = (ctx, signal);
    Ok(())
  }

  /// Decides whether an exit signal terminates the actor.
  fn on_exit_signal(&mut self, ctx: &mut ActorContext<'_, M>, signal: &ExitSignal) -> ExitDirective {
    let _ = (ctx, signal);
    ExitDirective::Terminate
  }

  /// Runs during cleanup, after the mailbox was closed.
  fn post_stop(&mut self, reason: &ExitReason) {
    let _ = reason;
  }
}

/// Behavior backed by a closure handling user messages.
pub struct FnBehavior<F> {
  handler: F,
}

/// Builds a behavior from a message handler.
pub const fn from_fn<M, F>(handler: F) -> FnBehavior<F>
where
  M: Element,
  F: FnMut(&mut ActorContext<'_, M>, M) -> Result<(), ActorError> + Send, {
  FnBehavior { handler }
}

impl<M, F> Behavior<M> for FnBehavior<F>
where
  M: Element,
  F: FnMut(&mut ActorContext<'_, M>, M) -> Result<(), ActorError> + Send,
{
  fn receive(&mut self, ctx: &mut ActorContext<'_, M>, message: M) -> Result<(), ActorError> {
    (self.handler)(ctx, message)
  }
}
