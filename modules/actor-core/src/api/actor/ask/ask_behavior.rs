use core::time::Duration;

use futures::channel::oneshot;
use maildrop_utils_core_rs::Element;
use tracing::trace;

use super::{AskError, AskFuture, AskResult};
use crate::api::{
  actor::{ActorContext, Behavior},
  failure::{ActorError, ExitReason},
  messaging::MessageId,
  process::Pid,
};

/// Short-lived actor issuing one request on behalf of non-actor code.
pub(crate) struct AskBehavior<M> {
  target:  Pid,
  message: Option<M>,
  timeout: Duration,
  reply:   Option<oneshot::Sender<AskResult<M>>>,
}

impl<M: Element> AskBehavior<M> {
  pub(crate) fn new(target: Pid, message: M, timeout: Duration) -> (Self, AskFuture<M>) {
    let (sender, receiver) = oneshot::channel();
    (Self { target, message: Some(message), timeout, reply: Some(sender) }, AskFuture::new(receiver))
  }

  fn complete(&mut self, result: AskResult<M>) {
    if let Some(reply) = self.reply.take() {
      if reply.send(result).is_err() {
        trace!(target = %self.target, "ask future dropped before completion");
      }
    }
  }
}

impl<M: Element> Behavior<M> for AskBehavior<M> {
  fn pre_start(&mut self, ctx: &mut ActorContext<'_, M>) -> Result<(), ActorError> {
    if let Some(message) = self.message.take() {
      ctx.request(&self.target, message, self.timeout);
    }
    Ok(())
  }

  fn receive(&mut self, ctx: &mut ActorContext<'_, M>, message: M) -> Result<(), ActorError> {
    trace!(pid = %ctx.self_pid(), ?message, "unexpected message to ask actor ignored");
    Ok(())
  }

  fn on_response(
    &mut self,
    ctx: &mut ActorContext<'_, M>,
    _request_id: MessageId,
    response: Result<M, ActorError>,
  ) -> Result<(), ActorError> {
    self.complete(response.map_err(AskError::from));
    ctx.quit(ExitReason::Normal);
    Ok(())
  }

  fn post_stop(&mut self, reason: &ExitReason) {
    self.complete(Err(AskError::Stopped(reason.clone())));
  }
}
