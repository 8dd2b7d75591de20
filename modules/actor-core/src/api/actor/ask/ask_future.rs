use core::{
  future::Future,
  pin::Pin,
  task::{Context, Poll},
};

use futures::channel::oneshot;

use super::{AskError, AskResult};

/// Future resolving with the reply of an `ask`.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct AskFuture<M> {
  receiver: oneshot::Receiver<AskResult<M>>,
}

impl<M> AskFuture<M> {
  pub(crate) const fn new(receiver: oneshot::Receiver<AskResult<M>>) -> Self {
    Self { receiver }
  }
}

impl<M> Future for AskFuture<M> {
  type Output = AskResult<M>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    match Pin::new(&mut self.get_mut().receiver).poll(cx) {
      | Poll::Ready(Ok(result)) => Poll::Ready(result),
      | Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(AskError::Cancelled)),
      | Poll::Pending => Poll::Pending,
    }
  }
}
