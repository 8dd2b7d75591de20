use core::fmt;

use maildrop_utils_core_rs::Element;

use crate::api::{actor_system::ActorSystem, messaging::MessageEnvelope, process::Pid};

/// Envelope to be delivered once a delay elapsed.
pub struct DelayedDelivery<M: Element> {
  system:   ActorSystem<M>,
  target:   Pid,
  envelope: MessageEnvelope<M>,
}

impl<M: Element> DelayedDelivery<M> {
  pub(crate) const fn new(system: ActorSystem<M>, target: Pid, envelope: MessageEnvelope<M>) -> Self {
    Self { system, target, envelope }
  }

  /// Destination.
  #[must_use]
  pub const fn target(&self) -> Pid {
    self.target
  }

  /// The envelope that will be delivered.
  #[must_use]
  pub const fn envelope(&self) -> &MessageEnvelope<M> {
    &self.envelope
  }

  /// Delivers the envelope through the regular enqueue path.
  pub fn deliver(self) {
    self.system.deliver(&self.target, self.envelope);
  }
}

impl<M: Element> fmt::Debug for DelayedDelivery<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DelayedDelivery").field("target", &self.target).field("envelope", &self.envelope).finish()
  }
}
