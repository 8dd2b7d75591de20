mod message_envelope;
mod message_id;
mod message_priority;
mod payload;

pub(crate) use message_envelope::reply_route;
pub use message_envelope::MessageEnvelope;
pub use message_id::MessageId;
pub use message_priority::MessagePriority;
pub use payload::{DownSignal, ExitSignal, Payload};
