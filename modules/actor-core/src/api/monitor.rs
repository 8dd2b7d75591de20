mod attachable;
mod attachable_list;
mod functor_attachable;
mod monitor_attachable;
mod observe_token;

pub use attachable::Attachable;
pub(crate) use attachable_list::AttachableList;
pub use functor_attachable::FunctorAttachable;
pub use monitor_attachable::MonitorAttachable;
pub use observe_token::{ObserveKind, ObserveToken};
