#[allow(clippy::disallowed_types)]
mod arc_shared;
mod flag;

pub use arc_shared::ArcShared;
pub use flag::Flag;
