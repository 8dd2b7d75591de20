mod element;
/// Queue primitives.
pub mod queue;

pub use element::Element;
