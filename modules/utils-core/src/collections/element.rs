use core::fmt::Debug;

/// Fundamental constraints for elements that travel through queues and mailboxes.
///
/// Elements cross thread boundaries between producers and the consumer, so they must be
/// `Send + Sync`. `Debug` keeps dead letters and trace output readable.
pub trait Element: Debug + Send + Sync + 'static {}

impl<T> Element for T where T: Debug + Send + Sync + 'static {}
