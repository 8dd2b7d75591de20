/// What a resumed actor tells its scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumeResult {
  /// The mailbox went idle; the next enqueue reschedules the actor.
  AwaitingMessage,
  /// Work remains (or the permit was busy); resume again later.
  ResumeLater,
  /// The actor terminated.
  Done,
}
