use core::fmt;

#[cfg(test)]
mod tests;

/// Numeric actor identifier allocated by the directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Process identifier: actor id plus the generation of the system that issued it.
///
/// Ids are never reused, so a `Pid` that no longer resolves always refers to a terminated actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid {
  id:         ActorId,
  generation: u32,
}

impl Pid {
  /// Creates a pid from its parts.
  #[must_use]
  pub const fn new(id: ActorId, generation: u32) -> Self {
    Self { id, generation }
  }

  /// Returns the actor id.
  #[must_use]
  pub const fn id(&self) -> ActorId {
    self.id
  }

  /// Returns the generation token.
  #[must_use]
  pub const fn generation(&self) -> u32 {
    self.generation
  }
}

impl fmt::Display for Pid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "actor://{}.{}", self.id, self.generation)
  }
}
