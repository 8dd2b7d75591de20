use alloc::{collections::BTreeSet, string::ToString};

use super::{ActorId, Pid};

#[test]
fn display_includes_id_and_generation() {
  let pid = Pid::new(ActorId(42), 3);
  assert_eq!(pid.to_string(), "actor://42.3");
}

#[test]
fn generation_distinguishes_equal_ids() {
  let first = Pid::new(ActorId(1), 0);
  let second = Pid::new(ActorId(1), 1);
  assert_ne!(first, second);

  let set: BTreeSet<Pid> = [first, second, first].into_iter().collect();
  assert_eq!(set.len(), 2);
}
