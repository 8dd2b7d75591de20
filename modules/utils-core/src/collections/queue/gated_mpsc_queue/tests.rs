extern crate std;

use alloc::{sync::Arc, vec::Vec};
use std::thread;

use super::GatedMpscQueue;
use crate::collections::queue::QueueError;

#[test]
fn offers_are_polled_in_fifo_order() {
  let queue = GatedMpscQueue::new();
  queue.offer(1).unwrap();
  queue.offer(2).unwrap();
  queue.offer(3).unwrap();

  assert_eq!(queue.len(), 3);
  assert_eq!(queue.poll(), Some(1));
  assert_eq!(queue.drain(), [2, 3]);
  assert!(queue.is_empty());
}

#[test]
fn closed_queue_hands_the_element_back() {
  let queue = GatedMpscQueue::new();
  queue.offer("kept").unwrap();

  assert!(queue.close());
  assert!(!queue.close());
  assert!(queue.is_closed());

  let err = queue.offer("rejected").unwrap_err();
  assert_eq!(err, QueueError::Closed("rejected"));
  assert_eq!(err.into_inner(), "rejected");
  assert_eq!(queue.drain(), ["kept"]);
}

#[test]
fn close_racing_producers_loses_nothing() {
  const PRODUCERS: usize = 4;
  const PER_PRODUCER: usize = 5_000;

  let queue = Arc::new(GatedMpscQueue::new());
  let handles: Vec<_> = (0..PRODUCERS)
    .map(|producer| {
      let queue = Arc::clone(&queue);
      thread::spawn(move || {
        let mut accepted = 0_usize;
        for seq in 0..PER_PRODUCER {
          if queue.offer((producer, seq)).is_ok() {
            accepted += 1;
          }
        }
        accepted
      })
    })
    .collect();

  thread::yield_now();
  assert!(queue.close());
  let drained = queue.drain();

  let accepted: usize = handles.into_iter().map(|handle| handle.join().unwrap()).sum();
  assert_eq!(drained.len(), accepted);
  assert!(queue.is_empty());
}
