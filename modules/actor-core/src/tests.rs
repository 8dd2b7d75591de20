use alloc::{boxed::Box, sync::Arc, vec, vec::Vec};
use core::time::Duration;

use futures::FutureExt;
use maildrop_utils_core_rs::sync::ArcShared;
use spin::Mutex;

use crate::api::{
  actor::{from_fn, AskError},
  actor_system::{ActorSystem, ActorSystemConfig},
  failure::{ActorError, ExitReason},
  messaging::{DownSignal, ExitSignal, MessagePriority},
  monitor::MonitorAttachable,
  process::{ActorId, DeadLetterReason, Pid},
  test_support::{ManualScheduler, Probe, ProbeEvent},
};

fn manual_system() -> (ActorSystem<u32>, ArcShared<ManualScheduler<u32>>) {
  ManualScheduler::system(ActorSystemConfig::default())
}

fn responses(events: &[ProbeEvent<u32>]) -> Vec<Result<u32, ActorError>> {
  events
    .iter()
    .filter_map(|event| match event {
      | ProbeEvent::Response { response, .. } => Some(response.clone()),
      | _ => None,
    })
    .collect()
}

fn quits_on_zero(system: &ActorSystem<u32>) -> Pid {
  system.spawn(from_fn(|ctx, message: u32| {
    if message == 0 {
      ctx.quit(ExitReason::Normal);
    }
    Ok(())
  }))
}

#[test]
fn request_times_out_once_and_late_reply_is_discarded() {
  let (system, scheduler) = manual_system();
  let server_probe = Probe::new();
  let server = system.spawn(server_probe.behavior().deferring_replies());
  let client_probe = Probe::new();
  system.spawn(client_probe.behavior().requesting(server, 1, Duration::from_millis(100)));
  scheduler.run_until_idle();

  let mut promises = server_probe.take_promises();
  assert_eq!(promises.len(), 1);
  assert_eq!(scheduler.pending_timers(), 1);

  scheduler.advance(Duration::from_millis(99));
  assert!(responses(&client_probe.events()).is_empty());

  scheduler.advance(Duration::from_millis(1));
  let promise = promises.remove(0);
  let request_id = promise.request_id();
  assert!(promise.deliver(&system, 9));
  scheduler.run_until_idle();

  let events = client_probe.take();
  assert_eq!(responses(&events), vec![Err(ActorError::RequestTimeout)]);
  assert!(events.contains(&ProbeEvent::Response { request_id, response: Err(ActorError::RequestTimeout) }));
  assert_eq!(scheduler.pending_timers(), 0);
}

#[test]
fn reply_before_timeout_wins_and_timer_is_ignored() {
  let (system, scheduler) = manual_system();
  let server = system.spawn(Probe::new().behavior().with_responder(|value| value + 1));
  let client_probe = Probe::new();
  system.spawn(client_probe.behavior().requesting(server, 1, Duration::from_millis(10)));
  scheduler.run_until_idle();
  scheduler.advance(Duration::from_millis(10));

  assert_eq!(responses(&client_probe.events()), vec![Ok(2)]);
}

#[test]
fn monitor_delivers_one_down_when_target_quits() {
  let (system, scheduler) = manual_system();
  let target = quits_on_zero(&system);
  let watcher_probe = Probe::new();
  let watcher = system.spawn(watcher_probe.behavior());
  system.monitor(&watcher, &target);

  system.send(&target, 0);
  system.send(&target, 0);
  scheduler.run_until_idle();

  assert_eq!(
    watcher_probe.take(),
    vec![ProbeEvent::Started, ProbeEvent::Down(DownSignal { source: target, reason: ExitReason::Normal })]
  );
}

#[test]
fn demonitor_suppresses_the_down() {
  let (system, scheduler) = manual_system();
  let target = quits_on_zero(&system);
  let watcher_probe = Probe::new();
  let watcher = system.spawn(watcher_probe.behavior());

  system.monitor(&watcher, &target);
  assert!(system.demonitor(&watcher, &target));
  assert!(!system.demonitor(&watcher, &target));

  system.send(&target, 0);
  scheduler.run_until_idle();
  assert_eq!(watcher_probe.take(), vec![ProbeEvent::Started]);
}

#[test]
fn monitor_after_termination_fires_immediately() {
  let (system, scheduler) = manual_system();
  let target = quits_on_zero(&system);
  let handle = system.resolve(&target).unwrap();
  let watcher_probe = Probe::new();
  let watcher = system.spawn(watcher_probe.behavior());

  handle.terminate(&system, ExitReason::failure("crashed"));
  assert!(handle.is_terminated());

  handle.attach(Box::new(MonitorAttachable::new(watcher)), &system);
  system.monitor(&watcher, &target);
  scheduler.run_until_idle();

  assert_eq!(
    watcher_probe.take(),
    vec![
      ProbeEvent::Started,
      ProbeEvent::Down(DownSignal { source: target, reason: ExitReason::failure("crashed") }),
      ProbeEvent::Down(DownSignal { source: target, reason: ExitReason::failure("crashed") }),
    ]
  );
}

#[test]
fn monitor_of_a_quit_actor_reports_its_exit_reason() {
  let (system, scheduler) = manual_system();
  let target = quits_on_zero(&system);
  system.send(&target, 0);
  scheduler.run_until_idle();
  assert!(system.resolve(&target).is_none());

  let watcher_probe = Probe::new();
  let watcher = system.spawn(watcher_probe.behavior());
  system.monitor(&watcher, &target);
  scheduler.run_until_idle();

  assert_eq!(
    watcher_probe.take(),
    vec![ProbeEvent::Started, ProbeEvent::Down(DownSignal { source: target, reason: ExitReason::Normal })]
  );
}

#[test]
fn messages_to_a_quit_actor_carry_its_exit_reason() {
  let (system, scheduler) = manual_system();
  let seen = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&seen);
  system.subscribe_dead_letters(move |letter| sink.lock().push((letter.pid, letter.reason)));

  let target = quits_on_zero(&system);
  system.send(&target, 0);
  scheduler.run_until_idle();

  let client_probe = Probe::new();
  system.spawn(client_probe.behavior().requesting(target, 1, Duration::ZERO));
  system.send(&target, 2);
  scheduler.run_until_idle();

  assert_eq!(responses(&client_probe.events()), vec![Err(ActorError::RequestReceiverDown(ExitReason::Normal))]);
  assert_eq!(*seen.lock(), [(target, DeadLetterReason::Terminated)]);
}

#[test]
fn forgotten_exit_reasons_fall_back_to_unknown() {
  let (system, scheduler) = ManualScheduler::system(ActorSystemConfig::default().with_exit_capacity(0));
  let target = quits_on_zero(&system);
  system.send(&target, 0);
  scheduler.run_until_idle();

  let watcher_probe = Probe::new();
  let watcher = system.spawn(watcher_probe.behavior());
  system.monitor(&watcher, &target);
  scheduler.run_until_idle();

  assert_eq!(
    watcher_probe.take(),
    vec![ProbeEvent::Started, ProbeEvent::Down(DownSignal { source: target, reason: ExitReason::Unknown })]
  );
}

#[test]
fn killing_a_running_actor_bounces_its_queued_requests() {
  let (system, scheduler) = manual_system();
  let target_probe = Probe::new();
  let target = system.spawn(target_probe.behavior());
  scheduler.run_until_idle();

  system.send_exit(&target, ExitReason::Kill);
  let client_probe = Probe::new();
  for value in 0..3 {
    system.spawn(client_probe.behavior().requesting(target, value, Duration::ZERO));
  }
  scheduler.run_until_idle();

  assert_eq!(responses(&client_probe.events()), vec![Err(ActorError::RequestReceiverDown(ExitReason::Kill)); 3]);
  assert_eq!(target_probe.take(), vec![ProbeEvent::Started, ProbeEvent::Stopped(ExitReason::Kill)]);
  assert!(system.resolve(&target).is_none());
}

#[test]
fn killing_a_deferred_actor_bounces_its_cached_requests() {
  let (system, scheduler) = manual_system();
  let target_probe = Probe::new();
  let deferred = system.spawn_deferred(target_probe.behavior());
  let target = deferred.pid();

  let client_probe = Probe::new();
  for value in 0..3 {
    system.spawn(client_probe.behavior().requesting(target, value, Duration::ZERO));
  }
  system.send_exit(&target, ExitReason::Kill);
  scheduler.run_until_idle();

  assert_eq!(responses(&client_probe.events()), vec![Err(ActorError::RequestReceiverDown(ExitReason::Kill)); 3]);
  assert_eq!(target_probe.take(), vec![ProbeEvent::Stopped(ExitReason::Kill)]);
  assert!(system.resolve(&target).is_none());
  drop(deferred);
}

#[test]
fn cleanup_runs_only_once() {
  let (system, _scheduler) = manual_system();
  let probe = Probe::new();
  let pid = system.spawn(probe.behavior());
  let handle = system.resolve(&pid).unwrap();

  let mut permit = handle.acquire();
  assert!(permit.cleanup(&system, ExitReason::Normal));
  assert!(!permit.cleanup(&system, ExitReason::Kill));
  assert_eq!(permit.exit_state(), Some(&ExitReason::Normal));
  drop(permit);

  assert!(!handle.terminate(&system, ExitReason::Kill));
  assert_eq!(handle.final_reason(), Some(ExitReason::Normal));
  assert_eq!(probe.take(), vec![ProbeEvent::Started, ProbeEvent::Stopped(ExitReason::Normal)]);
}

#[test]
fn trapped_exit_is_ignored_but_kill_is_not() {
  let (system, scheduler) = manual_system();
  let probe = Probe::new();
  let pid = system.spawn(probe.behavior().trapping_exits());

  system.send_exit(&pid, ExitReason::failure("boom"));
  system.send(&pid, 1);
  system.send_exit(&pid, ExitReason::Kill);
  system.send(&pid, 2);
  scheduler.run_until_idle();

  assert_eq!(
    probe.take(),
    vec![
      ProbeEvent::Started,
      ProbeEvent::Exit(ExitSignal { source: None, reason: ExitReason::failure("boom") }),
      ProbeEvent::Received { sender: None, message: 1, request: false },
      ProbeEvent::Stopped(ExitReason::Kill),
    ]
  );
}

#[test]
fn untrapped_exit_terminates_with_the_signal_reason() {
  let (system, scheduler) = manual_system();
  let probe = Probe::new();
  let pid = system.spawn(probe.behavior());

  system.send_exit(&pid, ExitReason::failure("linked"));
  scheduler.run_until_idle();

  let events = probe.take();
  assert_eq!(events.last(), Some(&ProbeEvent::Stopped(ExitReason::failure("linked"))));
  assert!(system.resolve(&pid).is_none());
}

#[test]
fn behavior_error_answers_the_request_and_terminates() {
  let (system, scheduler) = manual_system();
  let server = system.spawn(from_fn(|_ctx, message: u32| {
    if message == 0 {
      return Err(ActorError::behavior("zero"));
    }
    Ok(())
  }));
  let reasons = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&reasons);
  system.attach_functor(&server, move |_source, reason| sink.lock().push(reason.clone()));

  let client_probe = Probe::new();
  system.spawn(client_probe.behavior().requesting(server, 0, Duration::ZERO));
  scheduler.run_until_idle();

  assert_eq!(responses(&client_probe.events()), vec![Err(ActorError::behavior("zero"))]);
  assert_eq!(*reasons.lock(), [ExitReason::failure("behavior failed: zero")]);
  assert!(system.resolve(&server).is_none());
}

#[test]
fn ask_resolves_with_the_reply() {
  let (system, scheduler) = manual_system();
  let server = system.spawn(Probe::new().behavior().with_responder(|value| value * 2));

  let reply = system.ask(&server, 21, Duration::ZERO);
  scheduler.run_until_idle();

  assert_eq!(reply.now_or_never(), Some(Ok(42)));
  assert_eq!(system.registry().len(), 1);
}

#[test]
fn ask_times_out() {
  let (system, scheduler) = manual_system();
  let server = system.spawn(Probe::new().behavior().deferring_replies());

  let mut reply = system.ask(&server, 1, Duration::from_millis(50));
  scheduler.run_until_idle();
  assert_eq!((&mut reply).now_or_never(), None);

  scheduler.advance(Duration::from_millis(50));
  assert_eq!(reply.now_or_never(), Some(Err(AskError::Timeout)));
}

#[test]
fn ask_to_unknown_pid_reports_receiver_down() {
  let (system, scheduler) = manual_system();
  let reply = system.ask(&Pid::new(ActorId(404), 0), 1, Duration::ZERO);
  scheduler.run_until_idle();

  assert_eq!(reply.now_or_never(), Some(Err(AskError::ReceiverDown(ExitReason::Unknown))));
}

#[test]
fn ask_is_stopped_by_shutdown() {
  let (system, scheduler) = manual_system();
  let server = system.spawn(Probe::new().behavior().deferring_replies());
  let reply = system.ask(&server, 1, Duration::ZERO);
  scheduler.run_until_idle();

  system.shutdown();
  assert_eq!(reply.now_or_never(), Some(Err(AskError::Stopped(ExitReason::UserShutdown))));
}

#[test]
fn delegated_request_is_answered_by_the_delegate() {
  let (system, scheduler) = manual_system();
  let back_probe = Probe::new();
  let back = system.spawn(back_probe.behavior().with_responder(|value| value * 10));
  let front = system.spawn(from_fn(move |ctx, message: u32| {
    ctx.delegate(&back, message + 1);
    Ok(())
  }));

  let client_probe = Probe::new();
  let client = system.spawn(client_probe.behavior().requesting(front, 1, Duration::ZERO));
  scheduler.run_until_idle();

  assert_eq!(responses(&client_probe.events()), vec![Ok(20)]);
  assert!(back_probe.events().contains(&ProbeEvent::Received { sender: Some(client), message: 2, request: true }));
}

#[test]
fn urgent_messages_are_dispatched_first() {
  let (system, scheduler) = manual_system();
  let probe = Probe::new();
  let pid = system.spawn(probe.behavior());

  system.send(&pid, 1);
  system.send(&pid, 2);
  system.send_with_priority(&pid, 3, MessagePriority::High);
  scheduler.run_until_idle();

  let order: Vec<u32> = probe
    .events()
    .into_iter()
    .filter_map(|event| match event {
      | ProbeEvent::Received { message, .. } => Some(message),
      | _ => None,
    })
    .collect();
  assert_eq!(order, [3, 1, 2]);
}

#[cfg(feature = "std")]
mod logging {
  use std::{
    io::Write,
    sync::{Arc, Mutex},
  };

  use tracing::subscriber::with_default;
  use tracing_subscriber::fmt;

  use super::{manual_system, quits_on_zero};

  struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
  }

  impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      let mut guard = self.buffer.lock().unwrap();
      guard.extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn termination_is_logged() {
    let buffer: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let writer_source = buffer.clone();
    let subscriber = fmt::SubscriberBuilder::default()
      .with_writer(move || CaptureWriter { buffer: writer_source.clone() })
      .with_max_level(tracing::Level::DEBUG)
      .with_ansi(false)
      .finish();

    with_default(subscriber, || {
      let (system, scheduler) = manual_system();
      let pid = quits_on_zero(&system);
      system.send(&pid, 0);
      scheduler.run_until_idle();
    });

    let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    assert!(output.contains("actor spawned"));
    assert!(output.contains("actor terminated"));
    assert!(output.contains("actor://1.0"));
  }
}
