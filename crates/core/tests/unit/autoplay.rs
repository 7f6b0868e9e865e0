//! # Autoplay Scheduler Tests
//!
//! These run real worker threads with short intervals. Timing-sensitive assertions
//! only check ordering and termination, never exact tick counts.

use std::thread;
use std::time::Duration;

use pipetrace_core::common::{AutoplayError, Precondition};
use pipetrace_core::playback::controller::lock;
use pipetrace_core::playback::{AutoplayScheduler, AutoplayStatus, PlaybackController};
use pipetrace_core::trace::Trace;

use crate::common::builder::linear_trace;
use crate::common::harness::{drain, init_tracing, recv_until};

const TICK: Duration = Duration::from_millis(5);
const PATIENCE: Duration = Duration::from_secs(5);

fn scheduler_for(trace: Trace) -> AutoplayScheduler {
    let mut ctrl = PlaybackController::new();
    ctrl.load(trace);
    AutoplayScheduler::new(ctrl.into_shared())
}

#[test]
fn test_start_without_trace_is_rejected() {
    let mut sched = AutoplayScheduler::new(PlaybackController::new().into_shared());
    assert_eq!(
        sched.start(TICK),
        Err(AutoplayError::PreconditionNotMet(Precondition::NoTrace))
    );
    assert_eq!(sched.status(), AutoplayStatus::Paused);
    assert!(!sched.is_running());
}

#[test]
fn test_start_on_single_cycle_trace_is_rejected() {
    let mut sched = scheduler_for(linear_trace(1));
    assert_eq!(
        sched.start(TICK),
        Err(AutoplayError::PreconditionNotMet(Precondition::AtLastCycle))
    );
    assert_eq!(sched.status(), AutoplayStatus::Paused);
}

#[test]
fn test_zero_interval_is_rejected() {
    let mut sched = scheduler_for(linear_trace(4));
    assert_eq!(sched.start(Duration::ZERO), Err(AutoplayError::InvalidInterval));
    assert!(!sched.is_running());
}

#[test]
fn test_stop_without_start_reports_paused() {
    let mut sched = scheduler_for(linear_trace(4));
    let rx = sched.subscribe();
    assert_eq!(sched.stop(), AutoplayStatus::Paused);
    assert_eq!(sched.stop(), AutoplayStatus::Paused);
    assert_eq!(sched.status(), AutoplayStatus::Paused);
    assert!(drain(&rx).is_empty());
}

#[test]
fn test_runs_to_completion() {
    init_tracing();
    let ctrl = {
        let mut c = PlaybackController::new();
        c.load(linear_trace(6));
        c.into_shared()
    };
    let views = lock(&ctrl).subscribe();
    let mut sched = AutoplayScheduler::new(ctrl.clone());
    let status = sched.subscribe();

    sched.start(TICK).unwrap();
    assert_eq!(
        recv_until(&status, PATIENCE, |s| *s == AutoplayStatus::Completed),
        Some(AutoplayStatus::Completed)
    );

    assert_eq!(sched.status(), AutoplayStatus::Completed);
    assert_eq!(lock(&ctrl).cursor(), Some(5));
    let cursors: Vec<_> = drain(&views).into_iter().map(|v| v.cursor).collect();
    assert_eq!(cursors, (1..6).map(Some).collect::<Vec<_>>());

    // A finished run can be stopped and reports paused.
    assert_eq!(sched.stop(), AutoplayStatus::Paused);
}

#[test]
fn test_status_sequence_is_playing_then_completed() {
    let mut sched = scheduler_for(linear_trace(3));
    let status = sched.subscribe();
    sched.start(TICK).unwrap();
    assert_eq!(status.recv_timeout(PATIENCE), Ok(AutoplayStatus::Playing));
    assert_eq!(status.recv_timeout(PATIENCE), Ok(AutoplayStatus::Completed));
}

#[test]
fn test_start_while_running_is_no_op() {
    let ctrl = {
        let mut c = PlaybackController::new();
        c.load(linear_trace(4));
        c.into_shared()
    };
    let mut sched = AutoplayScheduler::new(ctrl.clone());
    sched.start(Duration::from_secs(60)).unwrap();
    assert!(sched.is_running());
    assert_eq!(sched.start(TICK), Ok(()));
    assert!(sched.is_running());
    assert_eq!(sched.status(), AutoplayStatus::Playing);

    assert_eq!(sched.stop(), AutoplayStatus::Paused);
    assert!(!sched.is_running());
    // The long first interval never elapsed.
    assert_eq!(lock(&ctrl).cursor(), Some(0));
}

#[test]
fn test_no_tick_after_stop() {
    let ctrl = {
        let mut c = PlaybackController::new();
        c.load(linear_trace(10_000));
        c.into_shared()
    };
    let views = lock(&ctrl).subscribe();
    let mut sched = AutoplayScheduler::new(ctrl.clone());
    sched.start(Duration::from_millis(1)).unwrap();

    assert!(recv_until(&views, PATIENCE, |v| v.cursor >= Some(3)).is_some());
    assert_eq!(sched.stop(), AutoplayStatus::Paused);
    let stopped_at = lock(&ctrl).cursor();
    let _ = drain(&views);

    thread::sleep(Duration::from_millis(30));
    assert_eq!(lock(&ctrl).cursor(), stopped_at);
    assert!(drain(&views).is_empty());
    assert_eq!(sched.status(), AutoplayStatus::Paused);
}

#[test]
fn test_restart_after_completion() {
    let ctrl = {
        let mut c = PlaybackController::new();
        c.load(linear_trace(3));
        c.into_shared()
    };
    let mut sched = AutoplayScheduler::new(ctrl.clone());
    let status = sched.subscribe();
    sched.start(TICK).unwrap();
    assert!(recv_until(&status, PATIENCE, |s| *s == AutoplayStatus::Completed).is_some());

    assert_eq!(
        sched.start(TICK),
        Err(AutoplayError::PreconditionNotMet(Precondition::AtLastCycle))
    );

    assert!(lock(&ctrl).seek_first());
    sched.start(TICK).unwrap();
    assert!(recv_until(&status, PATIENCE, |s| *s == AutoplayStatus::Completed).is_some());
    assert_eq!(lock(&ctrl).cursor(), Some(2));
}

#[test]
fn test_reset_under_running_scheduler_pauses_it() {
    let ctrl = {
        let mut c = PlaybackController::new();
        c.load(linear_trace(10_000));
        c.into_shared()
    };
    let mut sched = AutoplayScheduler::new(ctrl.clone());
    let status = sched.subscribe();
    sched.start(TICK).unwrap();
    lock(&ctrl).reset();
    assert!(recv_until(&status, PATIENCE, |s| *s == AutoplayStatus::Paused).is_some());
    assert_eq!(sched.status(), AutoplayStatus::Paused);
}

#[test]
fn test_drop_stops_worker() {
    let ctrl = {
        let mut c = PlaybackController::new();
        c.load(linear_trace(10_000));
        c.into_shared()
    };
    {
        let mut sched = AutoplayScheduler::new(ctrl.clone());
        sched.start(Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(10));
    }
    let after_drop = lock(&ctrl).cursor();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(lock(&ctrl).cursor(), after_drop);
}
