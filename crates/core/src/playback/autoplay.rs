//! Autoplay scheduler.
//!
//! Steps a shared [`PlaybackController`](super::PlaybackController) forward on a fixed
//! period. It provides:
//! 1. **Single run:** At most one worker per scheduler; `start` while running is a no-op.
//! 2. **Completion:** The worker stops itself once the cursor reaches the last cycle.
//! 3. **Cancellation:** `stop` signals the worker and joins it, so no tick fires after
//!    `stop` returns.
//!
//! Each tick takes the controller lock, steps once, and releases it; emissions from
//! autoplay and from manual stepping are therefore strictly serialized.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::common::error::{AutoplayError, Precondition};
use crate::playback::controller::{PlaybackState, SharedController, lock};

/// Scheduler status reported to callers and subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoplayStatus {
    /// Not running; initial state and the state after `stop`.
    #[default]
    Paused,
    /// A worker is stepping the controller.
    Playing,
    /// The worker reached the last cycle and stopped itself.
    Completed,
}

/// Worker side of the cancellation pair.
struct CancelSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelSignal {
    fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleeps for `duration` or until cancelled. Returns `true` if cancelled.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (cancelled, _) = cvar
            .wait_timeout_while(guard, duration, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *cancelled
    }
}

/// Owner side of the cancellation pair. Not cloneable: one run, one owner.
struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    fn pair() -> (CancelSignal, Self) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = CancelSignal {
            inner: Arc::clone(&inner),
        };
        (signal, Self { inner })
    }

    fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }
}

/// Status shared between the scheduler and its worker.
#[derive(Default)]
struct StatusCell {
    status: Mutex<AutoplayStatus>,
    observers: Mutex<Vec<Sender<AutoplayStatus>>>,
}

impl StatusCell {
    fn get(&self) -> AutoplayStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `status` and notifies subscribers if it changed.
    fn set(&self, status: AutoplayStatus) {
        let mut current = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == status {
            return;
        }
        *current = status;
        drop(current);
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(status).is_ok());
    }
}

struct Run {
    token: CancelToken,
    handle: JoinHandle<()>,
}

/// Drives a shared controller forward on a timer.
pub struct AutoplayScheduler {
    controller: SharedController,
    status: Arc<StatusCell>,
    run: Option<Run>,
}

impl std::fmt::Debug for AutoplayScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoplayScheduler")
            .field("status", &self.status())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl AutoplayScheduler {
    /// Creates a paused scheduler for `controller`.
    pub fn new(controller: SharedController) -> Self {
        Self {
            controller,
            status: Arc::new(StatusCell::default()),
            run: None,
        }
    }

    /// Current status.
    pub fn status(&self) -> AutoplayStatus {
        self.status.get()
    }

    /// Returns `true` while a worker is stepping the controller.
    ///
    /// A worker that has reported `Completed` or `Paused` no longer counts, even if its
    /// thread is still unwinding.
    pub fn is_running(&self) -> bool {
        self.run.is_some() && self.status() == AutoplayStatus::Playing
    }

    /// Registers an observer for status changes.
    pub fn subscribe(&self) -> Receiver<AutoplayStatus> {
        let (tx, rx) = mpsc::channel();
        self.status
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Starts stepping forward every `interval`.
    ///
    /// A no-op if a run is already active.
    ///
    /// # Errors
    ///
    /// * `InvalidInterval` for a zero interval.
    /// * `PreconditionNotMet(NoTrace)` when the controller is empty.
    /// * `PreconditionNotMet(AtLastCycle)` when the cursor is already on the last cycle.
    pub fn start(&mut self, interval: Duration) -> Result<(), AutoplayError> {
        if interval.is_zero() {
            return Err(AutoplayError::InvalidInterval);
        }
        if self.is_running() {
            debug!("autoplay already running");
            return Ok(());
        }
        // Any leftover worker has already set its final status and is about to exit.
        self.reap();

        {
            let ctrl = lock(&self.controller);
            if ctrl.state() == PlaybackState::Empty {
                return Err(AutoplayError::PreconditionNotMet(Precondition::NoTrace));
            }
            if ctrl.is_at_end() {
                return Err(AutoplayError::PreconditionNotMet(
                    Precondition::AtLastCycle,
                ));
            }
        }

        info!(interval_ms = interval.as_millis() as u64, "autoplay started");
        let (signal, token) = CancelToken::pair();
        self.status.set(AutoplayStatus::Playing);
        let controller = Arc::clone(&self.controller);
        let status = Arc::clone(&self.status);
        let handle = thread::spawn(move || run_worker(&controller, &status, &signal, interval));
        self.run = Some(Run { token, handle });
        Ok(())
    }

    /// Cancels the active run, if any, and reports `Paused`.
    ///
    /// Safe to call at any time and idempotent. Once it returns, no further tick fires.
    /// The caller must not hold the controller lock: a tick waiting on it is joined here.
    pub fn stop(&mut self) -> AutoplayStatus {
        if let Some(run) = self.run.take() {
            run.token.cancel();
            if run.handle.thread().id() != thread::current().id() {
                let _ = run.handle.join();
            }
            info!("autoplay paused");
        }
        self.status.set(AutoplayStatus::Paused);
        AutoplayStatus::Paused
    }

    /// Joins a worker that stopped itself.
    fn reap(&mut self) {
        if let Some(run) = self.run.take() {
            let _ = run.handle.join();
        }
    }
}

impl Drop for AutoplayScheduler {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
            let _ = run.handle.join();
        }
    }
}

fn run_worker(
    controller: &SharedController,
    status: &StatusCell,
    signal: &CancelSignal,
    interval: Duration,
) {
    loop {
        if signal.wait_timeout(interval) {
            return;
        }
        let mut ctrl = lock(controller);
        // `stop` may have fired while this tick waited for the lock.
        if signal.is_cancelled() {
            return;
        }
        let moved = ctrl.step_forward();
        let at_end = ctrl.is_at_end();
        drop(ctrl);

        if at_end {
            info!("autoplay completed");
            status.set(AutoplayStatus::Completed);
            return;
        }
        if !moved {
            // The trace was reset underneath us.
            status.set(AutoplayStatus::Paused);
            return;
        }
    }
}
