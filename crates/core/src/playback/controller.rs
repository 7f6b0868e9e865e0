//! Playback controller.
//!
//! Cursor state machine over one loaded trace:
//! 1. **States:** `Empty` (nothing loaded, or a zero-length trace) and `Ready`.
//! 2. **Transitions:** `load`, `step_forward`, `step_backward`, `seek`, `reset`.
//! 3. **Emission:** Each transition recomputes a [`ViewState`] and sends one copy to
//!    every subscriber.
//!
//! Every operation is defined in every state. Moving past either end of the trace is a
//! silent no-op; callers read `is_first` / `is_last` from the view to grey out controls.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::common::error::LoadError;
use crate::engine::SimulationEngine;
use crate::playback::view::ViewState;
use crate::trace::{SnapshotStore, Trace};

/// Controller shared between manual input and the autoplay worker.
///
/// Every `load`/`step`/`seek`/`reset` runs under this one lock.
pub type SharedController = Arc<Mutex<PlaybackController>>;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No trace, or a trace with zero cycles.
    Empty,
    /// A non-empty trace is loaded and the cursor is on one of its cycles.
    Ready,
}

/// Owns the loaded trace and the cursor over it.
#[derive(Debug)]
pub struct PlaybackController {
    store: SnapshotStore,
    cursor: Option<usize>,
    view: ViewState,
    observers: Vec<Sender<ViewState>>,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    /// Creates an empty controller showing the zeroed view.
    pub fn new() -> Self {
        Self {
            store: SnapshotStore::empty(),
            cursor: None,
            view: ViewState::zeroed(),
            observers: Vec::new(),
        }
    }

    /// Wraps the controller for sharing with an [`super::AutoplayScheduler`].
    pub fn into_shared(self) -> SharedController {
        Arc::new(Mutex::new(self))
    }

    /// Registers an observer that receives every emitted view.
    ///
    /// Dropping the receiver unsubscribes it on the next emission.
    pub fn subscribe(&mut self) -> Receiver<ViewState> {
        let (tx, rx) = mpsc::channel();
        self.observers.push(tx);
        rx
    }

    /// Current state.
    pub const fn state(&self) -> PlaybackState {
        match self.cursor {
            Some(_) => PlaybackState::Ready,
            None => PlaybackState::Empty,
        }
    }

    /// Cursor position, `None` when empty.
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of cycles loaded.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns `true` when the cursor is on the last cycle.
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 == self.store.len())
    }

    /// The loaded trace.
    pub const fn trace(&self) -> &Trace {
        self.store.trace()
    }

    /// Most recently emitted view. No side effects.
    pub const fn current_view_state(&self) -> &ViewState {
        &self.view
    }

    /// Installs `trace` and moves to its first cycle.
    ///
    /// A zero-length trace leaves the controller `Empty`. Always emits, with no diff
    /// baseline for the first cycle.
    pub fn load(&mut self, trace: Trace) {
        info!(cycles = trace.len(), "loading trace");
        self.cursor = if trace.is_empty() { None } else { Some(0) };
        self.store = SnapshotStore::new(trace);
        self.refresh();
    }

    /// Requests a trace from `engine` and loads it.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`LoadError`]. The previously loaded trace and cursor are
    /// left untouched and nothing is emitted.
    pub fn load_from<E>(&mut self, engine: &E, source: &str) -> Result<(), LoadError>
    where
        E: SimulationEngine + ?Sized,
    {
        let trace = engine.simulate(source).inspect_err(|e| {
            warn!(error = %e, "simulation request failed; keeping current trace");
        })?;
        self.load(trace);
        Ok(())
    }

    /// Advances one cycle. No-op on the last cycle or when empty.
    pub fn step_forward(&mut self) -> bool {
        match self.cursor {
            Some(c) if c + 1 < self.store.len() => self.move_to(c + 1),
            _ => false,
        }
    }

    /// Goes back one cycle. No-op on the first cycle or when empty.
    ///
    /// The diff is taken against the cycle before the new position, not against the
    /// cycle being left.
    pub fn step_backward(&mut self) -> bool {
        match self.cursor {
            Some(c) if c > 0 => self.move_to(c - 1),
            _ => false,
        }
    }

    /// Jumps to `index`. No-op if out of range, already there, or empty.
    pub fn seek(&mut self, index: usize) -> bool {
        match self.cursor {
            Some(c) if c != index && index < self.store.len() => self.move_to(index),
            _ => false,
        }
    }

    /// Jumps to the first cycle.
    pub fn seek_first(&mut self) -> bool {
        self.seek(0)
    }

    /// Jumps to the last cycle.
    pub fn seek_last(&mut self) -> bool {
        match self.store.len() {
            0 => false,
            len => self.seek(len - 1),
        }
    }

    /// Drops the trace and emits the zeroed view.
    pub fn reset(&mut self) {
        info!("resetting playback");
        self.store = SnapshotStore::empty();
        self.cursor = None;
        self.refresh();
    }

    fn move_to(&mut self, index: usize) -> bool {
        debug!(from = ?self.cursor, to = index, "cursor moved");
        self.cursor = Some(index);
        self.refresh();
        true
    }

    /// Recomputes the view for the current cursor and emits it.
    fn refresh(&mut self) {
        self.view = match self.cursor {
            None => ViewState::zeroed(),
            // The cursor is kept within bounds by every transition.
            Some(c) => ViewState::compute(&self.store, c).unwrap_or_else(|e| {
                warn!(error = %e, "cursor outside trace; showing empty view");
                ViewState::zeroed()
            }),
        };
        let view = &self.view;
        self.observers.retain(|tx| tx.send(view.clone()).is_ok());
    }
}

/// Locks a shared controller, recovering the state if a previous holder panicked.
pub fn lock(controller: &Mutex<PlaybackController>) -> MutexGuard<'_, PlaybackController> {
    controller.lock().unwrap_or_else(PoisonError::into_inner)
}
