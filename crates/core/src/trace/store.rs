//! Snapshot store.
//!
//! Holds the trace of one simulation run for as long as it is loaded. There is no
//! mutation API; a new run replaces the whole store.

use crate::common::error::StoreError;
use crate::trace::{CycleSnapshot, Trace};

/// Read-only indexed access over a loaded trace.
///
/// An empty store means "no simulation loaded".
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    trace: Trace,
}

impl SnapshotStore {
    /// Takes ownership of `trace`.
    pub const fn new(trace: Trace) -> Self {
        Self { trace }
    }

    /// A store with nothing loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot at `index`.
    ///
    /// # Errors
    ///
    /// `StoreError::OutOfRange` when `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&CycleSnapshot, StoreError> {
        self.trace.get(index).ok_or(StoreError::OutOfRange {
            index,
            len: self.trace.len(),
        })
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Returns `true` when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// The underlying trace.
    pub const fn trace(&self) -> &Trace {
        &self.trace
    }
}
