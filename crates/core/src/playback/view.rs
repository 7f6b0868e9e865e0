//! View state.
//!
//! Recomputed from scratch on every cursor change: the snapshot at the cursor, the
//! diff against the preceding trace index, and statistics up to the cursor. Nothing
//! is carried over from the previously displayed cycle, so a backward step highlights
//! exactly what a forward step onto the same cycle would.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::common::error::StoreError;
use crate::diff::{diff_memory, diff_registers};
use crate::stats::TraceStats;
use crate::trace::{CycleSnapshot, SnapshotStore};

/// Everything the presentation layer needs to draw one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    /// Snapshot under the cursor.
    pub snapshot: CycleSnapshot,
    /// Registers that differ from the preceding cycle.
    pub register_diff: BTreeSet<usize>,
    /// Memory addresses that differ from the preceding cycle.
    pub memory_diff: BTreeSet<u32>,
    /// Statistics over cycles `[0, cursor]`.
    pub stats: TraceStats,
    /// Cursor is on the first cycle (or nothing is loaded).
    pub is_first: bool,
    /// Cursor is on the last cycle (or nothing is loaded).
    pub is_last: bool,
    /// Cursor position; `None` when nothing is loaded.
    pub cursor: Option<usize>,
    /// Number of cycles in the loaded trace.
    pub len: usize,
}

impl ViewState {
    /// The view shown when no trace is loaded.
    pub fn zeroed() -> Self {
        Self {
            snapshot: CycleSnapshot::zeroed(0),
            register_diff: BTreeSet::new(),
            memory_diff: BTreeSet::new(),
            stats: TraceStats::default(),
            is_first: true,
            is_last: true,
            cursor: None,
            len: 0,
        }
    }

    /// Computes the view for `cursor`, diffing against `cursor - 1`.
    ///
    /// # Errors
    ///
    /// `StoreError::OutOfRange` if `cursor` is not a valid index.
    pub fn compute(store: &SnapshotStore, cursor: usize) -> Result<Self, StoreError> {
        let curr = store.get(cursor)?;
        let prev = cursor.checked_sub(1).map(|p| store.get(p)).transpose()?;

        Ok(Self {
            snapshot: curr.clone(),
            register_diff: diff_registers(prev.map(|p| &p.registers), &curr.registers),
            memory_diff: diff_memory(prev.map(|p| &p.memory), &curr.memory),
            stats: TraceStats::aggregate(store.trace(), cursor),
            is_first: cursor == 0,
            is_last: cursor + 1 == store.len(),
            cursor: Some(cursor),
            len: store.len(),
        })
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::zeroed()
    }
}
