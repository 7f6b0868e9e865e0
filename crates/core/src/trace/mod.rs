//! Cycle traces.
//!
//! 1. **Snapshots:** The per-cycle state model and its JSON wire format.
//! 2. **Trace:** A validated, immutable snapshot sequence.
//! 3. **Store:** Bounds-checked indexed access for the playback controller.
//! 4. **Log codec:** Parser for the testbench's line-oriented text output.

/// Testbench text log parser.
pub mod log;
/// Per-cycle snapshot types.
pub mod snapshot;
/// Read-only indexed snapshot storage.
pub mod store;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::common::error::TraceError;

pub use snapshot::{
    ControlSignals, CycleSnapshot, Encoding, MemoryView, Pipeline, RegisterFile, SIGNAL_NAMES,
    Stage, StageState,
};
pub use store::SnapshotStore;

/// Ordered, immutable sequence of cycle snapshots from one simulation run.
///
/// Invariant: `snapshots[i].cycle == i`. Cloning is cheap; clones share storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CycleSnapshot>", into = "Vec<CycleSnapshot>")]
pub struct Trace {
    snapshots: Arc<[CycleSnapshot]>,
}

impl Trace {
    /// Wraps `snapshots`, checking that every cycle number equals its index.
    ///
    /// # Errors
    ///
    /// `TraceError::CycleMismatch` for the first snapshot out of place.
    pub fn new(snapshots: Vec<CycleSnapshot>) -> Result<Self, TraceError> {
        if let Some((index, snap)) = snapshots
            .iter()
            .enumerate()
            .find(|(i, s)| s.cycle != *i as u64)
        {
            return Err(TraceError::CycleMismatch {
                index,
                cycle: snap.cycle,
            });
        }
        Ok(Self {
            snapshots: snapshots.into(),
        })
    }

    /// Accepts traces numbered from 0 or from 1.
    ///
    /// Engines that count the first clock edge as cycle 1 produce `cycle == i + 1`
    /// throughout; such traces are renumbered. Any other numbering is rejected.
    ///
    /// # Errors
    ///
    /// As [`Trace::new`].
    pub fn from_engine(mut snapshots: Vec<CycleSnapshot>) -> Result<Self, TraceError> {
        let one_based = !snapshots.is_empty()
            && snapshots
                .iter()
                .enumerate()
                .all(|(i, s)| s.cycle == i as u64 + 1);
        if one_based {
            for snap in &mut snapshots {
                snap.cycle -= 1;
            }
        }
        Self::new(snapshots)
    }

    /// A trace with no cycles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of cycles.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` when the trace holds no cycles.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&CycleSnapshot> {
        self.snapshots.get(index)
    }

    /// All snapshots in cycle order.
    pub fn snapshots(&self) -> &[CycleSnapshot] {
        &self.snapshots
    }

    /// Iterates snapshots in cycle order.
    pub fn iter(&self) -> std::slice::Iter<'_, CycleSnapshot> {
        self.snapshots.iter()
    }
}

impl TryFrom<Vec<CycleSnapshot>> for Trace {
    type Error = TraceError;

    fn try_from(snapshots: Vec<CycleSnapshot>) -> Result<Self, Self::Error> {
        Self::from_engine(snapshots)
    }
}

impl From<Trace> for Vec<CycleSnapshot> {
    fn from(trace: Trace) -> Self {
        trace.snapshots.to_vec()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a CycleSnapshot;
    type IntoIter = std::slice::Iter<'a, CycleSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
