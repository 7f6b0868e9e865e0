//! Trace prefix statistics.
//!
//! Derived throughput metrics over cycles `[0, up_to]` of a trace:
//! 1. **Retirement:** Cycles whose write-back stage holds a real instruction.
//! 2. **Cycles:** `up_to + 1`.
//! 3. **Ratios:** CPI and IPC, unrounded; formatting is left to the presentation layer.
//!
//! Hazard and stall counts are not derived here: the snapshot carries no hazard
//! information, and estimating them from the instruction count would be fiction.

use serde::Serialize;

use crate::trace::Trace;

/// Throughput metrics over a trace prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TraceStats {
    /// Snapshots in the prefix whose WB stage is not a bubble.
    pub instructions_retired: u64,
    /// Cycles in the prefix.
    pub cycles_elapsed: u64,
    /// Cycles per instruction; 0 when nothing retired.
    pub cpi: f64,
    /// Instructions per cycle; 0 when no cycle elapsed.
    pub ipc: f64,
}

impl TraceStats {
    /// Aggregates over cycles `[0, up_to]`.
    ///
    /// `up_to` past the last index is clamped to it. An empty trace yields all zeros.
    pub fn aggregate(trace: &Trace, up_to: usize) -> Self {
        if trace.is_empty() {
            return Self::default();
        }
        let last = up_to.min(trace.len() - 1);
        let instructions_retired = trace.snapshots()[..=last]
            .iter()
            .filter(|snap| snap.retires())
            .count() as u64;
        let cycles_elapsed = last as u64 + 1;
        Self::from_counts(instructions_retired, cycles_elapsed)
    }

    /// Builds the ratios from raw counts.
    pub fn from_counts(instructions_retired: u64, cycles_elapsed: u64) -> Self {
        let cpi = if instructions_retired > 0 {
            cycles_elapsed as f64 / instructions_retired as f64
        } else {
            0.0
        };
        let ipc = if cycles_elapsed > 0 {
            instructions_retired as f64 / cycles_elapsed as f64
        } else {
            0.0
        };
        Self {
            instructions_retired,
            cycles_elapsed,
            cpi,
            ipc,
        }
    }
}
