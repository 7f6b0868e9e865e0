//! Change detection between consecutive cycles.
//!
//! Both functions return sets, so the result is independent of map iteration order.
//! A missing baseline (the first cycle of a trace) yields an empty set: nothing is
//! highlighted, but the presentation layer still shows the real values.

use std::collections::BTreeSet;

use crate::trace::{MemoryView, RegisterFile};

/// Indices whose value differs between `prev` and `curr`.
pub fn diff_registers(prev: Option<&RegisterFile>, curr: &RegisterFile) -> BTreeSet<usize> {
    let Some(prev) = prev else {
        return BTreeSet::new();
    };
    prev.iter()
        .zip(curr.iter())
        .filter(|((_, a), (_, b))| a != b)
        .map(|((idx, _), _)| idx)
        .collect()
}

/// Addresses present in either view whose effective value (absent = 0) differs.
///
/// Not limited to the display window; every address either view carries is compared.
pub fn diff_memory(prev: Option<&MemoryView>, curr: &MemoryView) -> BTreeSet<u32> {
    let Some(prev) = prev else {
        return BTreeSet::new();
    };
    prev.addresses()
        .chain(curr.addresses())
        .filter(|&addr| prev.read(addr) != curr.read(addr))
        .collect()
}
