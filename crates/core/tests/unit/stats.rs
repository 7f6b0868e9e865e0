//! # Statistics Tests

use pipetrace_core::stats::TraceStats;
use pipetrace_core::trace::Trace;
use pretty_assertions::assert_eq;

use crate::common::builder::{fill_trace, linear_trace};

#[test]
fn test_empty_trace_is_all_zero() {
    assert_eq!(TraceStats::aggregate(&Trace::empty(), 0), TraceStats::default());
    assert_eq!(TraceStats::aggregate(&Trace::empty(), 10), TraceStats::default());
}

#[test]
fn test_pipeline_fill_example() {
    let stats = TraceStats::aggregate(&fill_trace(), 4);
    assert_eq!(
        stats,
        TraceStats {
            instructions_retired: 1,
            cycles_elapsed: 5,
            cpi: 5.0,
            ipc: 0.2,
        }
    );
}

#[test]
fn test_prefix_with_nothing_retired() {
    let stats = TraceStats::aggregate(&fill_trace(), 2);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.cycles_elapsed, 3);
    assert_eq!(stats.cpi, 0.0);
    assert_eq!(stats.ipc, 0.0);
}

#[test]
fn test_retirement_counted_from_its_cycle() {
    let stats = TraceStats::aggregate(&fill_trace(), 3);
    assert_eq!(stats.instructions_retired, 1);
    assert_eq!(stats.cycles_elapsed, 4);
    assert_eq!(stats.cpi, 4.0);
    assert_eq!(stats.ipc, 0.25);
}

#[test]
fn test_up_to_past_end_is_clamped() {
    let trace = linear_trace(8);
    assert_eq!(
        TraceStats::aggregate(&trace, 100),
        TraceStats::aggregate(&trace, 7)
    );
    let stats = TraceStats::aggregate(&trace, 100);
    assert_eq!(stats.cycles_elapsed, 8);
    // Cycles 4..=7 retire.
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.cpi, 2.0);
    assert_eq!(stats.ipc, 0.5);
}

#[test]
fn test_from_counts_guards_zero_division() {
    let stats = TraceStats::from_counts(0, 0);
    assert_eq!(stats.cpi, 0.0);
    assert_eq!(stats.ipc, 0.0);
    let stats = TraceStats::from_counts(3, 0);
    assert_eq!(stats.cpi, 0.0);
    assert_eq!(stats.ipc, 0.0);
}
