//! # Change Detection Tests
//!
//! Example-based checks plus properties: diffs are symmetric, a state never differs
//! from itself, and a missing baseline highlights nothing.

use std::collections::BTreeSet;

use pipetrace_core::diff::{diff_memory, diff_registers};
use pipetrace_core::trace::{MemoryView, RegisterFile};
use proptest::prelude::*;

#[test]
fn test_no_baseline_highlights_nothing() {
    let mut regs = RegisterFile::default();
    regs.set(5, 9);
    let mem: MemoryView = [(0, 1), (4, 2)].into_iter().collect();
    assert!(diff_registers(None, &regs).is_empty());
    assert!(diff_memory(None, &mem).is_empty());
}

#[test]
fn test_register_diff_lists_every_changed_index() {
    let prev = RegisterFile::new([0; 32]);
    let mut curr = prev.clone();
    curr.set(0, 1);
    curr.set(2, 0x64);
    curr.set(31, u32::MAX);
    assert_eq!(
        diff_registers(Some(&prev), &curr),
        BTreeSet::from([0, 2, 31])
    );
}

#[test]
fn test_memory_diff_covers_union_of_addresses() {
    let prev: MemoryView = [(0, 7), (8, 3)].into_iter().collect();
    let curr: MemoryView = [(8, 3), (12, 5)].into_iter().collect();
    // 0 dropped to implicit zero, 12 appeared, 8 unchanged.
    assert_eq!(diff_memory(Some(&prev), &curr), BTreeSet::from([0, 12]));
}

#[test]
fn test_memory_diff_ignores_explicit_zero() {
    let prev: MemoryView = [(16, 0)].into_iter().collect();
    let curr = MemoryView::new();
    assert!(diff_memory(Some(&prev), &curr).is_empty());
    assert!(diff_memory(Some(&curr), &prev).is_empty());
}

#[test]
fn test_memory_diff_is_not_limited_to_display_window() {
    let prev = MemoryView::new();
    let curr: MemoryView = [(0x1000, 1), (0xFFFF_FFFC, 2)].into_iter().collect();
    assert_eq!(
        diff_memory(Some(&prev), &curr),
        BTreeSet::from([0x1000, 0xFFFF_FFFC])
    );
}

fn registers() -> impl Strategy<Value = RegisterFile> {
    prop::array::uniform32(0u32..4).prop_map(RegisterFile::new)
}

fn memory() -> impl Strategy<Value = MemoryView> {
    prop::collection::btree_map(0u32..64, 0u32..4, 0..16)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_register_diff_is_symmetric(a in registers(), b in registers()) {
        prop_assert_eq!(diff_registers(Some(&a), &b), diff_registers(Some(&b), &a));
    }

    #[test]
    fn prop_register_diff_of_self_is_empty(a in registers()) {
        prop_assert!(diff_registers(Some(&a), &a).is_empty());
    }

    #[test]
    fn prop_register_diff_matches_values(a in registers(), b in registers()) {
        let diff = diff_registers(Some(&a), &b);
        for i in 0..32 {
            prop_assert_eq!(diff.contains(&i), a.get(i) != b.get(i));
        }
    }

    #[test]
    fn prop_memory_diff_is_symmetric(a in memory(), b in memory()) {
        prop_assert_eq!(diff_memory(Some(&a), &b), diff_memory(Some(&b), &a));
    }

    #[test]
    fn prop_memory_diff_of_self_is_empty(a in memory()) {
        prop_assert!(diff_memory(Some(&a), &a).is_empty());
    }

    #[test]
    fn prop_memory_diff_matches_effective_values(a in memory(), b in memory()) {
        let diff = diff_memory(Some(&a), &b);
        for addr in 0u32..64 {
            prop_assert_eq!(diff.contains(&addr), a.read(addr) != b.read(addr));
        }
    }
}
