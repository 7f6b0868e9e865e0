//! # Register ABI Tests

use pipetrace_core::common::abi::*;
use rstest::rstest;

#[rstest]
#[case(0, "zero")]
#[case(1, "ra")]
#[case(2, "sp")]
#[case(8, "fp")]
#[case(10, "a0")]
#[case(31, "t6")]
fn test_register_name(#[case] idx: usize, #[case] name: &str) {
    assert_eq!(register_name(idx), Some(name));
}

#[test]
fn test_register_name_out_of_range() {
    assert_eq!(register_name(32), None);
}

#[rstest]
#[case(0, "zero (always 0)")]
#[case(2, "sp (stack pointer)")]
#[case(8, "fp (frame pointer)")]
#[case(10, "a0 (argument/return)")]
#[case(11, "a1 (argument)")]
#[case(12, "general purpose")]
fn test_register_role(#[case] idx: usize, #[case] role: &str) {
    assert_eq!(register_role(idx), role);
}

#[test]
fn test_register_class_and_label() {
    assert_eq!(register_class(REG_ZERO), RegisterClass::Zero);
    assert_eq!(register_class(REG_SP), RegisterClass::Pointer);
    assert_eq!(register_class(REG_FP), RegisterClass::Pointer);
    assert_eq!(register_class(5), RegisterClass::General);
    assert_eq!(register_label(0), "x0 (zero)");
    assert_eq!(register_label(2), "x2 (sp)");
    assert_eq!(register_label(5), "x5");
}

#[test]
fn test_register_tooltip() {
    assert_eq!(
        register_tooltip(2, 100),
        "x2 (sp (stack pointer)): 100 (0x00000064)"
    );
    assert_eq!(
        register_tooltip(7, 0xDEAD_BEEF),
        "x7 (general purpose): 3735928559 (0xDEADBEEF)"
    );
}
