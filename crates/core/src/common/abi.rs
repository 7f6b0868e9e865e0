//! Register ABI names and roles.
//!
//! Static lookup tables the presentation layer uses for register labels and
//! hover text. Nothing here depends on snapshot contents.

/// ABI register names for x0–x31.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "fp", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;
/// Register x8 (frame pointer, fp / s0).
pub const REG_FP: usize = 8;

/// Display class of a register cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterClass {
    /// The hardwired zero register.
    Zero,
    /// Stack or frame pointer.
    Pointer,
    /// Any other register.
    General,
}

/// Returns the ABI name for a register index, or `None` past x31.
#[inline]
pub fn register_name(idx: usize) -> Option<&'static str> {
    REG_NAMES.get(idx).copied()
}

/// Returns the human-readable role shown in register tooltips.
pub fn register_role(idx: usize) -> &'static str {
    match idx {
        0 => "zero (always 0)",
        1 => "ra (return address)",
        2 => "sp (stack pointer)",
        3 => "gp (global pointer)",
        4 => "tp (thread pointer)",
        8 => "fp (frame pointer)",
        10 => "a0 (argument/return)",
        11 => "a1 (argument)",
        _ => "general purpose",
    }
}

/// Returns the display class for a register index.
pub const fn register_class(idx: usize) -> RegisterClass {
    match idx {
        REG_ZERO => RegisterClass::Zero,
        REG_SP | REG_FP => RegisterClass::Pointer,
        _ => RegisterClass::General,
    }
}

/// Short grid label: `x2 (sp)` for the highlighted registers, `x5` otherwise.
pub fn register_label(idx: usize) -> String {
    match register_class(idx) {
        RegisterClass::General => format!("x{idx}"),
        RegisterClass::Zero | RegisterClass::Pointer => {
            format!("x{idx} ({})", register_name(idx).unwrap_or("?"))
        }
    }
}

/// Tooltip text for a register holding `value`.
///
/// Format: `x2 (sp (stack pointer)): 100 (0x00000064)`.
pub fn register_tooltip(idx: usize, value: u32) -> String {
    format!("x{idx} ({}): {value} (0x{value:08X})", register_role(idx))
}
