//! Global constants.
//!
//! These values are fixed by the external simulation engine; a mismatch with
//! what the engine emits silently skews retirement counts.

/// Canonical no-operation encoding (`addi x0, x0, 0`).
///
/// Pipeline bubbles carry this encoding, and a WB stage holding it does not
/// count as a retired instruction.
pub const NOP_ENCODING: u32 = 0x0000_0013;

/// Number of general-purpose registers in a snapshot.
pub const REGISTER_COUNT: usize = 32;

/// Size of a memory word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Number of word-aligned addresses (starting at 0) shown by the presentation layer.
pub const DISPLAY_MEMORY_WORDS: usize = 16;
