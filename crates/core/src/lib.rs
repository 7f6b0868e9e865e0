//! Pipelined processor trace playback library.
//!
//! This crate replays the cycle-by-cycle output of an external pipeline simulator. It provides:
//! 1. **Trace:** Per-cycle snapshots (registers, memory, stage latches, control signals) and an
//!    immutable indexed store over them.
//! 2. **Diff:** Change detection between consecutive cycles for highlighting.
//! 3. **Statistics:** Retired instructions, CPI and IPC over a trace prefix.
//! 4. **Playback:** A cursor state machine that emits a consolidated view per transition, plus a
//!    timer-driven autoplay scheduler.
//! 5. **Engine boundary:** Traits and JSON envelopes for the simulation engine and example source,
//!    program normalization, and a parser for the testbench text log.

/// Common types and constants (encodings, register ABI names, errors).
pub mod common;
/// Playback configuration (defaults, JSON loading).
pub mod config;
/// Register and memory change detection.
pub mod diff;
/// Simulation engine and example source boundary.
pub mod engine;
/// Cursor state machine, view state, and autoplay.
pub mod playback;
/// Trace prefix statistics.
pub mod stats;
/// Cycle snapshots, the snapshot store, and the text log codec.
pub mod trace;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Cursor state machine over a loaded trace.
pub use crate::playback::{PlaybackController, ViewState};
/// Immutable, validated sequence of cycle snapshots.
pub use crate::trace::{CycleSnapshot, Trace};
