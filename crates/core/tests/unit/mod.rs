//! # Unit Components
//!
//! One module per library component, from the snapshot model up to autoplay.

/// Register ABI names, roles and tooltips.
pub mod abi;

/// Autoplay scheduler: preconditions, completion and cancellation.
pub mod autoplay;


/// Register and memory change detection, including property tests.
pub mod diff;






/// Prefix statistics.
pub mod stats;
