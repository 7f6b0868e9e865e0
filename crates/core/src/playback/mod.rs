//! Trace playback.
//!
//! This module owns the position within a loaded trace. It provides:
//! 1. **Controller:** The `Empty`/`Ready` cursor state machine with bounded step and seek.
//! 2. **View state:** The consolidated per-cycle output handed to the presentation layer.
//! 3. **Autoplay:** A cancellable timer task that steps the controller forward.
//! 4. **Speed table:** Speed levels 1–10 mapped to tick intervals.

/// Timer-driven forward stepping.
pub mod autoplay;
/// Cursor state machine.
pub mod controller;
/// Speed level lookup table.
pub mod speed;
/// Per-transition view output.
pub mod view;

pub use autoplay::{AutoplayScheduler, AutoplayStatus};
pub use controller::{PlaybackController, PlaybackState, SharedController};
pub use speed::SpeedLevel;
pub use view::ViewState;
