//! Common types and constants used throughout the playback engine.
//!
//! 1. **Constants:** The no-op encoding, register count, and display window.
//! 2. **ABI:** Register names and roles for tooltips.
//! 3. **Errors:** One error enum per failure domain.

/// Register ABI names and roles.
pub mod abi;

/// Engine-wide constants.
pub mod constants;

/// Error types for loading, indexing, autoplay and parsing.
pub mod error;

pub use constants::{DISPLAY_MEMORY_WORDS, NOP_ENCODING, REGISTER_COUNT};
pub use error::{
    AutoplayError, ConfigError, LoadError, LogParseError, Precondition, ProgramError, StoreError,
    TraceError,
};
