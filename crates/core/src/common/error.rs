//! Error definitions.
//!
//! One enum per failure domain:
//! 1. **Boundary:** `LoadError` for engine and example exchanges.
//! 2. **Internal:** `StoreError` for out-of-range snapshot access.
//! 3. **Playback:** `AutoplayError` for rejected scheduler starts.
//! 4. **Codecs:** `TraceError`, `LogParseError`, `ProgramError`, `ConfigError`.
//!
//! Step and seek boundary violations are never errors; they are no-ops.

use thiserror::Error;

/// A trace whose snapshots do not satisfy `snapshot[i].cycle == i`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// Snapshot at `index` reports a different cycle number.
    #[error("snapshot {index} reports cycle {cycle}")]
    CycleMismatch {
        /// Position of the snapshot in the sequence.
        index: usize,
        /// Cycle number the snapshot carries.
        cycle: u64,
    },
    /// A register file with more than 32 entries.
    #[error("register file has {count} entries, expected at most 32")]
    TooManyRegisters {
        /// Number of entries received.
        count: usize,
    },
}

/// Failure to obtain a trace or example from an external collaborator.
///
/// A load failure never installs a partial trace.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The engine reported failure with a human-readable message.
    #[error("simulation failed: {0}")]
    Engine(String),
    /// The exchange with the engine could not be completed.
    ///
    /// Raised by [`crate::engine::SimulationEngine`] implementations that reach their
    /// engine over a process or network boundary.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The decoded snapshots violate the trace invariant.
    #[error("invalid trace: {0}")]
    Trace(#[from] TraceError),
    /// Reading a local trace or log failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The program source could not be prepared for the engine.
    ///
    /// Engines that validate their input with [`crate::engine::Program::parse`]
    /// propagate its error here through `?`.
    #[error("invalid program: {0}")]
    Program(#[from] ProgramError),
}

/// Internal snapshot store indexing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `index` is outside `[0, len)`.
    #[error("snapshot index {index} out of range (len {len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Store length.
        len: usize,
    },
}

/// Why an autoplay start was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// No trace is loaded, or the loaded trace is empty.
    NoTrace,
    /// The cursor already sits on the last cycle.
    AtLastCycle,
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTrace => write!(f, "no trace loaded"),
            Self::AtLastCycle => write!(f, "already at the last cycle"),
        }
    }
}

/// Rejected autoplay operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AutoplayError {
    /// The controller is not in a state autoplay can advance.
    #[error("autoplay precondition not met: {0}")]
    PreconditionNotMet(Precondition),
    /// The interval must be a positive duration.
    #[error("autoplay interval must be positive")]
    InvalidInterval,
}

/// A line of the testbench text log that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct LogParseError {
    /// One-based line number.
    pub line: usize,
    /// What was wrong with it.
    pub message: String,
}

/// Program source rejected before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// No instruction lines remained after stripping comments and blanks.
    #[error("program contains no instructions")]
    Empty,
}

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON for [`crate::Config`].
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
