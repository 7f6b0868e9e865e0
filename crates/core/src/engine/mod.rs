//! Simulation engine boundary.
//!
//! The engine and the example library are external collaborators reached through a
//! single request/response exchange each. This module defines:
//! 1. **Traits:** `SimulationEngine` and `ExampleSource`, implemented by whatever transport
//!    the host application uses.
//! 2. **Envelopes:** The JSON response shapes and their atomic conversion into a [`Trace`]
//!    or an [`Example`].
//! 3. **Programs:** Normalization of user-entered instruction text before it is sent.

/// Instruction text normalization.
pub mod program;
/// JSON response envelopes.
pub mod response;

use crate::common::error::LoadError;
use crate::trace::Trace;

pub use program::Program;
pub use response::{Example, ExampleResponse, SimulationResponse, TraceDocument};

/// Runs a program and returns its full cycle trace.
///
/// Implementations must be atomic: either a complete, validated trace or an error.
pub trait SimulationEngine {
    /// Simulates `source` (assembled hex or mnemonic text, opaque to this crate).
    ///
    /// # Errors
    ///
    /// [`LoadError`] if the engine rejects the program or the exchange fails.
    fn simulate(&self, source: &str) -> Result<Trace, LoadError>;
}

impl<F> SimulationEngine for F
where
    F: Fn(&str) -> Result<Trace, LoadError>,
{
    fn simulate(&self, source: &str) -> Result<Trace, LoadError> {
        self(source)
    }
}

/// Supplies named example programs.
pub trait ExampleSource {
    /// Fetches the example called `name`.
    ///
    /// # Errors
    ///
    /// [`LoadError`] if the example does not exist or the exchange fails.
    fn fetch(&self, name: &str) -> Result<Example, LoadError>;
}

/// An engine that replays a response body captured earlier.
///
/// Useful for offline inspection of a saved trace: the program text is ignored.
#[derive(Debug, Clone)]
pub struct RecordedEngine {
    body: String,
}

impl RecordedEngine {
    /// Wraps a JSON response body (envelope or bare snapshot array).
    pub const fn new(body: String) -> Self {
        Self { body }
    }
}

impl SimulationEngine for RecordedEngine {
    fn simulate(&self, _source: &str) -> Result<Trace, LoadError> {
        TraceDocument::decode(&self.body)
    }
}
