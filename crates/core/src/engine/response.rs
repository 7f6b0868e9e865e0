//! JSON response envelopes.
//!
//! The engine answers `{"success": true, "data": [...]}` or
//! `{"success": false, "error": "..."}`. Conversion is all-or-nothing: a response that
//! fails to decode or validate never yields a partial trace.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::error::LoadError;
use crate::trace::{CycleSnapshot, Trace};

/// Simulation response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// Whether the engine produced a trace.
    pub success: bool,
    /// Snapshots, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<CycleSnapshot>>,
    /// Human-readable failure message, present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulationResponse {
    /// A successful response carrying `trace`.
    pub fn success(trace: &Trace) -> Self {
        Self {
            success: true,
            data: Some(trace.snapshots().to_vec()),
            error: None,
        }
    }

    /// A failed response carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Converts the envelope into a validated trace.
    ///
    /// A successful response without `data` is an empty trace.
    ///
    /// # Errors
    ///
    /// `LoadError::Engine` for a failure envelope, `LoadError::Trace` if the cycle
    /// numbering is invalid.
    pub fn into_trace(self) -> Result<Trace, LoadError> {
        if !self.success {
            return Err(LoadError::Engine(
                self.error
                    .unwrap_or_else(|| "engine reported failure without a message".to_owned()),
            ));
        }
        Ok(Trace::from_engine(self.data.unwrap_or_default())?)
    }
}

/// A saved trace document: either a full envelope or a bare snapshot array.
#[derive(Debug, Clone)]
pub enum TraceDocument {
    /// `{"success": ..., "data": [...]}`.
    Envelope(SimulationResponse),
    /// `[...]`.
    Bare(Vec<CycleSnapshot>),
}

impl TraceDocument {
    /// Parses either shape.
    ///
    /// Dispatches on the top-level JSON value rather than trying each shape in turn, so
    /// integer-keyed memory maps decode the same way in both.
    ///
    /// # Errors
    ///
    /// Returns the decoder error for invalid JSON or a mismatched shape.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        if value.is_array() {
            Ok(Self::Bare(serde_json::from_value(value)?))
        } else {
            Ok(Self::Envelope(serde_json::from_value(value)?))
        }
    }

    /// Converts the document into a validated trace.
    ///
    /// # Errors
    ///
    /// As [`SimulationResponse::into_trace`].
    pub fn into_trace(self) -> Result<Trace, LoadError> {
        match self {
            Self::Envelope(resp) => resp.into_trace(),
            Self::Bare(snapshots) => Ok(Trace::from_engine(snapshots)?),
        }
    }

    /// Parses and validates a document in one step.
    ///
    /// # Errors
    ///
    /// `LoadError::Malformed` for undecodable text, otherwise as [`Self::into_trace`].
    pub fn decode(text: &str) -> Result<Trace, LoadError> {
        Self::parse(text)?.into_trace()
    }
}

/// Example response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleResponse {
    /// Whether the example was found.
    pub success: bool,
    /// Example identifier.
    #[serde(default)]
    pub name: Option<String>,
    /// Program text, present on success.
    #[serde(default)]
    pub content: Option<String>,
    /// Failure message, present on failure.
    #[serde(default)]
    pub error: Option<String>,
}

impl ExampleResponse {
    /// Converts the envelope into an example named `requested` unless the response names it.
    ///
    /// # Errors
    ///
    /// `LoadError::Engine` for a failure envelope or a success without content.
    pub fn into_example(self, requested: &str) -> Result<Example, LoadError> {
        if !self.success {
            return Err(LoadError::Engine(self.error.unwrap_or_else(|| {
                format!("example `{requested}` could not be loaded")
            })));
        }
        let content = self
            .content
            .ok_or_else(|| LoadError::Engine(format!("example `{requested}` has no content")))?;
        Ok(Example {
            name: self.name.unwrap_or_else(|| requested.to_owned()),
            content,
        })
    }
}

/// A named example program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Identifier, e.g. `load_store_basic`.
    pub name: String,
    /// Raw program text including comments.
    pub content: String,
}

impl Example {
    /// The program with blank lines and `#` comment lines removed.
    pub fn cleaned(&self) -> String {
        self.content
            .lines()
            .filter(|line| {
                let t = line.trim();
                !t.is_empty() && !t.starts_with('#')
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Name with underscores shown as spaces.
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }
}
