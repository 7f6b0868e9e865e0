//! Configuration for trace playback.
//!
//! This module defines the configuration structures used to parameterize playback. It provides:
//! 1. **Defaults:** Baseline autoplay speed and display window constants.
//! 2. **Structures:** `playback` (autoplay pacing) and `display` (what the presentation shows).
//!
//! Configuration is supplied as JSON; every field is optional and falls back to the defaults
//! below, so `{}` is a valid configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::playback::speed::SpeedLevel;

/// Default configuration constants.
mod defaults {
    /// Autoplay speed level (1 = slowest, 10 = fastest).
    pub const SPEED: u8 = 5;

    /// Word-aligned memory addresses shown, starting at 0.
    pub const MEMORY_WORDS: usize = crate::common::constants::DISPLAY_MEMORY_WORDS;
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Autoplay pacing.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Presentation options.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` if `json` is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Parse` if it is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Autoplay pacing.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    /// Speed level looked up in the speed table.
    #[serde(default = "PlaybackConfig::default_speed")]
    pub speed: u8,

    /// Explicit tick interval in milliseconds; overrides `speed` when set.
    #[serde(default)]
    pub interval_ms: Option<u64>,

    /// Start autoplay as soon as a trace is loaded.
    #[serde(default)]
    pub autoplay: bool,
}

impl PlaybackConfig {
    const fn default_speed() -> u8 {
        defaults::SPEED
    }

    /// The tick interval: `interval_ms` if set, otherwise the speed table entry.
    pub fn interval(&self) -> Duration {
        self.interval_ms.map_or_else(
            || SpeedLevel::interval_for(self.speed),
            Duration::from_millis,
        )
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: defaults::SPEED,
            interval_ms: None,
            autoplay: false,
        }
    }
}

/// Presentation options.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Number of word-aligned memory addresses to show.
    #[serde(default = "DisplayConfig::default_memory_words")]
    pub memory_words: usize,

    /// Print registers and memory words that did not change this cycle.
    #[serde(default = "DisplayConfig::default_show_unchanged")]
    pub show_unchanged: bool,
}

impl DisplayConfig {
    const fn default_memory_words() -> usize {
        defaults::MEMORY_WORDS
    }

    const fn default_show_unchanged() -> bool {
        true
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            memory_words: defaults::MEMORY_WORDS,
            show_unchanged: true,
        }
    }
}
