//! Autoplay speed table.
//!
//! Maps the ten speed levels a caller offers to tick intervals. Callers are free to
//! pass any positive interval to the scheduler directly; the table is a convenience.

use std::time::Duration;

/// Interval used for levels outside the table.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Tick interval in milliseconds for levels 1..=10.
const INTERVALS_MS: [u64; 10] = [1000, 900, 800, 600, 500, 400, 300, 200, 150, 100];

/// A speed level in `1..=10`; higher is faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    /// Slowest level.
    pub const MIN: Self = Self(1);
    /// Fastest level.
    pub const MAX: Self = Self(10);

    /// Returns the level, or `None` outside `1..=10`.
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN.0 && level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Raw level.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Tick interval for this level.
    pub const fn interval(self) -> Duration {
        Duration::from_millis(INTERVALS_MS[(self.0 - 1) as usize])
    }

    /// Tick interval for a raw level, falling back to [`DEFAULT_INTERVAL`].
    pub fn interval_for(level: u8) -> Duration {
        Self::new(level).map_or(DEFAULT_INTERVAL, Self::interval)
    }

    /// Display label, e.g. `"1.0s"` or `"0.15s"`.
    pub fn label(self) -> String {
        let ms = self.interval().as_millis();
        if ms % 100 == 0 {
            format!("{}.{}s", ms / 1000, (ms % 1000) / 100)
        } else {
            format!("{}.{:02}s", ms / 1000, (ms % 1000) / 10)
        }
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self(5)
    }
}
