//! Elapsed-time value for the playback display

use std::fmt;
use std::time::Duration;

/// Elapsed playback time split into whole minutes and leftover seconds
///
/// A fresh value is produced on every position update; `seconds` is always
/// in `[0, 60)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackTime {
    minutes: u64,
    seconds: u64,
}

impl TrackTime {
    /// Build from explicit minutes and seconds
    pub fn new(minutes: u64, seconds: u64) -> Self {
        debug_assert!(seconds < 60);
        Self { minutes, seconds }
    }

    /// Build from a playback position
    pub fn from_position(position: Duration) -> Self {
        let total = position.as_secs();
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }
}

impl fmt::Display for TrackTime {
    /// Renders as `MM:SS`, each side zero-padded to two digits
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}
