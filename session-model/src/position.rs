//! Playback position

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Playback offset reported alongside a state
///
/// Controllers that cannot tell where playback is report [`Position::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    /// Sentinel for "position not known"
    #[default]
    Unknown,
    /// Offset from the start of the item in milliseconds
    Millis(u64),
}

impl Position {
    /// Convert a raw platform offset, where any negative value is the sentinel
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            Position::Unknown
        } else {
            Position::Millis(raw as u64)
        }
    }

    /// Raw platform offset, `-1` when unknown
    pub fn to_raw(self) -> i64 {
        match self {
            Position::Unknown => -1,
            Position::Millis(ms) => i64::try_from(ms).unwrap_or(i64::MAX),
        }
    }

    pub fn as_millis(self) -> Option<u64> {
        match self {
            Position::Unknown => None,
            Position::Millis(ms) => Some(ms),
        }
    }

    pub fn as_duration(self) -> Option<Duration> {
        self.as_millis().map(Duration::from_millis)
    }

    pub fn is_known(self) -> bool {
        matches!(self, Position::Millis(_))
    }
}

impl From<Duration> for Position {
    fn from(duration: Duration) -> Self {
        Position::Millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Unknown => write!(f, "unknown"),
            Position::Millis(ms) => write!(f, "{}ms", ms),
        }
    }
}
