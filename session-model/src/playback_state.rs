//! Playback state enumeration and the state snapshot

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Extras, Position};

/// Discrete playback state reported by a media controller
///
/// The variant order matches the platform's integer codes, see
/// [`PlaybackStateKind::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackStateKind {
    /// No state reported yet
    #[default]
    None,
    /// Playback is stopped
    Stopped,
    /// Playback is paused
    Paused,
    /// Currently playing
    Playing,
    FastForwarding,
    Rewinding,
    /// Waiting for enough data to continue
    Buffering,
    /// Playback failed
    Error,
    /// Connecting to a remote route
    Connecting,
    SkippingToPrevious,
    SkippingToNext,
    SkippingToQueueItem,
}

impl PlaybackStateKind {
    /// Platform integer code for this state
    pub fn code(self) -> i32 {
        match self {
            PlaybackStateKind::None => 0,
            PlaybackStateKind::Stopped => 1,
            PlaybackStateKind::Paused => 2,
            PlaybackStateKind::Playing => 3,
            PlaybackStateKind::FastForwarding => 4,
            PlaybackStateKind::Rewinding => 5,
            PlaybackStateKind::Buffering => 6,
            PlaybackStateKind::Error => 7,
            PlaybackStateKind::Connecting => 8,
            PlaybackStateKind::SkippingToPrevious => 9,
            PlaybackStateKind::SkippingToNext => 10,
            PlaybackStateKind::SkippingToQueueItem => 11,
        }
    }

    /// Map a platform integer code back to a state
    ///
    /// Unknown codes map to [`PlaybackStateKind::None`].
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => PlaybackStateKind::Stopped,
            2 => PlaybackStateKind::Paused,
            3 => PlaybackStateKind::Playing,
            4 => PlaybackStateKind::FastForwarding,
            5 => PlaybackStateKind::Rewinding,
            6 => PlaybackStateKind::Buffering,
            7 => PlaybackStateKind::Error,
            8 => PlaybackStateKind::Connecting,
            9 => PlaybackStateKind::SkippingToPrevious,
            10 => PlaybackStateKind::SkippingToNext,
            11 => PlaybackStateKind::SkippingToQueueItem,
            _ => PlaybackStateKind::None,
        }
    }

    /// Parse from a platform state name
    ///
    /// Handles common spellings like:
    /// - "PLAYING"
    /// - "PAUSED" / "PAUSED_PLAYBACK"
    /// - "STOPPED"
    /// - "TRANSITIONING" (reported as buffering)
    ///
    /// Anything unrecognised is [`PlaybackStateKind::None`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "STOPPED" => PlaybackStateKind::Stopped,
            "PAUSED" | "PAUSED_PLAYBACK" => PlaybackStateKind::Paused,
            "PLAYING" => PlaybackStateKind::Playing,
            "FAST_FORWARDING" => PlaybackStateKind::FastForwarding,
            "REWINDING" => PlaybackStateKind::Rewinding,
            "BUFFERING" | "TRANSITIONING" => PlaybackStateKind::Buffering,
            "ERROR" => PlaybackStateKind::Error,
            "CONNECTING" => PlaybackStateKind::Connecting,
            "SKIPPING_TO_PREVIOUS" => PlaybackStateKind::SkippingToPrevious,
            "SKIPPING_TO_NEXT" => PlaybackStateKind::SkippingToNext,
            "SKIPPING_TO_QUEUE_ITEM" => PlaybackStateKind::SkippingToQueueItem,
            _ => PlaybackStateKind::None,
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlaybackStateKind::Playing
    }

    /// Stopped or errored: the states playback can be "started" from again
    pub fn is_terminal(self) -> bool {
        matches!(self, PlaybackStateKind::Stopped | PlaybackStateKind::Error)
    }

    fn name(self) -> &'static str {
        match self {
            PlaybackStateKind::None => "NONE",
            PlaybackStateKind::Stopped => "STOPPED",
            PlaybackStateKind::Paused => "PAUSED",
            PlaybackStateKind::Playing => "PLAYING",
            PlaybackStateKind::FastForwarding => "FAST_FORWARDING",
            PlaybackStateKind::Rewinding => "REWINDING",
            PlaybackStateKind::Buffering => "BUFFERING",
            PlaybackStateKind::Error => "ERROR",
            PlaybackStateKind::Connecting => "CONNECTING",
            PlaybackStateKind::SkippingToPrevious => "SKIPPING_TO_PREVIOUS",
            PlaybackStateKind::SkippingToNext => "SKIPPING_TO_NEXT",
            PlaybackStateKind::SkippingToQueueItem => "SKIPPING_TO_QUEUE_ITEM",
        }
    }
}

impl fmt::Display for PlaybackStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of a controller's playback state
///
/// This is what a "playback state changed" notification carries and what
/// the controller returns when asked for its current state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Discrete state
    pub state: PlaybackStateKind,
    /// Playback offset at the time of the report
    pub position: Position,
    /// Auxiliary data attached to this state
    #[serde(default)]
    pub extras: Extras,
}

impl PlaybackState {
    /// Create a snapshot with empty extras
    pub fn new(state: PlaybackStateKind, position: Position) -> Self {
        Self {
            state,
            position,
            extras: Extras::new(),
        }
    }

    /// Attach an extras bundle
    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = extras;
        self
    }
}
