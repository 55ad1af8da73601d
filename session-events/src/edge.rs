//! Edge detection over successive playback-state reports
//!
//! [`EdgeDetector`] remembers the last observed discrete state and position
//! and turns each new report into the higher-level events it implies. It
//! has no knowledge of handlers; the processor decides what to call.

use session_model::{PlaybackState, PlaybackStateKind, Position};

/// Category-specific transition derived from a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Playing again after a stop or an error
    StartedPlaying,
    Paused,
    StoppedPlaying,
}

/// A change of discrete state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub previous: PlaybackStateKind,
    pub current: PlaybackStateKind,
}

/// Everything one report implies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedEvents {
    pub state_change: Option<StateChange>,
    pub transition: Option<Transition>,
    pub position_change: Option<Position>,
}

impl DerivedEvents {
    /// True when the report changed nothing
    pub fn is_empty(&self) -> bool {
        self.state_change.is_none() && self.transition.is_none() && self.position_change.is_none()
    }
}

/// Last-observed state and position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    last_state: PlaybackStateKind,
    last_position: Position,
}

impl EdgeDetector {
    /// Start from `None` / unknown position
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_state(&self) -> PlaybackStateKind {
        self.last_state
    }

    pub fn last_position(&self) -> Position {
        self.last_position
    }

    /// Compare a report against the last observed values and remember it
    ///
    /// State and position are diffed independently, so one report can yield
    /// both a state event and a position event.
    pub fn observe(&mut self, reported: &PlaybackState) -> DerivedEvents {
        let mut events = DerivedEvents::default();

        if reported.state != self.last_state {
            let previous = self.last_state;
            events.state_change = Some(StateChange {
                previous,
                current: reported.state,
            });
            events.transition = transition_for(previous, reported.state);
            self.last_state = reported.state;
        }

        if reported.position != self.last_position {
            events.position_change = Some(reported.position);
            self.last_position = reported.position;
        }

        events
    }
}

// Only a resume from STOPPED or ERROR counts as "started"; PAUSED -> PLAYING
// and NONE/BUFFERING -> PLAYING do not.
fn transition_for(previous: PlaybackStateKind, current: PlaybackStateKind) -> Option<Transition> {
    match current {
        PlaybackStateKind::Playing if previous.is_terminal() => Some(Transition::StartedPlaying),
        PlaybackStateKind::Paused => Some(Transition::Paused),
        PlaybackStateKind::Stopped => Some(Transition::StoppedPlaying),
        _ => None,
    }
}
