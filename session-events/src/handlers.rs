//! Handler configuration
//!
//! [`EventHandlers`] is the record a caller fills in before a registration
//! goes live: one optional handler per event category. Setting a category
//! twice keeps the last handler; leaving one out is fine.

use std::fmt;

use session_model::{Metadata, PlaybackState, PlaybackStateKind, Position};

use crate::context::SessionContext;

/// Called with the previously observed state and the new report
pub type StateChangedHandler =
    Box<dyn Fn(&SessionContext, PlaybackStateKind, &PlaybackState) + Send + Sync>;

/// Called for started-playing, paused, stopped-playing and session-destroyed
pub type SignalHandler = Box<dyn Fn(&SessionContext) + Send + Sync>;

pub type PositionChangedHandler = Box<dyn Fn(&SessionContext, Position) + Send + Sync>;

pub type MetadataChangedHandler = Box<dyn Fn(&SessionContext, &Metadata) + Send + Sync>;

/// One optional handler per event category
///
/// # Example
///
/// ```rust
/// use session_events::EventHandlers;
///
/// let mut handlers = EventHandlers::new();
/// handlers
///     .on_state_changed(|_ctx, previous, state| {
///         println!("{} -> {}", previous, state.state);
///     })
///     .on_paused(|ctx| println!("paused at {}", ctx.position()));
///
/// assert_eq!(handlers.registered_count(), 2);
/// ```
#[derive(Default)]
pub struct EventHandlers {
    pub(crate) state_changed: Option<StateChangedHandler>,
    pub(crate) started_playing: Option<SignalHandler>,
    pub(crate) paused: Option<SignalHandler>,
    pub(crate) stopped_playing: Option<SignalHandler>,
    pub(crate) position_changed: Option<PositionChangedHandler>,
    pub(crate) metadata_changed: Option<MetadataChangedHandler>,
    pub(crate) session_destroyed: Option<SignalHandler>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every report whose discrete state differs from the last one observed
    pub fn on_state_changed<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SessionContext, PlaybackStateKind, &PlaybackState) + Send + Sync + 'static,
    {
        self.state_changed = Some(Box::new(handler));
        self
    }

    /// Playing after the last observed state was stopped or error
    ///
    /// Resuming from paused, or playing for the first time after `None`
    /// or buffering, does not count. Runs after the state-changed handler.
    pub fn on_started_playing<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SessionContext) + Send + Sync + 'static,
    {
        self.started_playing = Some(Box::new(handler));
        self
    }

    /// Every state change into paused
    pub fn on_paused<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SessionContext) + Send + Sync + 'static,
    {
        self.paused = Some(Box::new(handler));
        self
    }

    /// Every state change into stopped
    pub fn on_stopped_playing<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SessionContext) + Send + Sync + 'static,
    {
        self.stopped_playing = Some(Box::new(handler));
        self
    }

    /// Every report whose position differs from the last one observed
    pub fn on_position_changed<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SessionContext, Position) + Send + Sync + 'static,
    {
        self.position_changed = Some(Box::new(handler));
        self
    }

    /// Every metadata notification, identical or not
    pub fn on_metadata_changed<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SessionContext, &Metadata) + Send + Sync + 'static,
    {
        self.metadata_changed = Some(Box::new(handler));
        self
    }

    /// After the registration cancelled itself because the session went away
    pub fn on_session_destroyed<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SessionContext) + Send + Sync + 'static,
    {
        self.session_destroyed = Some(Box::new(handler));
        self
    }

    /// Number of categories with a handler set
    pub fn registered_count(&self) -> usize {
        self.slots().iter().filter(|(_, set)| *set).count()
    }

    pub fn is_empty(&self) -> bool {
        self.registered_count() == 0
    }

    fn slots(&self) -> [(&'static str, bool); 7] {
        [
            ("state_changed", self.state_changed.is_some()),
            ("started_playing", self.started_playing.is_some()),
            ("paused", self.paused.is_some()),
            ("stopped_playing", self.stopped_playing.is_some()),
            ("position_changed", self.position_changed.is_some()),
            ("metadata_changed", self.metadata_changed.is_some()),
            ("session_destroyed", self.session_destroyed.is_some()),
        ]
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<&str> = self
            .slots()
            .iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| *name)
            .collect();

        f.debug_struct("EventHandlers")
            .field("registered", &registered)
            .finish()
    }
}
