//! Context handed to every handler

use std::fmt;
use std::sync::Arc;

use session_model::{Extras, Metadata, PlaybackState, PlaybackStateKind, Position};

use crate::controller::{MediaController, ObserverId};
use crate::registration::Registration;

/// Live view of the controller a handler was registered against
///
/// Every accessor asks the controller at call time; nothing is cached, so a
/// handler always sees the controller's current values rather than the
/// values of the notification being dispatched. After the registration is
/// cancelled and the host has dropped the controller, the accessors fall
/// back to defaults.
#[derive(Clone)]
pub struct SessionContext {
    registration: Arc<Registration>,
}

impl SessionContext {
    pub(crate) fn new(registration: Arc<Registration>) -> Self {
        Self { registration }
    }

    fn controller(&self) -> Option<Arc<dyn MediaController>> {
        self.registration.controller()
    }

    /// Full current playback state
    pub fn playback_state(&self) -> PlaybackState {
        self.controller()
            .map(|controller| controller.playback_state())
            .unwrap_or_default()
    }

    /// Current discrete state
    pub fn state(&self) -> PlaybackStateKind {
        self.playback_state().state
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.playback_state().position
    }

    /// Extras attached to the current playback state
    pub fn extras(&self) -> Extras {
        self.playback_state().extras
    }

    /// Session-level extras
    pub fn session_extras(&self) -> Extras {
        self.controller()
            .map(|controller| controller.session_extras())
            .unwrap_or_default()
    }

    /// Current metadata
    pub fn metadata(&self) -> Metadata {
        self.controller()
            .map(|controller| controller.metadata())
            .unwrap_or_default()
    }

    pub fn observer_id(&self) -> ObserverId {
        self.registration.id()
    }

    pub fn is_listening(&self) -> bool {
        self.registration.is_active()
    }

    /// Cancel this registration from inside a handler
    ///
    /// Handlers still pending for the notification being dispatched may
    /// run; later notifications are ignored.
    pub fn stop_listening(&self) {
        self.registration.cancel();
    }

    pub(crate) fn label(&self) -> &str {
        self.registration.label()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("observer", &self.registration.id())
            .field("label", &self.registration.label())
            .field("listening", &self.registration.is_active())
            .finish()
    }
}
