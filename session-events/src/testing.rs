//! Test doubles for code built on session-events
//!
//! Enabled with the `test-support` feature. [`FakeController`] stands in for
//! the host platform: it holds a scripted state, marshals notifications
//! through each observer's delivery context and records subscription
//! traffic. [`EventRecorder`] installs every handler and logs what fired.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use session_model::{Extras, Metadata, PlaybackState, PlaybackStateKind, Position};

use crate::controller::{ControllerObserver, MediaController, MediaSession, ObserverId};
use crate::delivery::DeliveryContext;
use crate::error::{Result, SessionError};
use crate::handlers::EventHandlers;

#[derive(Clone)]
struct Subscriber {
    id: ObserverId,
    observer: Arc<dyn ControllerObserver>,
    context: DeliveryContext,
}

#[derive(Default)]
struct FakeState {
    playback: PlaybackState,
    metadata: Metadata,
    session_extras: Extras,
    subscribers: Vec<Subscriber>,
    departed: Vec<Subscriber>,
    register_count: usize,
    unregister_count: usize,
    fail_next_register: Option<String>,
    deliver_on_register: Option<PlaybackState>,
    destroyed: bool,
}

/// Scriptable in-memory controller
#[derive(Default)]
pub struct FakeController {
    state: Mutex<FakeState>,
}

impl FakeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the given playback state, without notifying anyone
    pub fn with_playback_state(self, playback: PlaybackState) -> Self {
        self.state.lock().playback = playback;
        self
    }

    /// Update the current state and notify every observer
    pub fn set_playback_state(&self, playback: PlaybackState) {
        let subscribers = {
            let mut state = self.state.lock();
            state.playback = playback.clone();
            state.subscribers.clone()
        };
        deliver_playback_state(&subscribers, &playback);
    }

    /// Shorthand for `set_playback_state` with empty extras
    pub fn report(&self, state: PlaybackStateKind, position: Position) {
        self.set_playback_state(PlaybackState::new(state, position));
    }

    /// Update the current metadata and notify every observer
    pub fn set_metadata(&self, metadata: Metadata) {
        let subscribers = {
            let mut state = self.state.lock();
            state.metadata = metadata.clone();
            state.subscribers.clone()
        };
        for Subscriber { observer, context, .. } in subscribers {
            let metadata = metadata.clone();
            context.post(move || observer.on_metadata_changed(&metadata));
        }
    }

    pub fn set_session_extras(&self, extras: Extras) {
        self.state.lock().session_extras = extras;
    }

    /// Tell every observer the session is gone and refuse new observers
    pub fn destroy(&self) {
        let subscribers = {
            let mut state = self.state.lock();
            state.destroyed = true;
            state.subscribers.clone()
        };
        for Subscriber { observer, context, .. } in subscribers {
            context.post(move || observer.on_session_destroyed());
        }
    }

    /// Make the next `register_observer` call fail
    pub fn fail_next_registration(&self, reason: impl Into<String>) {
        self.state.lock().fail_next_register = Some(reason.into());
    }

    /// Deliver `playback` to the next observer from inside `register_observer`
    pub fn deliver_during_registration(&self, playback: PlaybackState) {
        self.state.lock().deliver_on_register = Some(playback);
    }

    /// Deliver a state to observers that were already unregistered
    pub fn deliver_residual(&self, playback: PlaybackState) {
        let departed = self.state.lock().departed.clone();
        deliver_playback_state(&departed, &playback);
    }

    pub fn observer_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    pub fn is_registered(&self, id: ObserverId) -> bool {
        self.state
            .lock()
            .subscribers
            .iter()
            .any(|subscriber| subscriber.id == id)
    }

    pub fn register_count(&self) -> usize {
        self.state.lock().register_count
    }

    pub fn unregister_count(&self) -> usize {
        self.state.lock().unregister_count
    }
}

fn deliver_playback_state(subscribers: &[Subscriber], playback: &PlaybackState) {
    for Subscriber { observer, context, .. } in subscribers.iter().cloned() {
        let playback = playback.clone();
        context.post(move || observer.on_playback_state_changed(&playback));
    }
}

impl MediaController for FakeController {
    fn playback_state(&self) -> PlaybackState {
        self.state.lock().playback.clone()
    }

    fn metadata(&self) -> Metadata {
        self.state.lock().metadata.clone()
    }

    fn session_extras(&self) -> Extras {
        self.state.lock().session_extras.clone()
    }

    fn register_observer(
        &self,
        id: ObserverId,
        observer: Arc<dyn ControllerObserver>,
        context: DeliveryContext,
    ) -> Result<()> {
        let subscriber = Subscriber {
            id,
            observer,
            context,
        };

        let early = {
            let mut state = self.state.lock();
            state.register_count += 1;
            if state.destroyed {
                return Err(SessionError::SessionReleased);
            }
            if let Some(reason) = state.fail_next_register.take() {
                return Err(SessionError::Registration(reason));
            }
            state.subscribers.push(subscriber.clone());
            let early = state.deliver_on_register.take();
            if let Some(playback) = &early {
                state.playback = playback.clone();
            }
            early
        };

        if let Some(playback) = early {
            deliver_playback_state(std::slice::from_ref(&subscriber), &playback);
        }
        Ok(())
    }

    fn unregister_observer(&self, id: ObserverId) {
        let mut state = self.state.lock();
        state.unregister_count += 1;
        if let Some(index) = state
            .subscribers
            .iter()
            .position(|subscriber| subscriber.id == id)
        {
            let subscriber = state.subscribers.remove(index);
            state.departed.push(subscriber);
        }
    }
}

/// Session wrapper around a [`FakeController`]
pub struct FakeSession {
    controller: Arc<FakeController>,
    released: Mutex<bool>,
}

impl FakeSession {
    pub fn new(controller: Arc<FakeController>) -> Self {
        Self {
            controller,
            released: Mutex::new(false),
        }
    }

    pub fn fake_controller(&self) -> &Arc<FakeController> {
        &self.controller
    }

    /// Further `controller()` calls fail
    pub fn release(&self) {
        *self.released.lock() = true;
    }
}

impl MediaSession for FakeSession {
    fn controller(&self) -> Result<Arc<dyn MediaController>> {
        if *self.released.lock() {
            return Err(SessionError::SessionReleased);
        }
        let controller: Arc<dyn MediaController> = self.controller.clone();
        Ok(controller)
    }
}

/// A handler invocation captured by [`EventRecorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    StateChanged {
        previous: PlaybackStateKind,
        current: PlaybackStateKind,
    },
    StartedPlaying,
    Paused,
    StoppedPlaying,
    PositionChanged(Position),
    MetadataChanged(Metadata),
    SessionDestroyed,
}

/// Installs every handler and records each call in order
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every slot of `handlers` with a recording closure
    pub fn install(&self, handlers: &mut EventHandlers) {
        let events = Arc::clone(&self.events);
        handlers.on_state_changed(move |_, previous, state| {
            events.lock().push(RecordedEvent::StateChanged {
                previous,
                current: state.state,
            })
        });

        let events = Arc::clone(&self.events);
        handlers.on_started_playing(move |_| events.lock().push(RecordedEvent::StartedPlaying));

        let events = Arc::clone(&self.events);
        handlers.on_paused(move |_| events.lock().push(RecordedEvent::Paused));

        let events = Arc::clone(&self.events);
        handlers.on_stopped_playing(move |_| events.lock().push(RecordedEvent::StoppedPlaying));

        let events = Arc::clone(&self.events);
        handlers.on_position_changed(move |_, position| {
            events.lock().push(RecordedEvent::PositionChanged(position))
        });

        let events = Arc::clone(&self.events);
        handlers.on_metadata_changed(move |_, metadata| {
            events
                .lock()
                .push(RecordedEvent::MetadataChanged(metadata.clone()))
        });

        let events = Arc::clone(&self.events);
        handlers.on_session_destroyed(move |_| events.lock().push(RecordedEvent::SessionDestroyed));
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Number of recorded events matching `predicate`
    pub fn count(&self, predicate: impl Fn(&RecordedEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|event| predicate(event)).count()
    }

    /// Poll until at least `len` events were recorded
    ///
    /// For deliveries on a looper thread. Returns false on timeout.
    pub fn wait_for_len(&self, len: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.len() >= len {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        self.len() >= len
    }
}
