//! Notification processor
//!
//! Subscribed to the controller in place of the caller. Each raw
//! notification is diffed by the [`EdgeDetector`] and the derived events
//! are dispatched to whichever handlers were configured.

use std::sync::Arc;

use parking_lot::Mutex;
use session_model::{Metadata, PlaybackState};

use crate::context::SessionContext;
use crate::controller::ControllerObserver;
use crate::edge::{DerivedEvents, EdgeDetector, Transition};
use crate::handlers::EventHandlers;
use crate::registration::Registration;

pub(crate) struct NotificationProcessor {
    handlers: EventHandlers,
    context: SessionContext,
    // Held only while diffing, never across handler calls, so handlers can
    // re-enter the controller.
    detector: Mutex<EdgeDetector>,
}

impl NotificationProcessor {
    pub(crate) fn new(handlers: EventHandlers, registration: Arc<Registration>) -> Self {
        Self {
            handlers,
            context: SessionContext::new(registration),
            detector: Mutex::new(EdgeDetector::new()),
        }
    }

    fn dispatch(&self, reported: &PlaybackState, events: DerivedEvents) {
        let ctx = &self.context;

        if let Some(change) = events.state_change {
            tracing::debug!(
                observer = %ctx.observer_id(),
                label = %ctx.label(),
                previous = %change.previous,
                current = %change.current,
                "Playback state changed"
            );
            if let Some(handler) = &self.handlers.state_changed {
                handler(ctx, change.previous, reported);
            }
        }

        if let Some(transition) = events.transition {
            tracing::debug!(
                observer = %ctx.observer_id(),
                label = %ctx.label(),
                ?transition,
                "Playback transition"
            );
            let handler = match transition {
                Transition::StartedPlaying => &self.handlers.started_playing,
                Transition::Paused => &self.handlers.paused,
                Transition::StoppedPlaying => &self.handlers.stopped_playing,
            };
            if let Some(handler) = handler {
                handler(ctx);
            }
        }

        if let Some(position) = events.position_change {
            tracing::debug!(
                observer = %ctx.observer_id(),
                label = %ctx.label(),
                %position,
                "Playback position changed"
            );
            if let Some(handler) = &self.handlers.position_changed {
                handler(ctx, position);
            }
        }
    }
}

impl ControllerObserver for NotificationProcessor {
    fn on_playback_state_changed(&self, state: &PlaybackState) {
        if !self.context.is_listening() {
            tracing::trace!(
                observer = %self.context.observer_id(),
                "Ignoring playback state after cancellation"
            );
            return;
        }

        tracing::trace!(
            observer = %self.context.observer_id(),
            state = %state.state,
            position = %state.position,
            "Playback state notification"
        );

        let events = self.detector.lock().observe(state);
        if events.is_empty() {
            return;
        }
        self.dispatch(state, events);
    }

    fn on_metadata_changed(&self, metadata: &Metadata) {
        if !self.context.is_listening() {
            tracing::trace!(
                observer = %self.context.observer_id(),
                "Ignoring metadata after cancellation"
            );
            return;
        }

        tracing::debug!(
            observer = %self.context.observer_id(),
            label = %self.context.label(),
            title = ?metadata.title,
            "Metadata changed"
        );
        if let Some(handler) = &self.handlers.metadata_changed {
            handler(&self.context, metadata);
        }
    }

    fn on_session_destroyed(&self) {
        if !self.context.is_listening() {
            return;
        }

        tracing::info!(
            observer = %self.context.observer_id(),
            label = %self.context.label(),
            "Session destroyed"
        );
        self.context.stop_listening();

        if let Some(handler) = &self.handlers.session_destroyed {
            handler(&self.context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EventRecorder, FakeController, RecordedEvent};
    use crate::{configure_controller, MediaController};
    use session_model::{PlaybackStateKind, Position};

    fn attach(controller: &Arc<FakeController>, recorder: &EventRecorder) -> crate::ListenerHandle {
        let dyn_controller: Arc<dyn MediaController> = controller.clone();
        configure_controller(&dyn_controller, |events| recorder.install(events)).unwrap()
    }

    #[test]
    fn test_state_and_position_dispatch_in_order() {
        let controller = Arc::new(FakeController::new());
        let recorder = EventRecorder::new();
        let _handle = attach(&controller, &recorder);

        controller.set_playback_state(PlaybackState::new(
            PlaybackStateKind::Stopped,
            Position::Millis(0),
        ));
        recorder.clear();

        controller.set_playback_state(PlaybackState::new(
            PlaybackStateKind::Playing,
            Position::Millis(10),
        ));

        assert_eq!(
            recorder.take(),
            vec![
                RecordedEvent::StateChanged {
                    previous: PlaybackStateKind::Stopped,
                    current: PlaybackStateKind::Playing,
                },
                RecordedEvent::StartedPlaying,
                RecordedEvent::PositionChanged(Position::Millis(10)),
            ]
        );
    }

    #[test]
    fn test_unset_handlers_are_skipped() {
        let controller = Arc::new(FakeController::new());
        let paused = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&paused);

        let dyn_controller: Arc<dyn MediaController> = controller.clone();
        let _handle = configure_controller(&dyn_controller, move |events| {
            events.on_paused(move |_| *counter.lock() += 1);
        })
        .unwrap();

        controller.set_playback_state(PlaybackState::new(
            PlaybackStateKind::Playing,
            Position::Millis(1),
        ));
        controller.set_playback_state(PlaybackState::new(
            PlaybackStateKind::Paused,
            Position::Millis(2),
        ));

        assert_eq!(*paused.lock(), 1);
    }

    #[test]
    fn test_destroy_cancels_then_notifies() {
        let controller = Arc::new(FakeController::new());
        let recorder = EventRecorder::new();
        let handle = attach(&controller, &recorder);

        controller.destroy();

        assert!(!handle.is_listening());
        assert_eq!(controller.observer_count(), 0);
        assert_eq!(controller.unregister_count(), 1);
        assert_eq!(recorder.take(), vec![RecordedEvent::SessionDestroyed]);
    }

    #[test]
    fn test_handler_reads_live_controller_state() {
        let controller = Arc::new(FakeController::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let dyn_controller: Arc<dyn MediaController> = controller.clone();
        let _handle = configure_controller(&dyn_controller, move |events| {
            events.on_metadata_changed(move |ctx, _| sink.lock().push(ctx.state()));
        })
        .unwrap();

        controller.set_playback_state(PlaybackState::new(
            PlaybackStateKind::Buffering,
            Position::Unknown,
        ));
        controller.set_metadata(Metadata::with_title("A"));
        controller.set_playback_state(PlaybackState::new(
            PlaybackStateKind::Playing,
            Position::Unknown,
        ));
        controller.set_metadata(Metadata::with_title("A"));

        assert_eq!(
            *seen.lock(),
            vec![PlaybackStateKind::Buffering, PlaybackStateKind::Playing]
        );
    }
}
