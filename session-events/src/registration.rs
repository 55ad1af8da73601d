//! Attaching handlers to a session or controller
//!
//! Both entry points run the same two phases: fill in an [`EventHandlers`]
//! record, then build a [`NotificationProcessor`] from it and subscribe the
//! processor to the controller. The caller gets back a [`ListenerHandle`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::config::DispatchConfig;
use crate::controller::{ControllerObserver, MediaController, MediaSession, ObserverId};
use crate::error::Result;
use crate::handlers::EventHandlers;
use crate::processor::NotificationProcessor;

/// Shared cancellation state of one subscription
///
/// Both the caller's handle and the processor (on session destruction)
/// cancel through here, and only the first cancel reaches the controller.
///
/// The registration owns a strong controller reference while active, since
/// a session may hand out a fresh controller handle on every call and the
/// caller's copy is gone once `configure_session` returns. Cancelling
/// releases it, which breaks the controller -> processor -> registration
/// cycle; after that only the weak reference remains for late reads.
pub(crate) struct Registration {
    id: ObserverId,
    label: String,
    controller: Mutex<Option<Arc<dyn MediaController>>>,
    released: Weak<dyn MediaController>,
    active: AtomicBool,
}

impl Registration {
    fn new(id: ObserverId, label: String, controller: &Arc<dyn MediaController>) -> Self {
        Self {
            id,
            label,
            controller: Mutex::new(Some(Arc::clone(controller))),
            released: Arc::downgrade(controller),
            active: AtomicBool::new(true),
        }
    }

    pub(crate) fn id(&self) -> ObserverId {
        self.id
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// The controller, while it is still reachable
    pub(crate) fn controller(&self) -> Option<Arc<dyn MediaController>> {
        self.controller
            .lock()
            .clone()
            .or_else(|| self.released.upgrade())
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Unsubscribe from the controller, once
    pub(crate) fn cancel(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }

        // Taken out before calling the controller so no lock is held while
        // it runs.
        let controller = self.controller.lock().take();
        match controller.or_else(|| self.released.upgrade()) {
            Some(controller) => {
                controller.unregister_observer(self.id);
                tracing::info!(observer = %self.id, label = %self.label, "Stopped listening");
            }
            None => {
                tracing::debug!(
                    observer = %self.id,
                    label = %self.label,
                    "Controller already dropped, nothing to unregister"
                );
            }
        }
    }

    /// Mark inactive and release the controller without unregistering
    fn abandon(&self) {
        self.active.store(false, Ordering::Release);
        self.controller.lock().take();
    }
}

/// Handle returned to the caller for cancelling a registration
///
/// Dropping the handle does not stop listening; call
/// [`ListenerHandle::stop_listening`].
#[derive(Clone)]
pub struct ListenerHandle {
    registration: Arc<Registration>,
}

impl ListenerHandle {
    /// Deregister from the controller
    ///
    /// Calls after the first (or after the session was destroyed) do nothing.
    pub fn stop_listening(&self) {
        self.registration.cancel();
    }

    pub fn is_listening(&self) -> bool {
        self.registration.is_active()
    }

    pub fn observer_id(&self) -> ObserverId {
        self.registration.id()
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("observer", &self.registration.id())
            .field("label", &self.registration.label())
            .field("listening", &self.registration.is_active())
            .finish()
    }
}

/// Attach handlers to a session's controller with default settings
///
/// # Example
///
/// ```rust,ignore
/// let handle = session_events::configure_session(&session, |events| {
///     events
///         .on_started_playing(|ctx| println!("back from {}", ctx.state()))
///         .on_metadata_changed(|_ctx, metadata| println!("{:?}", metadata.title));
/// })?;
///
/// // later
/// handle.stop_listening();
/// ```
pub fn configure_session<S, F>(session: &S, build: F) -> Result<ListenerHandle>
where
    S: MediaSession + ?Sized,
    F: FnOnce(&mut EventHandlers),
{
    configure_session_with(session, DispatchConfig::default(), build)
}

/// Attach handlers to a session's controller
pub fn configure_session_with<S, F>(
    session: &S,
    config: DispatchConfig,
    build: F,
) -> Result<ListenerHandle>
where
    S: MediaSession + ?Sized,
    F: FnOnce(&mut EventHandlers),
{
    let controller = session.controller()?;
    configure_controller_with(&controller, config, build)
}

/// Attach handlers to a controller with default settings
pub fn configure_controller<F>(
    controller: &Arc<dyn MediaController>,
    build: F,
) -> Result<ListenerHandle>
where
    F: FnOnce(&mut EventHandlers),
{
    configure_controller_with(controller, DispatchConfig::default(), build)
}

/// Attach handlers to a controller
///
/// The processor is live as soon as `register_observer` is called. A
/// controller that delivers during registration has that notification
/// diffed against `None` / unknown position, so it may fire first-time
/// state and position events.
pub fn configure_controller_with<F>(
    controller: &Arc<dyn MediaController>,
    config: DispatchConfig,
    build: F,
) -> Result<ListenerHandle>
where
    F: FnOnce(&mut EventHandlers),
{
    let mut handlers = EventHandlers::new();
    build(&mut handlers);

    let DispatchConfig { delivery, label } = config;
    let registration = Arc::new(Registration::new(
        ObserverId::next(),
        label,
        controller,
    ));

    tracing::debug!(
        observer = %registration.id(),
        label = %registration.label(),
        delivery = %delivery.name(),
        handlers = ?handlers,
        "Registering observer"
    );

    let processor: Arc<dyn ControllerObserver> =
        Arc::new(NotificationProcessor::new(handlers, Arc::clone(&registration)));

    if let Err(err) = controller.register_observer(registration.id(), processor, delivery) {
        registration.abandon();
        tracing::warn!(
            observer = %registration.id(),
            label = %registration.label(),
            error = %err,
            "Observer registration failed"
        );
        return Err(err);
    }

    tracing::info!(
        observer = %registration.id(),
        label = %registration.label(),
        "Listening for session events"
    );

    Ok(ListenerHandle { registration })
}
