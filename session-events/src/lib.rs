//! Media Session Events
//!
//! Declarative, edge-triggered callbacks over a platform media-session
//! controller. Instead of implementing the raw observer interface, a caller
//! picks the events it cares about and gets a handle to cancel later.
//!
//! # Architecture
//!
//! ```text
//! MediaController ──raw notifications──▶ NotificationProcessor ──derived events──▶ handlers
//!   (host owned)      (on a DeliveryContext)    (EdgeDetector)
//! ```
//!
//! Derived events:
//!
//! - **state changed**: discrete state differs from the last one observed
//! - **started playing**: playing after stopped or error (not after paused)
//! - **paused** / **stopped playing**: every change into those states
//! - **position changed**: position differs from the last one observed
//! - **metadata changed**: every metadata notification, no dedup
//! - **session destroyed**: the registration cancels itself
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use session_events::testing::FakeController;
//! use session_events::{configure_controller, MediaController, PlaybackStateKind, Position};
//!
//! let fake = Arc::new(FakeController::new());
//! let controller: Arc<dyn MediaController> = fake.clone();
//!
//! let handle = configure_controller(&controller, |events| {
//!     events
//!         .on_state_changed(|_ctx, previous, state| println!("{} -> {}", previous, state.state))
//!         .on_position_changed(|_ctx, position| println!("at {}", position))
//!         .on_stopped_playing(|ctx| println!("stopped, extras: {:?}", ctx.extras()));
//! })
//! .unwrap();
//!
//! fake.report(PlaybackStateKind::Playing, Position::Millis(0));
//! handle.stop_listening();
//! ```
//!
//! # Delivery
//!
//! Controllers post every notification for a registration onto the
//! [`DeliveryContext`] chosen in [`DispatchConfig`]; a [`Looper`] gives a
//! dedicated thread for that.
//!
//! ```rust,ignore
//! let looper = Looper::spawn("media-main")?;
//! let config = DispatchConfig::new().on_looper(&looper).with_label("now-playing");
//! let handle = configure_session_with(&session, config, |events| { /* ... */ })?;
//! ```

pub mod config;
pub mod context;
pub mod controller;
pub mod delivery;
pub mod edge;
pub mod error;
pub mod handlers;
pub mod logging;
mod processor;
mod registration;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::DispatchConfig;
pub use context::SessionContext;
pub use controller::{ControllerObserver, MediaController, MediaSession, ObserverId};
pub use delivery::{DeliveryContext, Executor, Looper, Task};
pub use edge::{DerivedEvents, EdgeDetector, StateChange, Transition};
pub use error::{Result, SessionError};
pub use handlers::EventHandlers;
pub use registration::{
    configure_controller, configure_controller_with, configure_session, configure_session_with,
    ListenerHandle,
};

pub use session_model::{ExtraValue, Extras, Metadata, PlaybackState, PlaybackStateKind, Position};

pub use logging::{init_logging, init_logging_from_env, init_silent, LoggingError, LoggingMode};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::DispatchConfig;
    pub use crate::context::SessionContext;
    pub use crate::controller::{MediaController, MediaSession};
    pub use crate::delivery::{DeliveryContext, Looper};
    pub use crate::handlers::EventHandlers;
    pub use crate::registration::{
        configure_controller, configure_controller_with, configure_session,
        configure_session_with, ListenerHandle,
    };
    pub use session_model::{Metadata, PlaybackState, PlaybackStateKind, Position};
}
