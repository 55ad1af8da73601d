//! The host platform's side of the contract
//!
//! A host implements [`MediaController`] (and usually [`MediaSession`]) over
//! its own session machinery. The dispatcher only ever reads current values
//! and subscribes a [`ControllerObserver`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use session_model::{Extras, Metadata, PlaybackState};

use crate::delivery::DeliveryContext;
use crate::error::Result;

/// Identity of a registered observer
///
/// Allocated by the dispatcher before subscribing, so a processor knows its
/// own id even when the controller delivers during `register_observer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Allocate a process-unique id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

/// Raw change notifications a controller delivers
pub trait ControllerObserver: Send + Sync {
    fn on_playback_state_changed(&self, state: &PlaybackState);

    fn on_metadata_changed(&self, metadata: &Metadata);

    /// The session is gone; no further notifications follow
    fn on_session_destroyed(&self);
}

/// A controller handle owned by the host platform
pub trait MediaController: Send + Sync {
    /// Current playback state, read live
    fn playback_state(&self) -> PlaybackState;

    /// Current metadata, read live
    fn metadata(&self) -> Metadata;

    /// Session-level auxiliary data
    fn session_extras(&self) -> Extras;

    /// Subscribe `observer`; every notification for it must be posted to
    /// `context`.
    fn register_observer(
        &self,
        id: ObserverId,
        observer: Arc<dyn ControllerObserver>,
        context: DeliveryContext,
    ) -> Result<()>;

    /// Stop delivering to the observer registered as `id`
    fn unregister_observer(&self, id: ObserverId);
}

/// A session handle that can hand out its controller
pub trait MediaSession: Send + Sync {
    fn controller(&self) -> Result<Arc<dyn MediaController>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_ids_are_unique_and_increasing() {
        let first = ObserverId::next();
        let second = ObserverId::next();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn test_observer_id_display() {
        let id = ObserverId::next();
        assert_eq!(id.to_string(), format!("observer-{}", id.as_u64()));
    }
}
