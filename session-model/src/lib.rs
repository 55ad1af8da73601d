//! Media Session Model
//!
//! The data shapes a media-session controller reports and the event
//! dispatcher in `session_events` reads:
//!
//! - [`PlaybackStateKind`]: the discrete playback state
//! - [`Position`]: playback offset, or the "unknown" sentinel
//! - [`Extras`]: auxiliary key-value bundle attached to states and sessions
//! - [`Metadata`]: the current media item's metadata record
//! - [`PlaybackState`]: the snapshot carried by a state notification
//!
//! # Example
//!
//! ```rust
//! use session_model::{PlaybackState, PlaybackStateKind, Position};
//!
//! let state = PlaybackState::new(PlaybackStateKind::Playing, Position::Millis(1_500));
//! assert!(state.state.is_playing());
//! assert_eq!(state.position.as_millis(), Some(1_500));
//! ```

pub mod extras;
pub mod metadata;
pub mod playback_state;
pub mod position;

pub use extras::{ExtraValue, Extras};
pub use metadata::Metadata;
pub use playback_state::{PlaybackState, PlaybackStateKind};
pub use position::Position;
