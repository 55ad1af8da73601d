use thiserror::Error;

/// Result type for session-events operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Failures surfaced while attaching to a session
///
/// Dispatching itself has no failure modes; everything here is either
/// reported by the controller or comes from setting up a delivery thread.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Controller refused observer registration: {0}")]
    Registration(String),

    #[error("Media session has been released")]
    SessionReleased,

    #[error("Failed to start looper thread: {0}")]
    Looper(#[from] std::io::Error),
}
