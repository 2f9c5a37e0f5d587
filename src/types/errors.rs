//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the kernel bridge.
#[derive(Error, Debug)]
pub enum Error {
    /// The transport server could not open its sockets, or a notifier/timer
    /// could not be registered with the event loop during start.
    #[error("startup failure: {0}")]
    Startup(String),

    /// Caller-supplied value rejected synchronously (no state change).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation invoked in a state that does not permit it.
    #[error("state transition error: {0}")]
    StateTransition(String),

    /// Error raised while draining a socket's pending messages. Never allowed
    /// to propagate out of an event-loop callback; routed through the
    /// transport's error-reporting hook instead.
    #[error("processing error: {0}")]
    Processing(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors (descriptor registration, socket inspection).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn startup(msg: impl Into<String>) -> Self {
        Self::Startup(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn state_transition(msg: impl Into<String>) -> Self {
        Self::StateTransition(msg.into())
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }
}
