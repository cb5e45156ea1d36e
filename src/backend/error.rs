//! Backend-specific error types.

use thiserror::Error;

/// Errors that can occur while querying or mutating the windowing backend.
///
/// All of them mean the backend could not be reached or understood; none are
/// retried.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Failed to connect to the compositor socket.
    #[error("Failed to connect to compositor socket: {0}")]
    ConnectionFailed(#[source] std::io::Error),

    /// Error during IPC communication.
    #[error("IPC communication error: {0}")]
    IpcError(String),

    /// Failed to parse the compositor response.
    #[error("Failed to parse compositor response: {0}")]
    ParseError(#[source] serde_json::Error),

    /// Window not found.
    #[error("Window not found: {0}")]
    WindowNotFound(String),

    /// The backend is not available in this environment.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The memory backend fixture could not be loaded.
    #[error("Invalid window fixture: {0}")]
    Fixture(String),
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::ConnectionFailed(err)
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::ParseError(err)
    }
}
