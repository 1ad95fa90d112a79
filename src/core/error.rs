use thiserror::Error;

/// Coarse classification of a failed request, independent of the backend
/// that produced it. Callers branch on this instead of on transport-library
/// error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    RateLimited,
    Status,
    Protocol,
    Unknown,
}

#[derive(Error, Debug)]
pub enum RequestError {
    /// A prerequisite (credential, URL, client) was missing before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection failure or timeout before a status line was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered 429.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other non-2xx status.
    #[error("server status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response arrived but did not have the expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl RequestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::Config(_) => ErrorKind::Config,
            RequestError::Transport(_) => ErrorKind::Transport,
            RequestError::RateLimited(_) => ErrorKind::RateLimited,
            RequestError::Status { .. } => ErrorKind::Status,
            RequestError::Protocol(_) => ErrorKind::Protocol,
            RequestError::Unknown(_) => ErrorKind::Unknown,
        }
    }
}
