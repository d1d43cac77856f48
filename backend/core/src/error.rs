use std::time::Duration;

use thiserror::Error;

/// Failures of the serialized console session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console session is disconnected")]
    Disconnected,

    #[error("console command timed out after {0:?}")]
    Timeout(Duration),

    #[error("console backend error: {0}")]
    Backend(String),
}

/// Top-level error type for rconbridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("unexpected console reply: {0}")]
    Parse(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("console rejected the command: {0}")]
    Rejected(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BridgeError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::Session(SessionError::Timeout(_)) => "session_timeout",
            BridgeError::Session(_) => "session",
            BridgeError::Parse(_) => "parse",
            BridgeError::NotFound(_) => "not_found",
            BridgeError::InvalidArgument(_) => "invalid_argument",
            BridgeError::Rejected(_) => "rejected",
            BridgeError::Other(_) => "internal",
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
