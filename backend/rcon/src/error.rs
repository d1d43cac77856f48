use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RconError {
    #[error("RCON authentication rejected")]
    AuthRejected,

    #[error("RCON session is not authenticated")]
    NotAuthenticated,

    #[error("RCON protocol violation: {0}")]
    Protocol(String),

    #[error("RCON server sent no reply within {0:?}")]
    ReplyTimeout(Duration),

    #[error("RCON connection is unusable after an earlier failure")]
    ConnectionLost,
}
