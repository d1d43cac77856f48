//! `rconbridge-core`: shared model for the console bridge.
//!
//! Provides:
//! - The [`ConsoleBackend`] capability a live console connection implements
//! - [`SessionHandle`], the FIFO serializer in front of that connection
//! - Normalized records produced by the reply parsers
//! - The [`BridgeError`] kinds every layer reports

pub mod error;
pub mod session;
pub mod text;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{BridgeError, Result, SessionError};
pub use session::{SessionConfig, SessionHandle};
pub use traits::ConsoleBackend;
pub use types::{
    ActionOutcome, CatalogPage, CommandCatalog, CommandEntry, PlayerRef, PlayerStatus,
    COMMAND_MARKER,
};
