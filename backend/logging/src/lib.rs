//! Telemetry and structured logging components for rconbridge.
//!
//! Handles subscriber setup, redaction of secrets and addresses, and the
//! console traffic event log.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ConsoleEvent, ConsoleEventLogger, EventLogEntry};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
