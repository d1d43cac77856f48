//! Console Event Logger
//!
//! Every command sent over the console session, and what came back, recorded as
//! structured tracing events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ConsoleEvent {
    CommandSent {
        command: String,
    },
    ReplyReceived {
        command: String,
        reply: String,
    },
    Failed {
        command: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub timestamp: DateTime<Utc>,
    pub event: ConsoleEvent,
}

pub struct ConsoleEventLogger;

impl ConsoleEventLogger {
    /// Redact an event and hand it to the tracing system.
    pub fn log_event(event: ConsoleEvent) {
        let entry = EventLogEntry {
            timestamp: Utc::now(),
            event: Self::redact(event),
        };

        match entry.event {
            ConsoleEvent::Failed { .. } => {
                warn!(target: "console_events", event = ?entry, "Console command failed")
            }
            _ => debug!(target: "console_events", event = ?entry, "Console traffic"),
        }
    }

    fn redact(event: ConsoleEvent) -> ConsoleEvent {
        match event {
            ConsoleEvent::CommandSent { command } => ConsoleEvent::CommandSent {
                command: redact_sensitive_data(&command),
            },
            ConsoleEvent::ReplyReceived { command, reply } => ConsoleEvent::ReplyReceived {
                command: redact_sensitive_data(&command),
                reply: redact_sensitive_data(&reply),
            },
            ConsoleEvent::Failed { command, error_msg } => ConsoleEvent::Failed {
                command: redact_sensitive_data(&command),
                error_msg: redact_sensitive_data(&error_msg),
            },
        }
    }
}
