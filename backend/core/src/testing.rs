//! Scripted console backend for tests across the workspace.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::session::{SessionConfig, SessionHandle};
use crate::traits::ConsoleBackend;

/// Backend that answers from a fixed command → reply script and records
/// every command it receives.
#[derive(Clone, Default)]
pub struct ScriptedConsole {
    replies: HashMap<String, String>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, command: &str, reply: &str) -> Self {
        self.replies.insert(command.to_string(), reply.to_string());
        self
    }

    /// Commands received so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Spawn a session over a clone of this script, keeping `self` for
    /// inspecting traffic.
    pub fn session(&self) -> SessionHandle {
        SessionHandle::spawn(self.clone(), SessionConfig::default())
    }
}

#[async_trait]
impl ConsoleBackend for ScriptedConsole {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn command(&mut self, text: &str) -> anyhow::Result<String> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(text.to_string());
        }
        match self.replies.get(text) {
            Some(reply) => Ok(reply.clone()),
            None => Ok(format!("Unknown command. Type \"/help\" for help. ({text})")),
        }
    }
}
