//! rconbridge runtime configuration schema.
//!
//! Every section is optional in the file; [`crate::defaults`] fills the gaps
//! and the accessors below fall back to the same defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::defaults::{
    DEFAULT_BIND, DEFAULT_HELP_TABLE, DEFAULT_LOG_LEVEL, DEFAULT_QUEUE_DEPTH, DEFAULT_RCON_HOST,
    DEFAULT_RCON_PASSWORD, DEFAULT_RCON_PORT, DEFAULT_REQUEST_TIMEOUT_MS,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Console connection to the game server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rcon: Option<RconConfig>,

    /// HTTP listener
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayConfig>,

    /// TSV file of curated command descriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_table: Option<String>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RconConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// How long a caller waits for a console reply, queueing included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
    /// Console commands allowed to wait behind the one in flight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// `host:port` the HTTP API listens on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for daily-rolling JSON logs; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl BridgeConfig {
    pub fn rcon_host(&self) -> &str {
        self.rcon
            .as_ref()
            .and_then(|r| r.host.as_deref())
            .unwrap_or(DEFAULT_RCON_HOST)
    }

    pub fn rcon_port(&self) -> u16 {
        self.rcon.as_ref().and_then(|r| r.port).unwrap_or(DEFAULT_RCON_PORT)
    }

    pub fn rcon_password(&self) -> &str {
        self.rcon
            .as_ref()
            .and_then(|r| r.password.as_deref())
            .unwrap_or(DEFAULT_RCON_PASSWORD)
    }

    pub fn request_timeout(&self) -> Duration {
        let ms = self
            .rcon
            .as_ref()
            .and_then(|r| r.request_timeout_ms)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        Duration::from_millis(ms)
    }

    pub fn queue_depth(&self) -> usize {
        self.rcon
            .as_ref()
            .and_then(|r| r.queue_depth)
            .unwrap_or(DEFAULT_QUEUE_DEPTH)
    }

    pub fn bind(&self) -> &str {
        self.gateway
            .as_ref()
            .and_then(|g| g.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    pub fn help_table_path(&self) -> PathBuf {
        PathBuf::from(self.help_table.as_deref().unwrap_or(DEFAULT_HELP_TABLE))
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .map(PathBuf::from)
    }
}
