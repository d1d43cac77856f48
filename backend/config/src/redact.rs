//! Config redaction: hide secrets before a config is logged or displayed.

use crate::schema::BridgeConfig;

pub const REDACTED: &str = "__REDACTED__";

/// Copy of `config` with the RCON password replaced.
pub fn redact(config: &BridgeConfig) -> BridgeConfig {
    let mut redacted = config.clone();
    if let Some(rcon) = redacted.rcon.as_mut() {
        if rcon.password.is_some() {
            rcon.password = Some(REDACTED.to_string());
        }
    }
    redacted
}
