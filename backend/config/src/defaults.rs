//! Config defaults: applies default values to a parsed config.

use crate::schema::{BridgeConfig, GatewayConfig, LoggingConfig, RconConfig};

pub const DEFAULT_RCON_HOST: &str = "127.0.0.1";
pub const DEFAULT_RCON_PORT: u16 = 25575;
/// Password the game ships in `server.properties` examples.
pub const DEFAULT_RCON_PASSWORD: &str = "minecraft";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_QUEUE_DEPTH: usize = 64;
pub const DEFAULT_BIND: &str = "localhost:25585";
pub const DEFAULT_HELP_TABLE: &str = "./help.tsv";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: BridgeConfig) -> BridgeConfig {
    let config = apply_rcon_defaults(config);
    let config = apply_gateway_defaults(config);
    apply_logging_defaults(config)
}

fn apply_rcon_defaults(mut config: BridgeConfig) -> BridgeConfig {
    let rcon = config.rcon.get_or_insert_with(RconConfig::default);
    rcon.host.get_or_insert_with(|| DEFAULT_RCON_HOST.to_string());
    rcon.port.get_or_insert(DEFAULT_RCON_PORT);
    rcon.password.get_or_insert_with(|| DEFAULT_RCON_PASSWORD.to_string());
    rcon.request_timeout_ms.get_or_insert(DEFAULT_REQUEST_TIMEOUT_MS);
    rcon.queue_depth.get_or_insert(DEFAULT_QUEUE_DEPTH);
    config
        .help_table
        .get_or_insert_with(|| DEFAULT_HELP_TABLE.to_string());
    config
}

fn apply_gateway_defaults(mut config: BridgeConfig) -> BridgeConfig {
    let gateway = config.gateway.get_or_insert_with(GatewayConfig::default);
    gateway.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    config
}

fn apply_logging_defaults(mut config: BridgeConfig) -> BridgeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}
