use std::path::PathBuf;

use rconbridge_config::{BridgeConfig, GatewayConfig, RconConfig};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub rcon_host: Option<String>,
    pub rcon_port: Option<u16>,
    pub rcon_password: Option<String>,
    pub help_table: Option<PathBuf>,
}

impl Overrides {
    /// Apply every flag that was given on top of `config`.
    pub fn apply(self, mut config: BridgeConfig) -> BridgeConfig {
        let rcon = config.rcon.get_or_insert_with(RconConfig::default);
        if let Some(host) = self.rcon_host {
            rcon.host = Some(host);
        }
        if let Some(port) = self.rcon_port {
            rcon.port = Some(port);
        }
        if let Some(password) = self.rcon_password {
            rcon.password = Some(password);
        }
        if let Some(bind) = self.bind {
            config.gateway.get_or_insert_with(GatewayConfig::default).bind = Some(bind);
        }
        if let Some(path) = self.help_table {
            config.help_table = Some(path.to_string_lossy().into_owned());
        }
        config
    }
}
