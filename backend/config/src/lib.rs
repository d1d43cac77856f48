//! `rconbridge-config`: runtime configuration management.
//!
//! Provides:
//! - Typed config schema (console connection, HTTP listener, logging)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Default value application
//! - Validation with errors and warnings
//! - Redaction for safe logging

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_raw_config};
pub use redact::redact;
pub use schema::{BridgeConfig, GatewayConfig, LoggingConfig, RconConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply defaults to, and validate a config file.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<BridgeConfig> {
    let raw = load_raw_config(path).await?;
    prepare(raw, &std::env::vars().collect())
}

/// [`resolve`] followed by [`check`].
pub fn prepare(raw: Value, env: &HashMap<String, String>) -> Result<BridgeConfig> {
    let config = resolve(raw, env)?;
    check(&config)?;
    Ok(config)
}

/// Substitute env vars, deserialize, and fill defaults. No validation.
pub fn resolve(raw: Value, env: &HashMap<String, String>) -> Result<BridgeConfig> {
    let value = resolve_env_vars_with(&raw, env).context("Failed to resolve env vars in config")?;

    let config: BridgeConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;

    Ok(apply_all_defaults(config))
}

/// Validate, log every finding, and fail on the first error.
pub fn check(config: &BridgeConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("Config has {} error(s); first: {}", report.errors.len(), report.errors[0]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prepare_resolves_and_defaults() {
        let raw = json!({"rcon": {"host": "mc.local", "password": "${RCON_PASSWORD}"}});
        let env = HashMap::from([("RCON_PASSWORD".to_string(), "s3cret".to_string())]);
        let config = prepare(raw, &env).unwrap();
        assert_eq!(config.rcon_host(), "mc.local");
        assert_eq!(config.rcon_password(), "s3cret");
        assert_eq!(config.rcon_port(), defaults::DEFAULT_RCON_PORT);
        assert_eq!(config.bind(), defaults::DEFAULT_BIND);
    }

    #[test]
    fn prepare_rejects_invalid_config() {
        let raw = json!({"gateway": {"bind": "nowhere"}});
        let err = prepare(raw, &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("gateway.bind"));
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let config = load_and_prepare(Path::new("/nonexistent/rconbridge.yaml"))
            .await
            .unwrap();
        assert_eq!(config.rcon_host(), defaults::DEFAULT_RCON_HOST);
        assert_eq!(config.queue_depth(), defaults::DEFAULT_QUEUE_DEPTH);
    }
}
