//! Config validation: checks with user-friendly error messages.

use crate::defaults::DEFAULT_RCON_PASSWORD;
use crate::schema::BridgeConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &BridgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_rcon(config, &mut report);
    validate_gateway(config, &mut report);
    report
}

fn validate_rcon(config: &BridgeConfig, report: &mut ValidationReport) {
    if config.rcon_host().trim().is_empty() {
        report.error("rcon.host", "Host cannot be empty");
    }
    if config.rcon_port() == 0 {
        report.error("rcon.port", "Port must be between 1 and 65535");
    }
    if config.request_timeout().is_zero() {
        report.error("rcon.requestTimeoutMs", "Request timeout must be greater than 0");
    }
    if config.queue_depth() == 0 {
        report.error("rcon.queueDepth", "Queue depth must be greater than 0");
    }
    if config.rcon_password() == DEFAULT_RCON_PASSWORD {
        report.warn("rcon.password", "Using the default RCON password");
    }
}

fn validate_gateway(config: &BridgeConfig, report: &mut ValidationReport) {
    let bind = config.bind();
    match bind.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {}
        _ => report.error("gateway.bind", format!("Expected host:port, got '{bind}'")),
    }
}
