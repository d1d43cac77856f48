//! Log Redaction Layer
//!
//! Scrubs player IP addresses and inline secrets from console traffic before
//! it reaches the logs.

use regex::Regex;
use std::sync::LazyLock;

static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,3}(?:\.\d{1,3}){3}(?::\d{1,5})?\b").unwrap());
static SECRET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(password|passwd|secret|token)(\s*[=:]\s*)\S+").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = IPV4_RE.replace_all(input, "[REDACTED_IP]");
    SECRET_RE
        .replace_all(&redacted, "${1}${2}[REDACTED]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_ip_address() {
        let raw = " - IP Address: /203.0.113.7:51234";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("203.0.113.7"));
        assert!(clean.contains("[REDACTED_IP]"));
    }

    #[test]
    fn test_redacts_inline_secret() {
        let clean = redact_sensitive_data("rcon password=hunter2 accepted");
        assert_eq!(clean, "rcon password=[REDACTED] accepted");
    }

    #[test]
    fn test_leaves_plain_text() {
        let raw = " - Exp: 1,234 (Level 5)";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
