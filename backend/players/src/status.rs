//! Player status parser: the `whois` block as a normalized record.
//!
//! Below the header, each line is ` - <Key>: <value>`. Keys are normalized to
//! snake case, then a fixed set of decoders turns the required fields into
//! typed values. Everything else is carried through verbatim.
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use rconbridge_core::text::{body_lines, split_field, strip_formatting};
use rconbridge_core::{BridgeError, PlayerStatus, Result, SessionHandle};

use crate::actions::validate_username;

pub const WHOIS_COMMAND: &str = "whois";

/// Replies that mean the player is not online or never existed.
const NOT_FOUND_MARKERS: &[&str] = &["player not found", "no player was found"];

static EXP_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*([\d,]+)\s*\(\s*level\s+([\d,]+)\s*\)").unwrap());
static RATIO_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([\d,]+)\s*/\s*([\d,]+)").unwrap());

/// Normalize a raw whois key: `" - Fly mode"` → `"fly_mode"`.
pub fn normalize_key(raw: &str) -> String {
    strip_formatting(raw)
        .to_lowercase()
        .replace(" - ", "")
        .trim()
        .trim_start_matches('-')
        .trim()
        .replace(' ', "_")
}

/// Parse a whois reply for `username`.
pub fn parse_status(username: &str, reply: &str) -> Result<PlayerStatus> {
    if is_not_found(reply) {
        return Err(BridgeError::NotFound(format!("player {username}")));
    }

    let mut fields = BTreeMap::new();
    for line in body_lines(reply) {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = split_field(&line)
            .ok_or_else(|| BridgeError::parse(format!("whois line is not `key: value`: {line:?}")))?;
        fields.insert(normalize_key(key), value.trim().to_string());
    }

    let mut decoder = FieldDecoder { fields };

    // Order matters only for error reporting: the first missing field is named.
    let fly_mode = decoder.flag("fly_mode")?;
    let god_mode = decoder.flag("god_mode")?;
    let op = decoder.flag("op")?;
    let afk = decoder.flag("afk")?;
    let jail = decoder.flag("jail")?;
    let muted = decoder.flag("muted")?;
    let (exp, level) = decoder.experience("exp")?;
    let (health_current, health_full) = decoder.ratio("health")?;
    let (hunger_current, hunger_full) = decoder.ratio("hunger")?;

    Ok(PlayerStatus {
        fly_mode,
        god_mode,
        op,
        afk,
        jail,
        muted,
        exp,
        level,
        health_current,
        health_full,
        hunger_current,
        hunger_full,
        extra: decoder.fields,
    })
}

pub async fn fetch_status(session: &SessionHandle, username: &str) -> Result<PlayerStatus> {
    validate_username(username)?;
    let reply = session.execute(&format!("{WHOIS_COMMAND} {username}")).await?;
    let status = parse_status(username, &reply)?;
    debug!(username = %username, level = status.level, "Fetched player status");
    Ok(status)
}

fn is_not_found(reply: &str) -> bool {
    let reply = strip_formatting(reply).to_lowercase();
    reply.trim().is_empty() || NOT_FOUND_MARKERS.iter().any(|m| reply.contains(m))
}

/// Takes required fields out of the raw map; what remains is `extra`.
struct FieldDecoder {
    fields: BTreeMap<String, String>,
}

impl FieldDecoder {
    fn take(&mut self, key: &str) -> Result<String> {
        self.fields
            .remove(key)
            .ok_or_else(|| BridgeError::parse(format!("whois reply has no `{key}` field")))
    }

    /// The console prints `true`/`false`, sometimes followed by a note such as
    /// `(not flying)`, so only containment of `true` is checked.
    fn flag(&mut self, key: &str) -> Result<bool> {
        Ok(self.take(key)?.contains("true"))
    }

    /// `"1,234 (Level 5)"` → `(1234, 5)`.
    fn experience(&mut self, key: &str) -> Result<(i64, i64)> {
        let raw = self.take(key)?;
        let caps = EXP_SHAPE
            .captures(&raw)
            .ok_or_else(|| BridgeError::parse(format!("`{key}` is not `<exp> (Level <n>)`: {raw:?}")))?;
        Ok((number(key, &caps[1])?, number(key, &caps[2])?))
    }

    /// `"10/20 (+5 saturation)"` → `(10, 20)`.
    fn ratio(&mut self, key: &str) -> Result<(i64, i64)> {
        let raw = self.take(key)?;
        let caps = RATIO_SHAPE
            .captures(&raw)
            .ok_or_else(|| BridgeError::parse(format!("`{key}` is not `<current>/<max>`: {raw:?}")))?;
        Ok((number(key, &caps[1])?, number(key, &caps[2])?))
    }
}

fn number(key: &str, digits: &str) -> Result<i64> {
    digits
        .replace(',', "")
        .parse()
        .map_err(|_| BridgeError::parse(format!("`{key}` has an unreadable number: {digits:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconbridge_core::testing::ScriptedConsole;

    const WHOIS_ALICE: &str = "§6====== WhoIs:§c alice §6======
§6 - Nick:§r alice
§6 - Health:§r 10/20 (healthy)
§6 - Hunger:§r 18/20 (+5 saturation)
§6 - Exp:§r 1,234 (Level 5)
§6 - Location:§r (world, 10, 64, -3)
§6 - Game mode:§r survival
§6 - God mode:§r §afalse
§6 - OP:§r §atrue
§6 - Fly mode:§r false (not flying)
§6 - AFK:§r §cfalse
§6 - Jail:§r §cfalse
§6 - Muted:§r §cfalse
";

    #[test]
    fn normalizes_keys() {
        assert_eq!(normalize_key("§6 - Fly mode"), "fly_mode");
        assert_eq!(normalize_key("- IP Address"), "ip_address");
        assert_eq!(normalize_key("OP"), "op");
    }

    #[test]
    fn parses_required_fields() {
        let status = parse_status("alice", WHOIS_ALICE).unwrap();
        assert_eq!(status.exp, 1234);
        assert_eq!(status.level, 5);
        assert_eq!(status.health_current, 10);
        assert_eq!(status.health_full, 20);
        assert_eq!(status.hunger_current, 18);
        assert_eq!(status.hunger_full, 20);
        assert!(status.op);
        assert!(!status.god_mode);
        assert!(!status.fly_mode);
        assert!(!status.muted);
    }

    #[test]
    fn extra_fields_pass_through_without_raw_composites() {
        let status = parse_status("alice", WHOIS_ALICE).unwrap();
        assert_eq!(status.extra.get("game_mode").map(String::as_str), Some("survival"));
        assert_eq!(status.extra.get("nick").map(String::as_str), Some("alice"));
        assert!(!status.extra.contains_key("health"));
        assert!(!status.extra.contains_key("hunger"));
        assert!(!status.extra.contains_key("op"));
    }

    #[test]
    fn missing_required_field_is_parse_error() {
        let without_muted: String = WHOIS_ALICE
            .lines()
            .filter(|l| !l.contains("Muted"))
            .collect::<Vec<_>>()
            .join("\n");
        let err = parse_status("alice", &without_muted).unwrap_err();
        assert!(matches!(err, BridgeError::Parse(ref m) if m.contains("muted")));
    }

    #[test]
    fn malformed_exp_is_parse_error() {
        let reply = WHOIS_ALICE.replace("1,234 (Level 5)", "lots");
        assert!(matches!(parse_status("alice", &reply), Err(BridgeError::Parse(_))));
    }

    #[test]
    fn unknown_player_is_not_found() {
        let err = parse_status("ghost", "§4Error:§c Player not found.").unwrap_err();
        assert!(matches!(err, BridgeError::NotFound(_)));
        assert!(matches!(parse_status("ghost", ""), Err(BridgeError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_issues_whois() {
        let console = ScriptedConsole::new().reply("whois alice", WHOIS_ALICE);
        let status = fetch_status(&console.session(), "alice").await.unwrap();
        assert_eq!(status.level, 5);
        assert_eq!(console.sent(), vec!["whois alice"]);
    }

    #[tokio::test]
    async fn invalid_username_sends_nothing() {
        let console = ScriptedConsole::new();
        let err = fetch_status(&console.session(), "alice; stop").await.unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
        assert!(console.sent().is_empty());
    }
}
