//! Player directory parser: the `list` reply as structured player refs.
//!
//! Below the header, each line is `<world or group>: <name>[, <name>...]`.
use tracing::debug;

use rconbridge_core::text::body_lines;
use rconbridge_core::{BridgeError, PlayerRef, Result, SessionHandle};

pub const LIST_COMMAND: &str = "list";

/// Parse a `list` reply, preserving the console's order.
pub fn parse_players(reply: &str) -> Result<Vec<PlayerRef>> {
    let mut players = Vec::new();
    for line in body_lines(reply) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(": ").collect();
        let [world, names] = fields.as_slice() else {
            return Err(BridgeError::parse(format!(
                "player list line is not `world: name`: {line:?}"
            )));
        };
        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            players.push(PlayerRef {
                world: world.trim().to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(players)
}

pub async fn fetch_players(session: &SessionHandle) -> Result<Vec<PlayerRef>> {
    let reply = session.execute(LIST_COMMAND).await?;
    let players = parse_players(&reply)?;
    debug!(players = players.len(), "Fetched player list");
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconbridge_core::testing::ScriptedConsole;

    #[tokio::test]
    async fn lists_players_in_order() {
        let console = ScriptedConsole::new().reply(
            "list",
            "There are 2 out of maximum 20 players online.\nworld: alice\nworld: bob",
        );
        let players = fetch_players(&console.session()).await.unwrap();
        assert_eq!(
            players,
            vec![
                PlayerRef { world: "world".into(), name: "alice".into() },
                PlayerRef { world: "world".into(), name: "bob".into() },
            ]
        );
        assert_eq!(console.sent(), vec!["list"]);
    }

    #[test]
    fn grouped_names_expand_to_one_ref_each() {
        let players = parse_players("header\n§6admins§r: carol, dave\nworld_nether: erin\n").unwrap();
        let names: Vec<_> = players.iter().map(|p| (p.world.as_str(), p.name.as_str())).collect();
        assert_eq!(names, vec![("admins", "carol"), ("admins", "dave"), ("world_nether", "erin")]);
    }

    #[test]
    fn empty_server_has_no_players() {
        let players = parse_players("There are 0 out of maximum 20 players online.").unwrap();
        assert!(players.is_empty());
    }

    #[test]
    fn malformed_line_fails_fast() {
        assert!(matches!(parse_players("header\njust a name"), Err(BridgeError::Parse(_))));
        assert!(matches!(parse_players("header\na: b: c"), Err(BridgeError::Parse(_))));
    }
}
