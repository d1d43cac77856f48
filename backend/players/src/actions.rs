//! Player actions: builds mutating console commands and reads their replies.
//!
//! Every argument is validated before anything is sent, so a rejected request
//! never has a side effect on the server.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use rconbridge_core::{ActionOutcome, BridgeError, Result, SessionHandle};

/// Longest player name the game accepts.
const MAX_USERNAME_LEN: usize = 16;

/// Reply fragments that mean the console refused the command.
const ERROR_MARKERS: &[&str] = &[
    "unknown command",
    "player not found",
    "no player was found",
    "incorrect argument",
];

/// Reply word that marks a toggle as switched off.
const DISABLED_MARKER: &str = "disabled";

// ---------------------------------------------------------------------------
// Game mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Survival,
        GameMode::Creative,
        GameMode::Adventure,
        GameMode::Spectator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<_> = GameMode::ALL.iter().map(GameMode::as_str).collect();
                BridgeError::invalid(format!(
                    "unknown game mode `{s}`; valid modes: {}",
                    valid.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// One mutating console action against a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    GrantPrivilege(bool),
    SetExperience(u64),
    SetGameMode(GameMode),
    Ignite(u32),
    Feed,
    Heal,
    ToggleFlight,
    ToggleInvulnerability,
}

impl PlayerAction {
    /// Console command text for this action on `username`.
    pub fn command(&self, username: &str) -> String {
        match self {
            PlayerAction::GrantPrivilege(true) => format!("op {username}"),
            PlayerAction::GrantPrivilege(false) => format!("deop {username}"),
            PlayerAction::SetExperience(exp) => format!("exp set {username} {exp}"),
            PlayerAction::SetGameMode(mode) => format!("gamemode {mode} {username}"),
            PlayerAction::Ignite(seconds) => format!("burn {username} {seconds}"),
            PlayerAction::Feed => format!("feed {username}"),
            PlayerAction::Heal => format!("heal {username}"),
            PlayerAction::ToggleFlight => format!("fly {username}"),
            PlayerAction::ToggleInvulnerability => format!("god {username}"),
        }
    }
}

/// Reject names the console could misread as extra command arguments.
pub fn validate_username(username: &str) -> Result<()> {
    let valid = !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(BridgeError::invalid(format!(
            "`{username}` is not a valid player name (1-{MAX_USERNAME_LEN} letters, digits or _)"
        )))
    }
}

/// Success unless the reply carries an error marker; the reply is the message.
pub fn interpret_reply(reply: &str) -> ActionOutcome {
    let message = rconbridge_core::text::strip_formatting(reply).trim().to_string();
    let lower = message.to_lowercase();
    let failed = lower.starts_with("error") || ERROR_MARKERS.iter().any(|m| lower.contains(m));
    ActionOutcome {
        success: !failed,
        message,
    }
}

/// Issues player actions through the console session.
#[derive(Clone)]
pub struct PlayerActions {
    session: SessionHandle,
}

impl PlayerActions {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    pub async fn grant_privilege(&self, username: &str, grant: bool) -> Result<ActionOutcome> {
        self.run(username, PlayerAction::GrantPrivilege(grant)).await
    }

    pub async fn set_experience(&self, username: &str, exp: i64) -> Result<ActionOutcome> {
        let exp = u64::try_from(exp)
            .map_err(|_| BridgeError::invalid(format!("exp must not be negative, got {exp}")))?;
        self.run(username, PlayerAction::SetExperience(exp)).await
    }

    pub async fn set_game_mode(&self, username: &str, mode: &str) -> Result<ActionOutcome> {
        let mode: GameMode = mode.parse()?;
        self.run(username, PlayerAction::SetGameMode(mode)).await
    }

    pub async fn ignite(&self, username: &str, seconds: Option<i64>) -> Result<ActionOutcome> {
        let seconds = seconds
            .filter(|s| *s > 0)
            .and_then(|s| u32::try_from(s).ok())
            .ok_or_else(|| BridgeError::invalid("seconds must be a positive integer"))?;
        self.run(username, PlayerAction::Ignite(seconds)).await
    }

    pub async fn feed(&self, username: &str) -> Result<ActionOutcome> {
        self.run(username, PlayerAction::Feed).await
    }

    pub async fn heal(&self, username: &str) -> Result<ActionOutcome> {
        self.run(username, PlayerAction::Heal).await
    }

    /// Toggle flight; returns whether flight is now enabled.
    pub async fn toggle_flight(&self, username: &str) -> Result<bool> {
        self.toggle(username, PlayerAction::ToggleFlight).await
    }

    /// Toggle god mode; returns whether the player is now invulnerable.
    pub async fn toggle_invulnerability(&self, username: &str) -> Result<bool> {
        self.toggle(username, PlayerAction::ToggleInvulnerability).await
    }

    async fn run(&self, username: &str, action: PlayerAction) -> Result<ActionOutcome> {
        let reply = self.send(username, &action).await?;
        Ok(interpret_reply(&reply))
    }

    async fn toggle(&self, username: &str, action: PlayerAction) -> Result<bool> {
        let reply = self.send(username, &action).await?;
        let outcome = interpret_reply(&reply);
        if !outcome.success {
            return Err(BridgeError::Rejected(outcome.message));
        }
        Ok(!outcome.message.to_lowercase().contains(DISABLED_MARKER))
    }

    async fn send(&self, username: &str, action: &PlayerAction) -> Result<String> {
        validate_username(username)?;
        let command = action.command(username);
        info!(username = %username, action = ?action, "Sending player action");
        self.session.execute(&command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconbridge_core::testing::ScriptedConsole;

    fn actions(console: &ScriptedConsole) -> PlayerActions {
        PlayerActions::new(console.session())
    }

    #[test]
    fn builds_console_commands() {
        assert_eq!(PlayerAction::GrantPrivilege(true).command("alice"), "op alice");
        assert_eq!(PlayerAction::GrantPrivilege(false).command("alice"), "deop alice");
        assert_eq!(PlayerAction::SetExperience(300).command("alice"), "exp set alice 300");
        assert_eq!(
            PlayerAction::SetGameMode(GameMode::Creative).command("alice"),
            "gamemode creative alice"
        );
        assert_eq!(PlayerAction::Ignite(5).command("alice"), "burn alice 5");
        assert_eq!(PlayerAction::ToggleInvulnerability.command("alice"), "god alice");
    }

    #[test]
    fn game_mode_parsing_lists_valid_modes() {
        assert_eq!("Spectator".parse::<GameMode>().unwrap(), GameMode::Spectator);
        let err = "flying".parse::<GameMode>().unwrap_err();
        let message = err.to_string();
        for mode in ["survival", "creative", "adventure", "spectator"] {
            assert!(message.contains(mode), "{message} should list {mode}");
        }
    }

    #[test]
    fn username_validation() {
        assert!(validate_username("Alice_01").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("alice bob").is_err());
        assert!(validate_username("a_name_that_is_too_long").is_err());
    }

    #[test]
    fn error_markers_mark_failure() {
        assert!(interpret_reply("Made alice a server operator").success);
        assert!(!interpret_reply("§4Error:§c Player not found.").success);
        assert!(!interpret_reply("Unknown command. Type \"/help\" for help.").success);
        assert_eq!(interpret_reply("  Healed alice \n").message, "Healed alice");
    }

    #[tokio::test]
    async fn invalid_game_mode_sends_nothing() {
        let console = ScriptedConsole::new();
        let err = actions(&console).set_game_mode("alice", "flying").await.unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
        assert!(console.sent().is_empty());
    }

    #[tokio::test]
    async fn ignite_requires_positive_seconds() {
        let console = ScriptedConsole::new();
        let actions = actions(&console);
        for seconds in [None, Some(0), Some(-3)] {
            let err = actions.ignite("alice", seconds).await.unwrap_err();
            assert!(matches!(err, BridgeError::InvalidArgument(_)));
        }
        assert!(console.sent().is_empty());
    }

    #[tokio::test]
    async fn ignite_sends_burn() {
        let console = ScriptedConsole::new().reply("burn alice 4", "You set alice on fire for 4 seconds.");
        let outcome = actions(&console).ignite("alice", Some(4)).await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "You set alice on fire for 4 seconds.");
    }

    #[tokio::test]
    async fn failed_action_surfaces_reply() {
        let console = ScriptedConsole::new().reply("heal ghost", "Error: Player not found.");
        let outcome = actions(&console).heal("ghost").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Error: Player not found.");
    }

    #[tokio::test]
    async fn negative_exp_is_rejected() {
        let console = ScriptedConsole::new();
        let err = actions(&console).set_experience("alice", -1).await.unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn toggles_read_disabled_marker() {
        let console = ScriptedConsole::new()
            .reply("fly alice", "Set fly mode §cdisabled§6 for alice.")
            .reply("god alice", "God mode §cenabled§6 for alice.");
        let actions = actions(&console);
        assert!(!actions.toggle_flight("alice").await.unwrap());
        assert!(actions.toggle_invulnerability("alice").await.unwrap());
    }

    #[tokio::test]
    async fn toggle_for_missing_player_is_rejected() {
        let console = ScriptedConsole::new().reply("fly ghost", "Error: Player not found.");
        let err = actions(&console).toggle_flight("ghost").await.unwrap_err();
        assert!(matches!(err, BridgeError::Rejected(_)));
    }
}
