//! `rconbridge-players`: player-facing console translation.
//!
//! - [`directory`]: `list` → [`PlayerRef`](rconbridge_core::PlayerRef)s
//! - [`status`]: `whois` → [`PlayerStatus`](rconbridge_core::PlayerStatus)
//! - [`actions`]: op/exp/gamemode/burn/feed/heal/fly/god commands

pub mod actions;
pub mod directory;
pub mod status;

pub use actions::{interpret_reply, validate_username, GameMode, PlayerAction, PlayerActions};
pub use directory::{fetch_players, parse_players, LIST_COMMAND};
pub use status::{fetch_status, normalize_key, parse_status, WHOIS_COMMAND};
