use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Marker character every console command starts with.
pub const COMMAND_MARKER: char = '/';

/// One console command with its human description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub command: String,
    pub description: String,
}

/// Normalized command list, in page order then line order.
///
/// Commands are unique within a catalog; the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandCatalog {
    entries: Vec<CommandEntry>,
}

impl CommandCatalog {
    pub fn from_entries(entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.command.clone()))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, command: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|e| e.command == command)
    }
}

/// A player as listed by the console, grouped under a world or group label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub world: String,
    pub name: String,
}

/// Normalized whois record for one online player.
///
/// Fields the console reports beyond the required ones are kept verbatim in
/// `extra` and flattened into the serialized object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatus {
    pub fly_mode: bool,
    pub god_mode: bool,
    pub op: bool,
    pub afk: bool,
    pub jail: bool,
    pub muted: bool,
    pub exp: i64,
    pub level: i64,
    pub health_current: i64,
    pub health_full: i64,
    pub hunger_current: i64,
    pub hunger_full: i64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// A window over the command catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    pub results: Vec<CommandEntry>,
    pub total: usize,
    pub start: usize,
    pub count: usize,
    /// Legacy display ratio `start * count / total`, not a page index.
    pub page: usize,
}

/// Result of a mutating console action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}
