//! Help enrichment table: curated human descriptions for console commands.
//!
//! Loaded once at startup from a UTF-8 TSV file (`command<TAB>description`)
//! and read-only afterwards.
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use rconbridge_core::COMMAND_MARKER;

/// Namespace prefix the console puts on built-in commands.
pub const BUILTIN_NAMESPACE: &str = "minecraft:";

#[derive(Debug, Clone, Default)]
pub struct HelpTable {
    descriptions: HashMap<String, String>,
}

impl HelpTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table from disk. A missing file yields an empty table.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Help table not found; using console descriptions");
            return Ok(Self::empty());
        }
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read help table: {}", path.display()))?;
        let table = Self::parse(&raw);
        info!(path = %path.display(), entries = table.len(), "Loaded help table");
        Ok(table)
    }

    pub fn parse(raw: &str) -> Self {
        let mut descriptions = HashMap::new();
        for (number, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once('\t') {
                Some((command, description)) => {
                    descriptions.insert(command.trim().to_string(), description.trim().to_string());
                }
                None => debug!(line = number + 1, "Skipping help table line without a tab"),
            }
        }
        Self { descriptions }
    }

    /// Curated description for a console command, ignoring its namespace.
    pub fn describe(&self, command: &str) -> Option<&str> {
        let bare = command.trim().trim_start_matches(COMMAND_MARKER);
        let bare = bare.strip_prefix(BUILTIN_NAMESPACE).unwrap_or(bare);
        self.descriptions
            .get(&format!("{COMMAND_MARKER}{bare}"))
            .or_else(|| self.descriptions.get(bare))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}
