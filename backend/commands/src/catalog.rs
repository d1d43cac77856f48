//! Catalog parser: turns the paginated help listing into a command catalog.
//!
//! The first reply to `help` carries a `(current/total)` marker in its header;
//! each `help <page>` reply then lists `/command: description` lines below a
//! header. Decorative and blank lines are skipped.
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use rconbridge_core::text::{body_lines, header_line, split_field};
use rconbridge_core::{
    BridgeError, CommandCatalog, CommandEntry, Result, SessionHandle, COMMAND_MARKER,
};

use crate::help_table::HelpTable;

pub const HELP_COMMAND: &str = "help";

static PAGE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d*)/(\d+)\)").unwrap());

/// `(current, total)` from the header of a help reply. `current` may be blank.
fn page_marker(reply: &str) -> Result<(Option<usize>, usize)> {
    let header = header_line(reply).unwrap_or_default();
    let caps = PAGE_MARKER
        .captures(&header)
        .ok_or_else(|| BridgeError::parse(format!("help header has no page marker: {header:?}")))?;
    let total = caps[2]
        .parse()
        .map_err(|_| BridgeError::parse(format!("page total out of range: {}", &caps[2])))?;
    let current = match &caps[1] {
        "" => None,
        digits => Some(
            digits
                .parse()
                .map_err(|_| BridgeError::parse(format!("page index out of range: {digits}")))?,
        ),
    };
    Ok((current, total))
}

/// Total page count from the header of a help reply.
pub fn page_count(reply: &str) -> Result<usize> {
    page_marker(reply).map(|(_, total)| total)
}

/// Parse one `/command: description` line, if it is one.
pub fn parse_entry(line: &str, help: &HelpTable) -> Option<CommandEntry> {
    let line = line.trim();
    if !line.starts_with(COMMAND_MARKER) {
        return None;
    }
    let (command, description) = split_field(line)?;
    let command = command.trim();
    if command.len() <= COMMAND_MARKER.len_utf8() {
        return None;
    }
    let description = help
        .describe(command)
        .map(str::to_string)
        .unwrap_or_else(|| description.trim().to_string());
    Some(CommandEntry {
        command: command.to_string(),
        description,
    })
}

/// Parse every command line of one help page.
pub fn parse_page(page: usize, reply: &str, help: &HelpTable) -> Result<Vec<CommandEntry>> {
    if reply.trim().is_empty() {
        return Err(BridgeError::parse(format!("help page {page} is empty")));
    }
    match page_marker(reply)? {
        (Some(current), _) if current != page => {
            return Err(BridgeError::parse(format!(
                "asked for help page {page}, console sent page {current}"
            )));
        }
        _ => {}
    }
    let entries: Vec<_> = body_lines(reply)
        .filter_map(|line| parse_entry(&line, help))
        .collect();
    debug!(page, commands = entries.len(), "Parsed help page");
    Ok(entries)
}

/// Walk every help page through the session and build the catalog.
pub async fn fetch_catalog(session: &SessionHandle, help: &HelpTable) -> Result<CommandCatalog> {
    let index = session.execute(HELP_COMMAND).await?;
    let pages = page_count(&index)?;

    let mut entries = Vec::new();
    for page in 1..=pages {
        let reply = session.execute(&format!("{HELP_COMMAND} {page}")).await?;
        entries.extend(parse_page(page, &reply, help)?);
    }

    let catalog = CommandCatalog::from_entries(entries);
    info!(pages, commands = catalog.total(), "Fetched command catalog");
    Ok(catalog)
}
