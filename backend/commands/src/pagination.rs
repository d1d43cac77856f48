//! Pagination façade: offset/limit windows over the command catalog.
use rconbridge_core::{BridgeError, CatalogPage, CommandCatalog, Result};

/// Page sizes at or above this are rejected.
pub const MAX_PAGE_SIZE: usize = 50;

/// Window `[start, start + count)` of the catalog, clipped to its bounds.
///
/// A `start` past the end yields an empty window rather than an error.
pub fn paginate(catalog: &CommandCatalog, start: usize, count: usize) -> Result<CatalogPage> {
    validate_count(count)?;

    let total = catalog.total();
    let from = start.min(total);
    let to = start.saturating_add(count).min(total);
    let results = catalog.entries()[from..to].to_vec();

    Ok(CatalogPage {
        results,
        total,
        start,
        count,
        page: display_ratio(start, count, total),
    })
}

/// Reject page sizes at or above [`MAX_PAGE_SIZE`]. Needs no catalog, so
/// callers can check before anything is fetched.
pub fn validate_count(count: usize) -> Result<()> {
    if count >= MAX_PAGE_SIZE {
        return Err(BridgeError::invalid(format!(
            "count must be less than {MAX_PAGE_SIZE}, got {count}"
        )));
    }
    Ok(())
}

/// Legacy `start * count / total` ratio shown to clients; 0 for an empty catalog.
fn display_ratio(start: usize, count: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    start.saturating_mul(count) / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconbridge_core::CommandEntry;

    fn catalog(n: usize) -> CommandCatalog {
        CommandCatalog::from_entries((0..n).map(|i| CommandEntry {
            command: format!("/cmd{i}"),
            description: format!("command {i}"),
        }))
    }

    #[test]
    fn full_window_returns_every_entry_in_order() {
        let catalog = catalog(30);
        let page = paginate(&catalog, 0, catalog.total()).unwrap();
        assert_eq!(page.results, catalog.entries());
        assert_eq!(page.total, 30);
        assert_eq!(page.page, 0);
    }

    #[test]
    fn window_is_clipped_to_catalog() {
        let page = paginate(&catalog(10), 8, 5).unwrap();
        let commands: Vec<_> = page.results.iter().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, vec!["/cmd8", "/cmd9"]);
        assert_eq!(page.page, 4);
    }

    #[test]
    fn start_past_end_is_empty() {
        let page = paginate(&catalog(10), 10, 5).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total, 10);
        assert_eq!(page.start, 10);
    }

    #[test]
    fn max_page_size_is_rejected() {
        let err = paginate(&catalog(10), 0, MAX_PAGE_SIZE).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
        assert!(paginate(&catalog(10), 0, MAX_PAGE_SIZE - 1).is_ok());
        assert!(validate_count(MAX_PAGE_SIZE).is_err());
        assert!(validate_count(0).is_ok());
    }

    #[test]
    fn empty_catalog_has_page_zero() {
        let page = paginate(&CommandCatalog::default(), 5, 10).unwrap();
        assert_eq!(page.page, 0);
        assert!(page.results.is_empty());
    }
}
