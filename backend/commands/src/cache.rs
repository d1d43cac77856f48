//! Catalog cache: the command catalog, fetched once per process.
//!
//! The catalog is static for a running server version, so there is no TTL and
//! no invalidation. Concurrent first callers share a single fetch.
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use rconbridge_core::{CommandCatalog, Result, SessionHandle};

use crate::catalog::fetch_catalog;
use crate::help_table::HelpTable;

pub struct CatalogCache {
    catalog: OnceCell<Arc<CommandCatalog>>,
    help: HelpTable,
}

impl CatalogCache {
    pub fn new(help: HelpTable) -> Self {
        Self {
            catalog: OnceCell::new(),
            help,
        }
    }

    /// The cached catalog, fetching it through `session` on first use.
    ///
    /// A failed fetch caches nothing; the next call tries again.
    pub async fn get(&self, session: &SessionHandle) -> Result<Arc<CommandCatalog>> {
        let catalog = self
            .catalog
            .get_or_try_init(|| async {
                debug!("Command catalog not cached; fetching");
                fetch_catalog(session, &self.help).await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(catalog))
    }

    /// The cached catalog, if one has been fetched.
    pub fn peek(&self) -> Option<Arc<CommandCatalog>> {
        self.catalog.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconbridge_core::testing::ScriptedConsole;

    fn console() -> ScriptedConsole {
        ScriptedConsole::new()
            .reply("help", "--- Help: Index (1/1) ---")
            .reply("help 1", "--- Help: Index (1/1) ---\n/say: Broadcast a message\n/seed: Show the world seed")
    }

    #[tokio::test]
    async fn second_get_does_not_touch_backend() {
        let console = console();
        let session = console.session();
        let cache = CatalogCache::new(HelpTable::empty());
        assert!(cache.peek().is_none());

        let first = cache.get(&session).await.unwrap();
        let sent_after_first = console.sent().len();
        let second = cache.get(&session).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(console.sent().len(), sent_after_first);
        assert_eq!(cache.peek().unwrap().total(), 2);
    }

    #[tokio::test]
    async fn concurrent_first_calls_agree() {
        let console = console();
        let session = console.session();
        let cache = Arc::new(CatalogCache::new(HelpTable::empty()));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let session = session.clone();
            tasks.push(tokio::spawn(async move { cache.get(&session).await.unwrap() }));
        }
        let mut catalogs = Vec::new();
        for task in tasks {
            catalogs.push(task.await.unwrap());
        }

        assert!(catalogs.windows(2).all(|w| w[0] == w[1]));
        let index_fetches = console.sent().iter().filter(|c| *c == "help").count();
        assert_eq!(index_fetches, 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let broken = ScriptedConsole::new().reply("help", "Unknown command");
        let cache = CatalogCache::new(HelpTable::empty());
        assert!(cache.get(&broken.session()).await.is_err());
        assert!(cache.peek().is_none());

        let healthy = console();
        let catalog = cache.get(&healthy.session()).await.unwrap();
        assert_eq!(catalog.total(), 2);
    }

    #[tokio::test]
    async fn partial_catalog_is_not_cached() {
        let truncated = ScriptedConsole::new()
            .reply("help", "--- Help: Index (1/2) ---")
            .reply("help 1", "--- Help: Index (1/2) ---\n/say: Broadcast a message");
        let cache = CatalogCache::new(HelpTable::empty());
        let err = cache.get(&truncated.session()).await.unwrap_err();
        assert!(matches!(err, rconbridge_core::BridgeError::Parse(_)));
        assert!(cache.peek().is_none());
    }
}
