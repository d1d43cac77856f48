//! Shared application state for API handlers.

use rconbridge_commands::{CatalogCache, HelpTable};
use rconbridge_core::SessionHandle;
use rconbridge_players::PlayerActions;

pub struct AppState {
    pub session: SessionHandle,
    pub catalog: CatalogCache,
    pub actions: PlayerActions,
}

impl AppState {
    pub fn new(session: SessionHandle, help: HelpTable) -> Self {
        Self {
            actions: PlayerActions::new(session.clone()),
            catalog: CatalogCache::new(help),
            session,
        }
    }
}
