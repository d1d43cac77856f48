use anyhow::Result;
use async_trait::async_trait;

/// A live console channel to the managed game server.
///
/// Implementations are not reentrant: callers must never have more than one
/// command outstanding. [`crate::session::SessionHandle`] enforces this.
#[async_trait]
pub trait ConsoleBackend: Send + 'static {
    /// Human-readable name of this backend (e.g., "rcon").
    fn name(&self) -> &str;

    /// Send one command and return the raw reply text.
    async fn command(&mut self, text: &str) -> Result<String>;
}
