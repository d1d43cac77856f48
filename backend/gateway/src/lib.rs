//! HTTP gateway for rconbridge.
//!
//! Maps the structured API onto the console translation crates.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{build_router, start_server};
pub use state::AppState;
