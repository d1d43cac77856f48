//! `rconbridge-rcon`: the RCON transport behind the console session.
//!
//! Implements packet framing, password login, and multi-fragment replies, and
//! exposes [`RconClient`] as a [`ConsoleBackend`](rconbridge_core::ConsoleBackend).

pub mod client;
pub mod error;
pub mod packet;

pub use client::RconClient;
pub use error::RconError;
pub use packet::{read_packet, write_packet, Packet};
