//! RCON client: one authenticated console connection to the game server.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::{debug, info};

use rconbridge_core::ConsoleBackend;

use crate::error::RconError;
use crate::packet::{
    read_packet, write_packet, Packet, SERVERDATA_AUTH, SERVERDATA_AUTH_RESPONSE,
    SERVERDATA_EXECCOMMAND, SERVERDATA_RESPONSE_VALUE,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest wait for a complete reply before the connection is given up.
const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// Request id the server uses to signal a failed login.
const AUTH_FAILED_ID: i32 = -1;

pub struct RconClient<S = TcpStream> {
    stream: S,
    next_id: i32,
    authenticated: bool,
    broken: bool,
}

impl RconClient<TcpStream> {
    /// Open a TCP connection to `host:port`. Call [`RconClient::authenticate`] next.
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{host}:{port}");
        info!("[RCON] Connecting to {}", addr);
        let stream = tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr))
            .await
            .with_context(|| format!("Timed out connecting to RCON at {addr}"))?
            .with_context(|| format!("Failed to connect to RCON at {addr}"))?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }
}

impl<S> RconClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            next_id: 1,
            authenticated: false,
            broken: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Log in with the RCON password.
    pub async fn authenticate(&mut self, password: &str) -> Result<()> {
        let id = self.allocate_id();
        write_packet(&mut self.stream, &Packet::new(id, SERVERDATA_AUTH, password)).await?;

        // Some servers send an empty response value ahead of the auth response.
        loop {
            let packet = read_packet(&mut self.stream).await?;
            if packet.kind != SERVERDATA_AUTH_RESPONSE {
                debug!(id = packet.id, kind = packet.kind, "Skipping pre-auth packet");
                continue;
            }
            if packet.id == AUTH_FAILED_ID {
                return Err(RconError::AuthRejected.into());
            }
            if packet.id != id {
                return Err(RconError::Protocol(format!(
                    "auth response id {} does not match request {id}",
                    packet.id
                ))
                .into());
            }
            break;
        }

        self.authenticated = true;
        info!("[RCON] Authenticated");
        Ok(())
    }

    /// Run one console command and return the full reply.
    ///
    /// The command is followed by an empty response-value packet. The server
    /// answers requests in order, so the echo of that packet marks the end of
    /// the reply no matter how it was fragmented. Packets carrying any other
    /// id are leftovers of an earlier exchange and are dropped.
    ///
    /// A failed or timed-out exchange leaves the stream in an unknown state,
    /// so every later call fails with [`RconError::ConnectionLost`].
    pub async fn exec(&mut self, command: &str) -> Result<String> {
        if self.broken {
            return Err(RconError::ConnectionLost.into());
        }
        if !self.authenticated {
            return Err(RconError::NotAuthenticated.into());
        }

        match tokio::time::timeout(REPLY_TIMEOUT, self.exchange(command)).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(e)) => {
                self.broken = true;
                Err(e)
            }
            Err(_) => {
                self.broken = true;
                Err(RconError::ReplyTimeout(REPLY_TIMEOUT).into())
            }
        }
    }

    async fn exchange(&mut self, command: &str) -> Result<String> {
        let id = self.allocate_id();
        let end_id = self.allocate_id();
        write_packet(&mut self.stream, &Packet::new(id, SERVERDATA_EXECCOMMAND, command)).await?;
        write_packet(&mut self.stream, &Packet::new(end_id, SERVERDATA_RESPONSE_VALUE, "")).await?;

        let mut reply = String::new();
        loop {
            let packet = read_packet(&mut self.stream).await?;
            if packet.id == end_id {
                return Ok(reply);
            }
            if packet.id == id {
                reply.push_str(&packet.body);
            } else {
                debug!(id = packet.id, expected = id, "Dropping stale reply packet");
            }
        }
    }

    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        // Ids stay positive so they never collide with the auth failure marker.
        self.next_id = if self.next_id == i32::MAX { 1 } else { self.next_id + 1 };
        id
    }
}

#[async_trait]
impl<S> ConsoleBackend for RconClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    fn name(&self) -> &str {
        "rcon"
    }

    async fn command(&mut self, text: &str) -> Result<String> {
        self.exec(text).await
    }
}
