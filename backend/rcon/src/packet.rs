//! RCON packet codec.
//!
//! Wire layout, all integers little-endian:
//! `i32 length | i32 request id | i32 type | body bytes | 0x00 0x00`.
//! `length` counts every byte after itself.
use anyhow::Result;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::RconError;

pub const SERVERDATA_AUTH: i32 = 3;
pub const SERVERDATA_AUTH_RESPONSE: i32 = 2;
pub const SERVERDATA_EXECCOMMAND: i32 = 2;
pub const SERVERDATA_RESPONSE_VALUE: i32 = 0;

/// Largest body the server puts in one response packet.
pub const MAX_RESPONSE_BODY: usize = 4096;

/// Largest body the server accepts in a request packet.
pub const MAX_REQUEST_BODY: usize = 1446;

/// id + type + two terminating NULs.
const HEADER_AND_PADDING: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub id: i32,
    pub kind: i32,
    pub body: String,
}

impl Packet {
    pub fn new(id: i32, kind: i32, body: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            body: body.into(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.body.len() > MAX_REQUEST_BODY {
            return Err(RconError::Protocol(format!(
                "request body is {} bytes; the limit is {MAX_REQUEST_BODY}",
                self.body.len()
            ))
            .into());
        }
        if self.body.contains('\0') {
            return Err(RconError::Protocol("request body contains a NUL byte".into()).into());
        }

        let length = (HEADER_AND_PADDING + self.body.len()) as i32;
        let mut buf = Vec::with_capacity(4 + length as usize);
        buf.extend_from_slice(&length.to_le_bytes());
        buf.extend_from_slice(&self.id.to_le_bytes());
        buf.extend_from_slice(&self.kind.to_le_bytes());
        buf.extend_from_slice(self.body.as_bytes());
        buf.extend_from_slice(&[0, 0]);
        Ok(buf)
    }
}

pub async fn write_packet<W: AsyncWrite + Unpin>(writer: &mut W, packet: &Packet) -> Result<()> {
    let bytes = packet.encode()?;
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_packet<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Packet> {
    let length = reader.read_i32_le().await?;
    let max = (HEADER_AND_PADDING + MAX_RESPONSE_BODY) as i32;
    if length < HEADER_AND_PADDING as i32 || length > max {
        return Err(RconError::Protocol(format!("packet length {length} outside 10..={max}")).into());
    }

    let mut payload = vec![0u8; length as usize];
    reader.read_exact(&mut payload).await?;

    let id = i32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let kind = i32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
    let body = &payload[8..];
    let end = body.iter().position(|b| *b == 0).unwrap_or(body.len());

    Ok(Packet {
        id,
        kind,
        body: String::from_utf8_lossy(&body[..end]).into_owned(),
    })
}
