use crate::error::{PipesortError, Result};
use crate::protocol::message::PipesortMessage;

/// Size of the wire header in bytes.
pub const HEADER_SIZE: usize = 8;

/// Tag identifying the message that follows the header.
///
/// The tag is readable without decoding the payload, so a receiver can
/// distinguish DATA from END (or reject stray traffic) before touching
/// the rkyv body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageTag {
    /// One value travelling down the chain.
    Data = 0,
    /// End-of-stream marker.
    End = 1,
    /// Collection contribution.
    Gather = 2,
    /// Barrier fence.
    Barrier = 3,
    /// Barrier release.
    BarrierAck = 4,
}

impl MessageTag {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(MessageTag::Data),
            1 => Some(MessageTag::End),
            2 => Some(MessageTag::Gather),
            3 => Some(MessageTag::Barrier),
            4 => Some(MessageTag::BarrierAck),
            _ => None,
        }
    }
}

/// 8-byte wire header prepended to every framed message.
///
/// ```text
/// [0..4] payload_length: u32 LE
/// [4]    tag: u8
/// [5..8] reserved: must be 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Length of the payload following this header.
    pub payload_length: u32,
    /// Message tag of the payload.
    pub tag: MessageTag,
}

impl Header {
    /// Encode header to 8 bytes (little-endian).
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.payload_length.to_le_bytes());
        buf[4] = self.tag as u8;
        // buf[5..8] reserved = 0
        buf
    }

    /// Decode header from 8 bytes.
    ///
    /// Returns `None` if the tag byte is invalid.
    pub fn decode(buf: &[u8; HEADER_SIZE]) -> Option<Self> {
        let payload_length = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let tag = MessageTag::from_u8(buf[4])?;
        Some(Header {
            payload_length,
            tag,
        })
    }
}

/// Encode a `PipesortMessage` into a framed byte buffer: `[header][rkyv payload]`.
pub fn encode_message(msg: &PipesortMessage) -> Result<Vec<u8>> {
    let payload = rkyv::to_bytes::<rkyv::rancor::Error>(msg)
        .map_err(|e| PipesortError::EncodeFailed(e.to_string()))?;

    if payload.len() > u32::MAX as usize {
        return Err(PipesortError::EncodeFailed(format!(
            "payload too large for framed header: {} bytes exceeds u32::MAX",
            payload.len()
        )));
    }

    let header = Header {
        payload_length: payload.len() as u32,
        tag: msg.tag(),
    };

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

/// Decode a framed byte buffer back into a `(Header, PipesortMessage)`.
///
/// The input must contain at least `HEADER_SIZE` bytes, followed by
/// `header.payload_length` bytes of rkyv-encoded payload. A header tag
/// that disagrees with the decoded variant is rejected.
pub fn decode_message(buf: &[u8]) -> Result<(Header, PipesortMessage)> {
    if buf.len() < HEADER_SIZE {
        return Err(PipesortError::DecodeFailed(format!(
            "buffer too short: {} < {HEADER_SIZE}",
            buf.len()
        )));
    }

    let header_bytes: &[u8; HEADER_SIZE] = buf[..HEADER_SIZE]
        .try_into()
        .map_err(|_| PipesortError::DecodeFailed("header slice length mismatch".into()))?;

    let header = Header::decode(header_bytes)
        .ok_or_else(|| PipesortError::DecodeFailed("invalid header: unknown tag".into()))?;

    let payload_end = HEADER_SIZE + header.payload_length as usize;
    if buf.len() < payload_end {
        return Err(PipesortError::DecodeFailed(format!(
            "buffer too short for payload: {} < {payload_end}",
            buf.len()
        )));
    }

    // The payload starts at an arbitrary offset inside the frame; realign
    // before handing it to rkyv.
    let mut payload = rkyv::util::AlignedVec::<16>::new();
    payload.extend_from_slice(&buf[HEADER_SIZE..payload_end]);
    let msg = rkyv::from_bytes::<PipesortMessage, rkyv::rancor::Error>(&payload)
        .map_err(|e| PipesortError::DecodeFailed(e.to_string()))?;

    if msg.tag() != header.tag {
        return Err(PipesortError::DecodeFailed(format!(
            "header tag {:?} does not match payload variant {:?}",
            header.tag,
            msg.tag()
        )));
    }

    Ok((header, msg))
}
