// libstk-rs/libstk/src/protocol/ber.rs

//! Outer BER-TLV containers: the proactive command wrapper and the
//! envelopes sent back to the card.

use crate::constants::BER_PROACTIVE_COMMAND_TAG;
use crate::error::DecodeError;
use crate::protocol::parser;
use crate::protocol::tlv::{ComprehensionTlv, TagRegistry};

/// Outer BER-TLV container of a proactive command.
/// Format: [0xD0] [BER length] [COMPREHENSION-TLV...]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BerTlv {
    /// Container tag
    pub tag: u8,
    /// Nested COMPREHENSION-TLV objects
    pub objects: Vec<ComprehensionTlv>,
}

impl BerTlv {
    /// Decode a proactive command container. The declared length must cover
    /// exactly the bytes that follow it.
    pub fn decode(bytes: &[u8], registry: &TagRegistry) -> Result<Self, DecodeError> {
        let body = Self::body(bytes)?;
        let objects = registry.decode_many(body)?;
        Ok(Self {
            tag: BER_PROACTIVE_COMMAND_TAG,
            objects,
        })
    }

    /// Validate the container header and return the body slice.
    pub fn body(bytes: &[u8]) -> Result<&[u8], DecodeError> {
        let tag = parser::byte_at(bytes, 0)?;
        if tag != BER_PROACTIVE_COMMAND_TAG {
            return Err(DecodeError::Malformed("not a proactive command"));
        }
        let (len, used) = parser::ber_length_at(bytes, 1)?;
        let start = 1 + used;
        let body = parser::slice_at(bytes, start, len)?;
        if start + len != bytes.len() {
            return Err(DecodeError::Malformed("trailing bytes after proactive command"));
        }
        Ok(body)
    }

    /// Best-effort view of the body for error recovery: whatever follows the
    /// header, even when the declared length is wrong.
    pub fn body_lenient(bytes: &[u8]) -> Option<&[u8]> {
        if bytes.first() != Some(&BER_PROACTIVE_COMMAND_TAG) {
            return None;
        }
        let (_, used) = parser::ber_length_at(bytes, 1).ok()?;
        bytes.get(1 + used..)
    }
}

/// Builder for handset-originated BER-TLV envelopes.
///
/// The tag and a placeholder length byte are written first; `finish`
/// patches the real body length in once every nested object is appended.
pub struct EnvelopeBuilder {
    buf: Vec<u8>,
}

impl EnvelopeBuilder {
    /// Start a container with the given BER tag.
    pub fn new(tag: u8) -> Self {
        let mut buf = Vec::with_capacity(16);
        buf.push(tag);
        buf.push(0x00); // placeholder
        Self { buf }
    }

    /// Body buffer to append nested objects to.
    pub fn buffer(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    /// Patch in the body length and return the encoded container.
    pub fn finish(mut self) -> Vec<u8> {
        let len = self.buf.len() - 2; // minus (tag + length)
        if len < 0x80 {
            self.buf[1] = len as u8;
            return self.buf;
        }
        let mut out = Vec::with_capacity(self.buf.len() + 3);
        out.push(self.buf[0]);
        parser::write_ber_length(&mut out, len);
        out.extend_from_slice(&self.buf[2..]);
        out
    }
}
