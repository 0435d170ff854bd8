// libstk-rs/libstk/src/protocol/tlv.rs

//! COMPREHENSION-TLV objects (ETSI TS 101 220, 7.1.1).
//!
//! Tag encoding: a single byte whose top bit is the comprehension-required
//! (CR) flag, or the escape byte 0x7f followed by two bytes whose top bit is
//! the CR flag and whose remaining 15 bits are the tag. Lengths follow the
//! BER rules implemented in [`parser::ber_length_at`].

use std::collections::BTreeSet;

use crate::constants::{COMPREHENSION_REQUIRED_FLAG, THREE_BYTE_TAG_ESCAPE};
use crate::error::DecodeError;
use crate::protocol::parser;
use crate::types::TagId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One decoded COMPREHENSION-TLV object.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComprehensionTlv {
    /// Tag with the CR bit stripped
    pub tag: TagId,
    /// Declared length
    pub length: u32,
    /// Value bytes
    pub value: Vec<u8>,
    /// CR flag from the tag byte
    pub comprehension_required: bool,
}

impl ComprehensionTlv {
    /// Object with `length` taken from `value`.
    pub fn new(tag: TagId, comprehension_required: bool, value: Vec<u8>) -> Self {
        Self {
            tag,
            length: value.len() as u32,
            value,
            comprehension_required,
        }
    }

    /// Append this object to `buf` in single-byte tag form.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        write_tlv(buf, self.tag, self.comprehension_required, &self.value);
    }
}

/// Set of tags the decoder understands.
///
/// Standard ETSI tags are always present. Vendor tags (the DTMF tag some
/// basebands deliver, for instance) are registered on top so that a
/// comprehension-required vendor object does not fail the whole command.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    known: BTreeSet<u16>,
}

const STANDARD_TAGS: [TagId; 23] = [
    TagId::COMMAND_DETAILS,
    TagId::DEVICE_IDENTITIES,
    TagId::RESULT,
    TagId::DURATION,
    TagId::ALPHA_ID,
    TagId::ADDRESS,
    TagId::USSD_STRING,
    TagId::TEXT_STRING,
    TagId::TONE,
    TagId::ITEM,
    TagId::ITEM_ID,
    TagId::RESPONSE_LENGTH,
    TagId::FILE_LIST,
    TagId::HELP_REQUEST,
    TagId::DEFAULT_TEXT,
    TagId::EVENT_LIST,
    TagId::ICON_ID,
    TagId::ITEM_ICON_ID_LIST,
    TagId::IMMEDIATE_RESPONSE,
    TagId::LANGUAGE,
    TagId::URL,
    TagId::BROWSER_TERMINATION_CAUSE,
    TagId::TEXT_ATTRIBUTE,
];

impl TagRegistry {
    /// Standard tags only.
    pub fn standard() -> Self {
        Self {
            known: STANDARD_TAGS.iter().map(|t| t.value()).collect(),
        }
    }

    /// Register an additional (vendor) tag.
    pub fn register(&mut self, tag: TagId) -> &mut Self {
        self.known.insert(tag.value());
        self
    }

    /// Builder form of [`TagRegistry::register`].
    pub fn with_tag(mut self, tag: TagId) -> Self {
        self.register(tag);
        self
    }

    /// Whether `tag` is understood.
    pub fn is_known(&self, tag: TagId) -> bool {
        self.known.contains(&tag.value())
    }

    /// Decode one object starting at `offset`. Returns the object and the
    /// offset of the byte following it.
    pub fn decode(
        &self,
        bytes: &[u8],
        offset: usize,
    ) -> Result<(ComprehensionTlv, usize), DecodeError> {
        let first = parser::byte_at(bytes, offset)?;
        let (tag, comprehension_required, mut idx) = match first {
            0x00 | 0x80 | 0xff => return Err(DecodeError::Malformed("invalid tag byte")),
            THREE_BYTE_TAG_ESCAPE => {
                let t = parser::slice_at(bytes, offset + 1, 2)?;
                let raw = u16::from_be_bytes([t[0], t[1]]);
                (TagId::new(raw & 0x7fff), raw & 0x8000 != 0, offset + 3)
            }
            b => (
                TagId::new(u16::from(b & !COMPREHENSION_REQUIRED_FLAG)),
                b & COMPREHENSION_REQUIRED_FLAG != 0,
                offset + 1,
            ),
        };

        let (length, used) = parser::ber_length_at(bytes, idx)?;
        idx += used;
        let value = parser::slice_at(bytes, idx, length)?.to_vec();

        if comprehension_required && !self.is_known(tag) {
            return Err(DecodeError::UnknownTag(tag.value()));
        }

        Ok((
            ComprehensionTlv {
                tag,
                length: length as u32,
                value,
                comprehension_required,
            },
            idx + length,
        ))
    }

    /// Decode every object in `bytes`.
    pub fn decode_many(&self, bytes: &[u8]) -> Result<Vec<ComprehensionTlv>, DecodeError> {
        let mut out = Vec::new();
        let mut offset = 0usize;
        while offset < bytes.len() {
            let (tlv, next) = self.decode(bytes, offset)?;
            out.push(tlv);
            offset = next;
        }
        Ok(out)
    }
}

impl Default for TagRegistry {
    /// Standard tags plus the DTMF string tag.
    fn default() -> Self {
        Self::standard().with_tag(TagId::DTMF)
    }
}

/// Decode one COMPREHENSION-TLV with the default tag registry.
pub fn decode_comprehension_tlv(
    bytes: &[u8],
    offset: usize,
) -> Result<(ComprehensionTlv, usize), DecodeError> {
    TagRegistry::default().decode(bytes, offset)
}

/// Decode a COMPREHENSION-TLV sequence with the default tag registry.
pub fn decode_many(bytes: &[u8]) -> Result<Vec<ComprehensionTlv>, DecodeError> {
    TagRegistry::default().decode_many(bytes)
}

/// Append a single-byte-tag TLV.
pub fn write_tlv(buf: &mut Vec<u8>, tag: TagId, comprehension_required: bool, value: &[u8]) {
    let mut t = tag.as_u8();
    if comprehension_required {
        t |= COMPREHENSION_REQUIRED_FLAG;
    }
    buf.push(t);
    parser::write_ber_length(buf, value.len());
    buf.extend_from_slice(value);
}

/// First object with the given tag.
pub fn find<'a>(tlvs: &'a [ComprehensionTlv], tag: TagId) -> Option<&'a ComprehensionTlv> {
    tlvs.iter().find(|t| t.tag == tag)
}

/// Every object with the given tag, in order.
pub fn find_all<'a>(
    tlvs: &'a [ComprehensionTlv],
    tag: TagId,
) -> impl Iterator<Item = &'a ComprehensionTlv> + 'a {
    tlvs.iter().filter(move |t| t.tag == tag)
}
