// libstk-rs/libstk/src/protocol/parser.rs

//! Bounds-checked byte access and BER length fields.

use crate::error::DecodeError;

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<(), DecodeError> {
    if data.len() < min {
        return Err(DecodeError::Truncated {
            needed: min,
            available: data.len(),
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8, DecodeError> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8], DecodeError> {
    let end = idx
        .checked_add(len)
        .ok_or(DecodeError::Malformed("length overflow"))?;
    ensure_len(data, end)?;
    Ok(&data[idx..end])
}

/// Read a BER length field at `idx`. Returns the decoded length and the
/// number of bytes the length field occupied.
///
/// Short form `0x00..=0x7f`; long forms `0x81 n`, `0x82 nn nn` and
/// `0x83 nn nn nn`. Long forms must not encode a value the shorter form
/// could have carried.
pub fn ber_length_at(data: &[u8], idx: usize) -> Result<(usize, usize), DecodeError> {
    let first = byte_at(data, idx)?;
    match first {
        0x00..=0x7f => Ok((first as usize, 1)),
        0x81 => {
            let len = byte_at(data, idx + 1)? as usize;
            if len < 0x80 {
                return Err(DecodeError::Malformed("non-minimal 0x81 length"));
            }
            Ok((len, 2))
        }
        0x82 => {
            let b = slice_at(data, idx + 1, 2)?;
            let len = ((b[0] as usize) << 8) | b[1] as usize;
            if len < 0x100 {
                return Err(DecodeError::Malformed("non-minimal 0x82 length"));
            }
            Ok((len, 3))
        }
        0x83 => {
            let b = slice_at(data, idx + 1, 3)?;
            let len = ((b[0] as usize) << 16) | ((b[1] as usize) << 8) | b[2] as usize;
            if len < 0x1_0000 {
                return Err(DecodeError::Malformed("non-minimal 0x83 length"));
            }
            Ok((len, 4))
        }
        _ => Err(DecodeError::Malformed("invalid length prefix")),
    }
}

/// Append a BER length field in its minimal form: short form up to 0x7f,
/// then `0x81 n`, `0x82 nn nn` or `0x83 nn nn nn`.
///
/// Lengths above 0xFF_FFFF cannot be expressed and are truncated to 24 bits.
pub fn write_ber_length(buf: &mut Vec<u8>, len: usize) {
    use crate::constants::{BER_LENGTH_ONE_BYTE, BER_LENGTH_THREE_BYTES, BER_LENGTH_TWO_BYTES};
    match len {
        0..=0x7f => buf.push(len as u8),
        0x80..=0xff => buf.extend_from_slice(&[BER_LENGTH_ONE_BYTE, len as u8]),
        0x100..=0xffff => {
            buf.push(BER_LENGTH_TWO_BYTES);
            buf.extend_from_slice(&(len as u16).to_be_bytes());
        }
        _ => {
            let bytes = (len as u32).to_be_bytes();
            buf.push(BER_LENGTH_THREE_BYTES);
            buf.extend_from_slice(&bytes[1..]);
        }
    }
}
