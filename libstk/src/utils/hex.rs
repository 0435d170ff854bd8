//! Hexadecimal helpers for the radio wire representation.
//!
//! The radio exchanges every proactive command, terminal response and
//! envelope as a hex string. Output is lowercase without separators; the
//! parser accepts either case and ignores ASCII whitespace.

use crate::{Error, Result};

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xd0, 0x0a]` -> `"d00a"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        use std::fmt::Write;
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte. Used for log output.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        use std::fmt::Write;
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Parse a hex string into bytes.
///
/// Accepts strings with or without ASCII whitespace.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let cleaned: Vec<u8> = s.bytes().filter(|c| !c.is_ascii_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err(Error::InvalidHex("hex string has odd length".to_string()));
    }

    let mut out = Vec::with_capacity(cleaned.len() / 2);
    for pair in cleaned.chunks(2) {
        match (nibble(pair[0]), nibble(pair[1])) {
            (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
            _ => {
                return Err(Error::InvalidHex(format!(
                    "invalid hex pair '{}{}'",
                    pair[0] as char, pair[1] as char
                )));
            }
        }
    }

    Ok(out)
}
