//! SIM text codings.
//!
//! TEXT STRING objects carry a data coding scheme byte followed by GSM 7-bit
//! packed, GSM 8-bit (one septet per byte) or UCS2 text. ALPHA IDENTIFIER and
//! ITEM texts use the SIM alpha format instead: GSM 8-bit padded with 0xFF,
//! or one of the three UCS2 variants introduced by 0x80, 0x81 or 0x82.

const ESCAPE: u8 = 0x1b;
const UNKNOWN_SEPTET: u8 = 0x3f; // '?'

/// GSM 03.38 default alphabet. Index 0x1b is the escape to the extension
/// table and never maps to a character on its own.
const DEFAULT_ALPHABET: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{a0}', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

/// Extension table entries reachable through the escape septet.
const EXTENSION_TABLE: [(u8, char); 10] = [
    (0x0a, '\u{c}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2f, '\\'),
    (0x3c, '['),
    (0x3d, '~'),
    (0x3e, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

fn extension_char(code: u8) -> Option<char> {
    EXTENSION_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, ch)| *ch)
}

/// Map a string to GSM septets, using the extension table where needed.
/// Characters outside both tables become '?'.
pub fn string_to_septets(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if let Some(idx) = DEFAULT_ALPHABET
            .iter()
            .position(|&c| c == ch && c != '\u{a0}')
        {
            out.push(idx as u8);
        } else if let Some((code, _)) = EXTENSION_TABLE.iter().find(|(_, c)| *c == ch) {
            out.push(ESCAPE);
            out.push(*code);
        } else {
            out.push(UNKNOWN_SEPTET);
        }
    }
    out
}

/// Map GSM septets (one per byte) to a string. Decoding stops at the 0xff
/// padding used by SIM alpha fields.
pub fn septets_to_string(septets: &[u8]) -> String {
    let mut out = String::with_capacity(septets.len());
    let mut iter = septets.iter().copied();
    while let Some(b) = iter.next() {
        if b == 0xff {
            break;
        }
        let b = b & 0x7f;
        if b == ESCAPE {
            match iter.next() {
                Some(code) => {
                    out.push(extension_char(code & 0x7f).unwrap_or(' '));
                }
                None => break,
            }
        } else {
            out.push(DEFAULT_ALPHABET[b as usize]);
        }
    }
    out
}

/// Pack septets into the GSM 7-bit packed form (no length prefix).
pub fn pack_septets(septets: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; (septets.len() * 7).div_ceil(8)];
    for (i, &septet) in septets.iter().enumerate() {
        let septet = septet & 0x7f;
        let bit = i * 7;
        let idx = bit / 8;
        let shift = bit % 8;
        out[idx] |= septet << shift;
        if shift > 1 {
            out[idx + 1] |= septet >> (8 - shift);
        }
    }
    out
}

/// Unpack `count` septets from GSM 7-bit packed data. Stops early if the
/// data runs out.
pub fn unpack_septets(data: &[u8], count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let bit = i * 7;
        let idx = bit / 8;
        let shift = bit % 8;
        let Some(&lo) = data.get(idx) else {
            break;
        };
        let mut v = lo >> shift;
        if shift > 1 {
            if let Some(&hi) = data.get(idx + 1) {
                v |= hi << (8 - shift);
            }
        }
        out.push(v & 0x7f);
    }
    out
}

/// Decode a GSM 7-bit packed text body, where every septet that fits in
/// the data is significant.
pub fn gsm7_packed_to_string(data: &[u8]) -> String {
    let count = data.len() * 8 / 7;
    septets_to_string(&unpack_septets(data, count))
}

/// Encode as GSM 7-bit packed.
pub fn string_to_gsm7_packed(text: &str) -> Vec<u8> {
    pack_septets(&string_to_septets(text))
}

/// Encode as GSM 7-bit, one septet per byte.
pub fn string_to_gsm8(text: &str) -> Vec<u8> {
    string_to_septets(text)
}

/// Decode big-endian UCS2. A trailing odd byte is ignored.
pub fn ucs2_to_string(data: &[u8]) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&u| u != 0xffff)
        .collect();
    String::from_utf16_lossy(&units)
}

/// Encode as big-endian UCS2.
pub fn string_to_ucs2(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
}

/// Decode a SIM alpha identifier (also used for ITEM texts).
pub fn alpha_id_to_string(data: &[u8]) -> String {
    match data.first() {
        None => String::new(),
        Some(0x80) => ucs2_to_string(&data[1..]),
        Some(0x81) if data.len() >= 3 => {
            let len = data[1] as usize;
            let base = u32::from(data[2]) << 7;
            ucs2_offset_to_string(&data[3..], len, base)
        }
        Some(0x82) if data.len() >= 4 => {
            let len = data[1] as usize;
            let base = (u32::from(data[2]) << 8) | u32::from(data[3]);
            ucs2_offset_to_string(&data[4..], len, base)
        }
        Some(_) => septets_to_string(data),
    }
}

// Characters with the top bit set are offsets from `base`; others are GSM
// default alphabet septets.
fn ucs2_offset_to_string(data: &[u8], len: usize, base: u32) -> String {
    let mut out = String::with_capacity(len);
    for &b in data.iter().take(len) {
        if b & 0x80 != 0 {
            let ch = char::from_u32(base + u32::from(b & 0x7f)).unwrap_or('\u{fffd}');
            out.push(ch);
        } else {
            out.push(DEFAULT_ALPHABET[b as usize]);
        }
    }
    out
}
