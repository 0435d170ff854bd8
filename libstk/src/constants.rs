// libstk-rs/libstk/src/constants.rs
//! Common protocol constants used across the crate

/// Comprehension-required flag carried in the top bit of a tag byte
pub const COMPREHENSION_REQUIRED_FLAG: u8 = 0x80;

/// Escape byte introducing the three-byte COMPREHENSION-TLV tag form
pub const THREE_BYTE_TAG_ESCAPE: u8 = 0x7F;

/// BER-TLV tag of the proactive command container
pub const BER_PROACTIVE_COMMAND_TAG: u8 = 0xD0;
/// BER-TLV tag of the MENU SELECTION envelope
pub const BER_MENU_SELECTION_TAG: u8 = 0xD3;
/// BER-TLV tag of the EVENT DOWNLOAD envelope
pub const BER_EVENT_DOWNLOAD_TAG: u8 = 0xD6;

/// BER length prefix for a one-byte long-form length (0x80..=0xFF)
pub const BER_LENGTH_ONE_BYTE: u8 = 0x81;
/// Two-byte long form (0x100..=0xFFFF)
pub const BER_LENGTH_TWO_BYTES: u8 = 0x82;
/// Three-byte long form (0x1_0000..=0xFF_FFFF)
pub const BER_LENGTH_THREE_BYTES: u8 = 0x83;

// Device identities (ETSI TS 102 223, 8.7)

/// Keypad
pub const DEV_ID_KEYPAD: u8 = 0x01;
/// Display
pub const DEV_ID_DISPLAY: u8 = 0x02;
/// Earpiece
pub const DEV_ID_EARPIECE: u8 = 0x03;
/// UICC
pub const DEV_ID_UICC: u8 = 0x81;
/// Terminal (ME)
pub const DEV_ID_TERMINAL: u8 = 0x82;
/// Network
pub const DEV_ID_NETWORK: u8 = 0x83;

/// Additional information byte sent with SEND DTMF when no call is active
pub const ADDITIONAL_INFO_NO_ACTIVE_CALL: u8 = 0x14;

/// Pause between DTMF batches when the card inserts a pause digit
pub const DTMF_PAUSE_MS: u64 = 3_000;

/// DTMF pause digit as it appears in a decoded DTMF string
pub const DTMF_PAUSE_CHAR: char = 'P';

/// TEXT STRING coding: GSM default alphabet, 7-bit packed
pub const DCS_GSM_7BIT_PACKED: u8 = 0x00;
/// TEXT STRING coding: GSM default alphabet, 8-bit unpacked
pub const DCS_GSM_8BIT: u8 = 0x04;
/// TEXT STRING coding: UCS2, big endian
pub const DCS_UCS2: u8 = 0x08;

/// GET INKEY "yes" answer carried in a TEXT STRING
pub const GET_INKEY_YES: u8 = 0x01;
/// GET INKEY "no" answer
pub const GET_INKEY_NO: u8 = 0x00;
