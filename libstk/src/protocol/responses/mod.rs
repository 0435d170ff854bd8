// libstk-rs/libstk/src/protocol/responses/mod.rs

//! Handset-originated messages: TERMINAL RESPONSE and the ENVELOPE
//! commands. Per-message encoders live in `protocol::responses::<name>.rs`.

pub mod envelope;
pub mod input;
pub mod select_item;
pub mod terminal;

pub use envelope::{encode_event_download, encode_menu_selection};
pub use input::GetInkeyInputResponseData;
pub use select_item::SelectItemResponseData;
pub use terminal::{TerminalResponse, encode_terminal_response};

use crate::constants::{DEV_ID_TERMINAL, DEV_ID_UICC};
use crate::protocol::tlv::write_tlv;
use crate::types::TagId;

/// Command-specific data appended after the RESULT object of a terminal
/// response.
pub trait ResponseData {
    /// Append the encoded objects to `buf`.
    fn format(&self, buf: &mut Vec<u8>);
}

/// Source and destination of a DEVICE IDENTITIES object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentities {
    /// Source device
    pub source: u8,
    /// Destination device
    pub destination: u8,
}

impl DeviceIdentities {
    /// Identities from `source` to `destination`.
    pub fn new(source: u8, destination: u8) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Terminal to UICC, the route of every terminal response.
    pub fn terminal_to_uicc() -> Self {
        Self::new(DEV_ID_TERMINAL, DEV_ID_UICC)
    }

    pub(crate) fn encode_into(&self, buf: &mut Vec<u8>) {
        write_tlv(
            buf,
            TagId::DEVICE_IDENTITIES,
            true,
            &[self.source, self.destination],
        );
    }
}

impl Default for DeviceIdentities {
    fn default() -> Self {
        Self::terminal_to_uicc()
    }
}
