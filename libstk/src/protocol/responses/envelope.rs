// libstk-rs/libstk/src/protocol/responses/envelope.rs

//! MENU SELECTION and EVENT DOWNLOAD envelopes.

use crate::constants::{
    BER_EVENT_DOWNLOAD_TAG, BER_MENU_SELECTION_TAG, DEV_ID_KEYPAD, DEV_ID_UICC,
};
use crate::protocol::ber::EnvelopeBuilder;
use crate::protocol::tlv::write_tlv;
use crate::types::{EventType, TagId};

use super::DeviceIdentities;

/// MENU SELECTION envelope (keypad -> UICC).
pub fn encode_menu_selection(item_id: u8, help_requested: bool) -> Vec<u8> {
    encode_menu_selection_with(
        DeviceIdentities::new(DEV_ID_KEYPAD, DEV_ID_UICC),
        item_id,
        help_requested,
    )
}

/// As [`encode_menu_selection`] with explicit device identities.
pub fn encode_menu_selection_with(
    devices: DeviceIdentities,
    item_id: u8,
    help_requested: bool,
) -> Vec<u8> {
    let mut env = EnvelopeBuilder::new(BER_MENU_SELECTION_TAG);
    let buf = env.buffer();
    devices.encode_into(buf);
    write_tlv(buf, TagId::ITEM_ID, true, &[item_id]);
    if help_requested {
        write_tlv(buf, TagId::HELP_REQUEST, false, &[]);
    }
    env.finish()
}

/// EVENT DOWNLOAD envelope. `additional_info` holds already encoded
/// event-specific objects and is appended verbatim.
pub fn encode_event_download(
    event: EventType,
    source_id: u8,
    destination_id: u8,
    additional_info: Option<&[u8]>,
) -> Vec<u8> {
    let mut env = EnvelopeBuilder::new(BER_EVENT_DOWNLOAD_TAG);
    let buf = env.buffer();
    write_tlv(buf, TagId::EVENT_LIST, true, &[event.value()]);
    DeviceIdentities::new(source_id, destination_id).encode_into(buf);
    if let Some(extra) = additional_info {
        buf.extend_from_slice(extra);
    }
    env.finish()
}
