// fixtures.rs: commonly used proactive commands

use libstk::test_support::{item_value, proactive_hex};
use libstk::{CommandDetails, CommandType, TagId};

/// SET UP MENU #1, title "Menu", one item (1, "A"), as captured from a card.
pub const MENU_HEX: &str = "d01381030125008202818285044d656e750f020141";

/// Same command with the container cut short.
pub const TRUNCATED_MENU_HEX: &str = "d0138103012500820281828504";

pub fn menu_details() -> CommandDetails {
    CommandDetails::new(1, CommandType::SetUpMenu, 0x00)
}

pub fn set_up_menu_hex(number: u8, items: &[(u8, &str)]) -> String {
    let det = CommandDetails::new(number, CommandType::SetUpMenu, 0x00);
    let values: Vec<Vec<u8>> = items.iter().map(|(id, t)| item_value(*id, t)).collect();
    let mut objects: Vec<(TagId, bool, &[u8])> = vec![(TagId::ALPHA_ID, true, &b"Services"[..])];
    for v in &values {
        objects.push((TagId::ITEM, false, v.as_slice()));
    }
    proactive_hex(&det, &objects)
}

/// SET UP MENU whose only item is the null item: removes the menu.
pub fn empty_menu_hex() -> String {
    let det = CommandDetails::new(2, CommandType::SetUpMenu, 0x00);
    proactive_hex(
        &det,
        &[(TagId::ALPHA_ID, true, &b"Services"[..]), (TagId::ITEM, false, &[0u8; 0][..])],
    )
}

pub fn select_item_details() -> CommandDetails {
    CommandDetails::new(3, CommandType::SelectItem, 0x00)
}

pub fn select_item_hex() -> String {
    let one = item_value(1, "One");
    let two = item_value(2, "Two");
    proactive_hex(
        &select_item_details(),
        &[
            (TagId::ALPHA_ID, true, &b"Pick"[..]),
            (TagId::ITEM, false, one.as_slice()),
            (TagId::ITEM, false, two.as_slice()),
        ],
    )
}

pub fn get_input_details() -> CommandDetails {
    // alphabet set
    CommandDetails::new(4, CommandType::GetInput, 0x01)
}

pub fn get_input_hex() -> String {
    proactive_hex(
        &get_input_details(),
        &[
            (TagId::TEXT_STRING, true, &b"\x04Name"[..]),
            (TagId::RESPONSE_LENGTH, true, &[1u8, 8][..]),
        ],
    )
}

pub fn get_inkey_yes_no_details() -> CommandDetails {
    CommandDetails::new(5, CommandType::GetInkey, 0x04)
}

pub fn get_inkey_yes_no_hex() -> String {
    proactive_hex(
        &get_inkey_yes_no_details(),
        &[(TagId::TEXT_STRING, true, &b"\x04OK?"[..])],
    )
}

pub fn display_text_details() -> CommandDetails {
    CommandDetails::new(6, CommandType::DisplayText, 0x80)
}

/// DISPLAY TEXT "Hello"; `immediate` adds the IMMEDIATE RESPONSE object.
pub fn display_text_hex(immediate: bool) -> String {
    let mut objects: Vec<(TagId, bool, &[u8])> = vec![(TagId::TEXT_STRING, true, &b"\x04Hello"[..])];
    if immediate {
        objects.push((TagId::IMMEDIATE_RESPONSE, false, &[0u8; 0][..]));
    }
    proactive_hex(&display_text_details(), &objects)
}

pub fn idle_mode_text_hex() -> String {
    let det = CommandDetails::new(7, CommandType::SetUpIdleModeText, 0x00);
    proactive_hex(&det, &[(TagId::TEXT_STRING, true, &b"\x04Idle"[..])])
}

pub fn send_dtmf_details() -> CommandDetails {
    CommandDetails::new(8, CommandType::SendDtmf, 0x00)
}

/// SEND DTMF "1P2" (swapped-nibble BCD, 0xc is the pause digit).
pub fn send_dtmf_hex() -> String {
    proactive_hex(&send_dtmf_details(), &[(TagId::DTMF, true, &[0xc1u8, 0xf2][..])])
}

pub fn set_up_call_details() -> CommandDetails {
    CommandDetails::new(9, CommandType::SetUpCall, 0x00)
}

/// SET UP CALL to "1234" with a confirmation prompt.
pub fn set_up_call_hex() -> String {
    proactive_hex(
        &set_up_call_details(),
        &[
            (TagId::ALPHA_ID, false, &b"Call?"[..]),
            (TagId::ADDRESS, true, &[0x81u8, 0x21, 0x43][..]),
        ],
    )
}

pub fn refresh_details() -> CommandDetails {
    // file change notification
    CommandDetails::new(10, CommandType::Refresh, 0x01)
}

pub fn refresh_hex() -> String {
    proactive_hex(
        &refresh_details(),
        &[(TagId::FILE_LIST, true, &[1u8, 0x3f, 0x00, 0x7f, 0x20, 0x6f, 0x07][..])],
    )
}

pub fn event_list_details() -> CommandDetails {
    CommandDetails::new(11, CommandType::SetUpEventList, 0x00)
}

pub fn event_list_hex(events: &[u8]) -> String {
    proactive_hex(&event_list_details(), &[(TagId::EVENT_LIST, true, events)])
}

pub fn send_sms_hex() -> String {
    let det = CommandDetails::new(12, CommandType::SendSms, 0x00);
    proactive_hex(&det, &[(TagId::ALPHA_ID, false, &b"Sending"[..])])
}
