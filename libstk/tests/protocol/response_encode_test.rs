use libstk::constants::{DEV_ID_NETWORK, DEV_ID_UICC};
use libstk::protocol::{
    GetInkeyInputResponseData, TerminalResponse, encode_event_download, encode_menu_selection,
    encode_terminal_response,
};
use libstk::{CommandDetails, CommandType, EventType, ResultCode, TagId, bytes_to_hex};

#[test]
fn input_text_in_gsm_8bit() {
    let cmd = CommandDetails::new(4, CommandType::GetInput, 0x01);
    let data = GetInkeyInputResponseData::text("Bob", false, false);
    let bytes = encode_terminal_response(&cmd, ResultCode::Ok, None, Some(&data));

    let tr = TerminalResponse::decode(&bytes).unwrap();
    assert_eq!(tr.cmd_details, cmd);
    assert_eq!(tr.result_code, ResultCode::Ok);
    assert_eq!(tr.data.len(), 1);
    assert_eq!(tr.data[0].tag, TagId::TEXT_STRING);
    assert_eq!(tr.data[0].value, vec![0x04, b'B', b'o', b'b']);
}

#[test]
fn input_text_in_ucs2() {
    let cmd = CommandDetails::new(4, CommandType::GetInput, 0x03);
    let data = GetInkeyInputResponseData::text("é", true, false);
    let bytes = encode_terminal_response(&cmd, ResultCode::Ok, None, Some(&data));
    let tr = TerminalResponse::decode(&bytes).unwrap();
    assert_eq!(tr.data[0].value, vec![0x08, 0x00, 0xe9]);
}

#[test]
fn long_ucs2_input_survives_decode() {
    let cmd = CommandDetails::new(4, CommandType::GetInput, 0x03);
    let text = "x".repeat(200);
    let data = GetInkeyInputResponseData::text(text.as_str(), true, false);
    let bytes = encode_terminal_response(&cmd, ResultCode::Ok, None, Some(&data));

    // DCS byte + 200 UCS2 characters = 0x191 bytes
    let header = [0x8d, 0x82, 0x01, 0x91, 0x08];
    assert!(bytes.windows(header.len()).any(|w| w == header));

    let tr = TerminalResponse::decode(&bytes).unwrap();
    assert_eq!(tr.data.len(), 1);
    assert_eq!(tr.data[0].tag, TagId::TEXT_STRING);
    assert_eq!(tr.data[0].value.len(), 401);
    assert_eq!(tr.data[0].value[0], 0x08);
    assert!(tr.data[0].value[1..].chunks(2).all(|c| c == [0x00, b'x']));
}

#[test]
fn unpacked_input_at_maximum_length() {
    let cmd = CommandDetails::new(4, CommandType::GetInput, 0x01);
    let data = GetInkeyInputResponseData::text("a".repeat(255), false, false);
    let bytes = encode_terminal_response(&cmd, ResultCode::Ok, None, Some(&data));
    let tr = TerminalResponse::decode(&bytes).unwrap();
    assert_eq!(tr.data[0].value.len(), 256);
}

#[test]
fn yes_no_answer() {
    let cmd = CommandDetails::new(5, CommandType::GetInkey, 0x04);
    let data = GetInkeyInputResponseData::yes_no(true);
    let bytes = encode_terminal_response(&cmd, ResultCode::Ok, None, Some(&data));
    assert!(bytes_to_hex(&bytes).ends_with("8d020401"));
}

#[test]
fn menu_selection_envelope() {
    assert_eq!(
        bytes_to_hex(&encode_menu_selection(2, false)),
        "d30782020181900102"
    );
    assert_eq!(
        bytes_to_hex(&encode_menu_selection(2, true)),
        "d309820201819001021500"
    );
}

#[test]
fn event_download_envelope() {
    let bytes = encode_event_download(EventType::UserActivity, DEV_ID_NETWORK, DEV_ID_UICC, None);
    assert_eq!(bytes_to_hex(&bytes), "d60799010482028381");

    let extra = [0x8b, 0x01, 0x00];
    let bytes = encode_event_download(
        EventType::IdleScreenAvailable,
        0x02,
        DEV_ID_UICC,
        Some(&extra),
    );
    assert_eq!(bytes[1] as usize, bytes.len() - 2);
    assert_eq!(&bytes[bytes.len() - 3..], &extra);
}
