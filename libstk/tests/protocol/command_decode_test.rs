#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libstk::protocol::commands::RefreshMode;
use libstk::protocol::{CommandParams, TagRegistry, decode_command};
use libstk::{CommandType, EventType, ResultCode, parse_hex};
use proptest::prelude::*;

fn decode(hex: &str) -> Result<CommandParams, libstk::protocol::CommandDecodeError> {
    decode_command(&parse_hex(hex).unwrap(), &TagRegistry::default())
}

#[test]
fn captured_menu() {
    let params = decode(fixtures::MENU_HEX).unwrap();
    let CommandParams::SetUpMenu { cmd_det, menu } = params else {
        panic!("unexpected params: {:?}", params);
    };
    assert_eq!(cmd_det, fixtures::menu_details());
    assert_eq!(menu.title.as_deref(), Some("Menu"));
    assert_eq!(menu.items.len(), 1);
    assert_eq!(menu.items[0].id, 1);
    assert_eq!(menu.items[0].text, "A");
}

#[test]
fn null_item_empties_the_menu() {
    let params = decode(&fixtures::empty_menu_hex()).unwrap();
    let menu = match params {
        CommandParams::SetUpMenu { menu, .. } => menu,
        other => panic!("unexpected params: {:?}", other),
    };
    assert!(menu.items.is_empty());
}

#[test]
fn select_item_and_input_commands() {
    match decode(&fixtures::select_item_hex()).unwrap() {
        CommandParams::SelectItem { menu, .. } => {
            let texts: Vec<_> = menu.items.iter().map(|i| i.text.as_str()).collect();
            assert_eq!(texts, ["One", "Two"]);
            assert_eq!(menu.title.as_deref(), Some("Pick"));
        }
        other => panic!("unexpected params: {:?}", other),
    }

    match decode(&fixtures::get_input_hex()).unwrap() {
        CommandParams::GetInput { input, .. } => {
            assert_eq!(input.text, "Name");
            assert_eq!((input.min_len, input.max_len), (1, 8));
            assert!(!input.digit_only);
            assert!(input.echo);
        }
        other => panic!("unexpected params: {:?}", other),
    }

    match decode(&fixtures::get_inkey_yes_no_hex()).unwrap() {
        CommandParams::GetInkey { input, .. } => {
            assert!(input.yes_no);
            assert_eq!(input.max_len, 1);
        }
        other => panic!("unexpected params: {:?}", other),
    }
}

#[test]
fn display_text_immediate_response_flag() {
    let text = |hex: &str| match decode(hex).unwrap() {
        CommandParams::DisplayText { text, .. } => text,
        other => panic!("unexpected params: {:?}", other),
    };
    let waiting = text(&fixtures::display_text_hex(false));
    assert!(waiting.response_needed);
    assert!(waiting.user_clear);
    assert_eq!(waiting.text.as_deref(), Some("Hello"));

    assert!(!text(&fixtures::display_text_hex(true)).response_needed);
}

#[test]
fn dtmf_call_and_refresh() {
    match decode(&fixtures::send_dtmf_hex()).unwrap() {
        CommandParams::SendDtmf { dtmf, .. } => assert_eq!(dtmf.dtmf_string, "1P2"),
        other => panic!("unexpected params: {:?}", other),
    }

    match decode(&fixtures::set_up_call_hex()).unwrap() {
        CommandParams::SetUpCall { call, .. } => {
            assert_eq!(call.address, "1234");
            assert_eq!(call.ton_npi, 0x81);
            assert_eq!(call.confirm_text.as_deref(), Some("Call?"));
            assert!(call.call_text.is_none());
        }
        other => panic!("unexpected params: {:?}", other),
    }

    match decode(&fixtures::refresh_hex()).unwrap() {
        CommandParams::Refresh { refresh, .. } => {
            assert_eq!(refresh.mode, RefreshMode::FileChange);
            assert_eq!(refresh.files, vec![vec![0x3f00, 0x7f20, 0x6f07]]);
        }
        other => panic!("unexpected params: {:?}", other),
    }
}

#[test]
fn event_list_keeps_unsupported_codes() {
    match decode(&fixtures::event_list_hex(&[0x05, 0x42])).unwrap() {
        CommandParams::SetUpEventList { events, .. } => {
            assert!(events.contains(&EventType::IdleScreenAvailable));
            assert!(events.contains(&EventType::Other(0x42)));
        }
        other => panic!("unexpected params: {:?}", other),
    }
}

#[test]
fn truncated_command_keeps_details() {
    let err = decode(fixtures::TRUNCATED_MENU_HEX).unwrap_err();
    assert_eq!(err.code, ResultCode::CmdDataNotUnderstood);
    let det = err.cmd_details.expect("details recovered");
    assert_eq!(det.command_type(), Some(CommandType::SetUpMenu));
    assert_eq!(det.command_number, 1);
}

#[test]
fn unknown_command_type() {
    // type 0x7e is not a proactive command this engine knows
    let err = decode("d009810301 7e00 82028182".replace(' ', "").as_str()).unwrap_err();
    assert_eq!(err.code, ResultCode::CmdTypeNotUnderstood);
    assert_eq!(err.cmd_details.map(|d| d.type_of_command), Some(0x7e));
}

#[test]
fn missing_mandatory_object() {
    // SET UP MENU without ALPHA IDENTIFIER
    let err = decode("d00d8103012500820281820f020141").unwrap_err();
    assert_eq!(err.code, ResultCode::RequiredValuesMissing);
    assert!(err.cmd_details.is_some());
}

proptest! {
    #[test]
    fn decode_command_no_panic(body in prop::collection::vec(any::<u8>(), 0..96)) {
        use std::panic::{AssertUnwindSafe, catch_unwind};
        let mut bytes = vec![0xd0, body.len().min(0x7f) as u8];
        bytes.extend_from_slice(&body);
        let registry = TagRegistry::default();
        let res = catch_unwind(AssertUnwindSafe(|| decode_command(&bytes, &registry)));
        prop_assert!(res.is_ok());
    }
}
