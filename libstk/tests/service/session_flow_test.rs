#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libstk::protocol::TerminalResponse;
use libstk::test_support::{MockSetup, mock_service};
use libstk::transport::{ListenerEvent, RadioCall};
use libstk::{CommandType, ResultCode, ServiceConfig, SessionState, parse_hex};

fn setup() -> MockSetup {
    common::init_logging();
    mock_service(ServiceConfig::default()).unwrap()
}

fn decode_tr(hex: &str) -> TerminalResponse {
    TerminalResponse::decode(&parse_hex(hex).unwrap()).unwrap()
}

#[test]
fn set_up_menu_is_acknowledged_before_command_ready() {
    let mut s = setup();
    s.service.proactive_command(fixtures::MENU_HEX);

    let trs = s.radio.terminal_responses();
    assert_eq!(trs.len(), 1);
    let tr = decode_tr(&trs[0]);
    assert_eq!(tr.result_code, ResultCode::Ok);
    assert_eq!(tr.cmd_details, fixtures::menu_details());

    let ready = s.listener.ready_commands();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].command_type(), CommandType::SetUpMenu);

    assert!(s.service.current_menu().is_some());
    assert_eq!(s.service.state(), SessionState::Idle);
}

#[test]
fn truncated_command_is_rejected() {
    let mut s = setup();
    s.service.proactive_command(fixtures::TRUNCATED_MENU_HEX);

    let trs = s.radio.terminal_responses();
    assert_eq!(trs.len(), 1);
    let tr = decode_tr(&trs[0]);
    assert_eq!(tr.result_code, ResultCode::CmdDataNotUnderstood);
    assert_eq!(tr.cmd_details.command_number, 1);
    assert!(s.listener.events().is_empty());
    assert!(s.service.current_command().is_none());
}

#[test]
fn interactive_command_waits_for_application() {
    let mut s = setup();
    s.service.proactive_command(&fixtures::display_text_hex(false));

    assert!(s.radio.calls().is_empty());
    assert_eq!(s.listener.ready_commands().len(), 1);
    assert_eq!(s.service.state(), SessionState::AwaitingApplication);
}

#[test]
fn immediate_display_text_and_idle_text() {
    let mut s = setup();
    s.service.proactive_command(&fixtures::display_text_hex(true));
    s.service.proactive_command(&fixtures::idle_mode_text_hex());

    let codes: Vec<_> = s
        .radio
        .terminal_responses()
        .iter()
        .map(|hex| decode_tr(hex).result_code)
        .collect();
    assert_eq!(codes, [ResultCode::Ok, ResultCode::Ok]);
    assert_eq!(s.listener.ready_commands().len(), 2);
    assert_eq!(s.service.state(), SessionState::Idle);
}

#[test]
fn empty_menu_removes_the_menu() {
    let mut s = setup();
    s.service.proactive_command(fixtures::MENU_HEX);
    s.service.proactive_command(&fixtures::empty_menu_hex());
    assert!(s.service.current_menu().is_none());

    s.listener.clear();
    s.service.session_end();
    assert_eq!(s.listener.events(), vec![ListenerEvent::SessionEnded(None)]);
    assert!(s.service.current_command().is_none());
    assert_eq!(s.service.state(), SessionState::Idle);
}

#[test]
fn session_end_restores_the_menu() {
    let mut s = setup();
    s.service.proactive_command(fixtures::MENU_HEX);
    s.service.proactive_command(&fixtures::select_item_hex());
    assert_eq!(
        s.service.current_command().map(|c| c.command_type()),
        Some(CommandType::SelectItem)
    );

    s.service.session_end();
    let current = s.service.current_command().map(|c| c.command_type());
    assert_eq!(current, Some(CommandType::SetUpMenu));
    assert_eq!(s.service.state(), SessionState::AwaitingApplication);
    match s.listener.events().last() {
        Some(ListenerEvent::SessionEnded(Some(menu))) => {
            assert_eq!(menu.command_type(), CommandType::SetUpMenu)
        }
        other => panic!("unexpected listener event: {:?}", other),
    }
}

#[test]
fn event_list_is_answered_without_command_ready() {
    let mut s = setup();
    s.service.proactive_command(&fixtures::event_list_hex(&[0x04, 0x05]));
    s.service.proactive_command(&fixtures::event_list_hex(&[0x04, 0x42]));

    let codes: Vec<_> = s
        .radio
        .terminal_responses()
        .iter()
        .map(|hex| decode_tr(hex).result_code)
        .collect();
    assert_eq!(codes, [ResultCode::Ok, ResultCode::CmdTypeNotUnderstood]);
    assert!(s.listener.events().is_empty());
}

#[test]
fn send_sms_notification_reaches_application() {
    let mut s = setup();
    s.service.event_notify(&fixtures::send_sms_hex());
    let ready = s.listener.ready_commands();
    assert_eq!(ready.len(), 1);
    let text = ready[0].text_message().unwrap();
    assert_eq!(text.text.as_deref(), Some("Sending"));
    assert!(s.radio.calls().is_empty());
}

#[test]
fn radio_failure_does_not_stop_the_session() {
    let mut s = setup();
    s.radio.fail_next(1);
    s.service.proactive_command(fixtures::MENU_HEX);
    // the failed send is not recorded, the menu is still installed
    assert!(s.radio.calls().is_empty());
    assert_eq!(s.listener.ready_commands().len(), 1);

    s.service.proactive_command(&fixtures::display_text_hex(true));
    assert!(matches!(
        s.radio.calls().as_slice(),
        [RadioCall::TerminalResponse(_)]
    ));
}

mod properties {
    use std::sync::{Arc, Mutex};

    use libstk::test_support::{item_value, proactive_hex};
    use libstk::transport::{MockRadio, ToolkitListener};
    use libstk::service::ManualScheduler;
    use libstk::{CommandDetails, StkCmdMessage, StkServiceBuilder, TagId, parse_hex};
    use proptest::prelude::*;

    use super::*;

    /// Records how many terminal responses the radio had seen whenever a
    /// command reached the application.
    struct OrderingListener {
        radio: MockRadio,
        seen: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl ToolkitListener for OrderingListener {
        fn command_ready(&mut self, _cmd: &StkCmdMessage) {
            self.seen.lock().unwrap().push(self.radio.terminal_responses());
        }

        fn session_ended(&mut self, _menu: Option<&StkCmdMessage>) {}
    }

    fn menu_hex(number: u8, items: &[(u8, String)]) -> String {
        let det = CommandDetails::new(number, CommandType::SetUpMenu, 0x00);
        let values: Vec<Vec<u8>> = items.iter().map(|(id, t)| item_value(*id, t)).collect();
        let mut objects: Vec<(TagId, bool, &[u8])> = vec![(TagId::ALPHA_ID, true, &b"Menu"[..])];
        for v in &values {
            objects.push((TagId::ITEM, false, v.as_slice()));
        }
        proactive_hex(&det, &objects)
    }

    proptest! {
        #[test]
        fn set_up_menu_acknowledged_first(
            number in 1u8..0xff,
            items in prop::collection::vec((1u8..0xff, "[A-Za-z0-9 ]{1,12}"), 1..6),
        ) {
            let radio = MockRadio::new();
            let seen = Arc::new(Mutex::new(Vec::new()));
            let mut service = StkServiceBuilder::new()
                .with_radio(Box::new(radio.clone()))
                .with_listener(Box::new(OrderingListener {
                    radio: radio.clone(),
                    seen: seen.clone(),
                }))
                .with_scheduler(Box::new(ManualScheduler::new()))
                .build()
                .unwrap();

            service.proactive_command(&menu_hex(number, &items));

            let trs = radio.terminal_responses();
            prop_assert_eq!(trs.len(), 1);
            let tr = TerminalResponse::decode(&parse_hex(&trs[0]).unwrap()).unwrap();
            prop_assert_eq!(tr.result_code, ResultCode::Ok);
            prop_assert_eq!(tr.cmd_details.command_number, number);

            let seen = seen.lock().unwrap();
            prop_assert_eq!(seen.len(), 1);
            prop_assert_eq!(&seen[0], &trs);
        }
    }

    #[test]
    fn every_truncation_is_answered_with_an_error() {
        let full = parse_hex(fixtures::MENU_HEX).unwrap();
        // header plus a complete COMMAND DETAILS object
        for cut in 7..full.len() {
            let mut s = setup();
            s.service.proactive_command(&libstk::bytes_to_hex(&full[..cut]));

            let trs = s.radio.terminal_responses();
            assert_eq!(trs.len(), 1, "cut at {}", cut);
            let tr = decode_tr(&trs[0]);
            assert_ne!(tr.result_code, ResultCode::Ok, "cut at {}", cut);
            assert!(s.listener.events().is_empty(), "cut at {}", cut);
            assert!(s.service.current_command().is_none());
        }
    }
}
