#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libstk::constants::{DEV_ID_NETWORK, DEV_ID_UICC};
use libstk::pipeline::{CommandDecoder, MessageDecoder};
use libstk::protocol::TerminalResponse;
use libstk::service::RilMessage;
use libstk::test_support::{MockSetup, mock_service};
use libstk::transport::RadioCall;
use libstk::{CommandType, EventType, ResultCode, ServiceConfig, SessionState, parse_hex};

fn setup(config: ServiceConfig) -> MockSetup {
    common::init_logging();
    mock_service(config).unwrap()
}

fn decode_tr(hex: &str) -> TerminalResponse {
    TerminalResponse::decode(&parse_hex(hex).unwrap()).unwrap()
}

#[test]
fn refresh_success_reloads_records() {
    let mut s = setup(ServiceConfig::default());
    let mut msg = RilMessage::refresh(fixtures::refresh_hex());
    msg = CommandDecoder::default().decode(msg);
    s.service.handle_ril_message(msg);
    assert_eq!(
        s.listener.ready_commands()[0].command_type(),
        CommandType::Refresh
    );

    s.service.handle_refresh_result(0);
    let calls = s.radio.calls();
    assert_eq!(calls[0], RadioCall::RefreshSimRecords);
    let RadioCall::TerminalResponse(hex) = &calls[1] else {
        panic!("expected terminal response, got {:?}", calls[1]);
    };
    assert_eq!(decode_tr(hex).result_code, ResultCode::Ok);
    assert_eq!(s.service.state(), SessionState::Idle);
}

#[test]
fn refresh_failure() {
    let mut s = setup(ServiceConfig::default());
    s.service.proactive_command(&fixtures::refresh_hex());
    s.service.handle_refresh_result(-1);

    let trs = s.radio.terminal_responses();
    assert_eq!(trs.len(), 1);
    assert_eq!(
        decode_tr(&trs[0]).result_code,
        ResultCode::TerminalCrntlyUnableToProcess
    );
    assert!(!s.radio.calls().contains(&RadioCall::RefreshSimRecords));
}

#[test]
fn refresh_result_without_refresh_is_ignored() {
    let mut s = setup(ServiceConfig::default());
    s.service.handle_refresh_result(0);
    assert!(s.radio.calls().is_empty());
}

#[test]
fn sim_ready_reporting_follows_config() {
    let mut s = setup(ServiceConfig::default());
    s.service.handle_sim_ready();
    assert_eq!(s.radio.calls(), vec![RadioCall::StkServiceRunning]);

    let mut quiet = setup(ServiceConfig::default().with_report_running_on_sim_ready(false));
    quiet.service.handle_sim_ready();
    assert!(quiet.radio.calls().is_empty());
}

#[test]
fn event_download_envelope() {
    let mut s = setup(ServiceConfig::default());
    s.service
        .event_download(EventType::UserActivity, DEV_ID_NETWORK, DEV_ID_UICC, None);
    assert_eq!(s.radio.envelopes(), vec!["d60799010482028381".to_string()]);
}

#[test]
fn configured_device_ids_are_used() {
    let config = ServiceConfig::default().with_terminal_device_id(0x02);
    let mut s = setup(config);
    s.service.proactive_command(fixtures::MENU_HEX);
    let tr = decode_tr(&s.radio.terminal_responses()[0]);
    assert_eq!(tr.devices.source, 0x02);
    assert_eq!(tr.devices.destination, DEV_ID_UICC);
}

#[test]
fn superseded_command_is_dropped() {
    let mut s = setup(ServiceConfig::default());
    // decoded before the session end, dispatched after it
    let decoder = CommandDecoder::default();
    let late = decoder.decode(
        RilMessage::proactive_command(fixtures::display_text_hex(false)).with_epoch(0),
    );
    s.service
        .handle_ril_message(RilMessage::session_end().with_epoch(1));
    s.service.handle_ril_message(late);

    assert_eq!(s.service.epoch(), 1);
    assert!(s.service.current_command().is_none());
    assert_eq!(s.listener.ready_commands().len(), 0);
}

#[test]
fn disposed_service_ignores_input() {
    let mut s = setup(ServiceConfig::default());
    s.service.proactive_command(fixtures::MENU_HEX);
    s.radio.clear();
    s.listener.clear();

    s.service.dispose();
    assert!(s.service.is_disposed());
    assert!(s.service.current_menu().is_none());

    s.service.proactive_command(fixtures::MENU_HEX);
    s.service.session_end();
    s.service.handle_sim_ready();
    assert!(s.radio.calls().is_empty());
    assert!(s.listener.events().is_empty());
}

#[test]
fn session_end_drops_held_call_setup() {
    let mut s = setup(ServiceConfig::default());
    s.service.event_notify(&fixtures::set_up_call_hex());
    assert!(s.listener.ready_commands().is_empty());

    s.service.session_end();
    s.service.call_setup(None);

    assert!(s.listener.ready_commands().is_empty());
    assert!(s.service.current_command().is_none());
    assert_eq!(s.service.state(), SessionState::Idle);
    assert!(s.radio.terminal_responses().is_empty());
}
