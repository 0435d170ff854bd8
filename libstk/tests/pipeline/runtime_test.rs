#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use common::fixtures;
use libstk::pipeline::{CommandDecoder, MessageDecoder, StkRuntime};
use libstk::protocol::TerminalResponse;
use libstk::service::{MessageId, RilMessage};
use libstk::transport::{ListenerEvent, MockRadio, RadioCall, RecordingListener};
use libstk::{
    Error, ResultCode, ServiceConfig, SessionState, StkResponseMessage, StkServiceBuilder,
    parse_hex,
};

/// Standard decoder that takes longer on some messages, so that decode
/// time varies between consecutive commands.
struct JitterDecoder {
    inner: CommandDecoder,
    delays: Vec<u64>,
}

impl MessageDecoder for JitterDecoder {
    fn decode(&self, msg: RilMessage) -> RilMessage {
        if msg.id == MessageId::ProactiveCommand {
            let idx = msg.raw_payload.as_ref().map_or(0, |p| p.len()) % self.delays.len();
            std::thread::sleep(Duration::from_millis(self.delays[idx]));
        }
        self.inner.decode(msg)
    }
}

fn builder(radio: &MockRadio, listener: &RecordingListener) -> StkServiceBuilder {
    common::init_logging();
    StkServiceBuilder::new()
        .with_config(ServiceConfig::default().with_dtmf_pause(Duration::from_millis(20)))
        .with_radio(Box::new(radio.clone()))
        .with_listener(Box::new(listener.clone()))
}

async fn wait_until(mut done: impl FnMut() -> bool) {
    for _ in 0..200 {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

fn command_numbers(radio: &MockRadio) -> Vec<u8> {
    radio
        .terminal_responses()
        .iter()
        .map(|hex| {
            TerminalResponse::decode(&parse_hex(hex).unwrap())
                .unwrap()
                .cmd_details
                .command_number
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn commands_are_processed_in_arrival_order() {
    let radio = MockRadio::new();
    let listener = RecordingListener::new();
    let decoder = JitterDecoder {
        inner: CommandDecoder::default(),
        delays: vec![30, 0, 10],
    };
    let runtime = StkRuntime::start_with_decoder(builder(&radio, &listener), decoder).unwrap();
    let handle = runtime.handle();

    handle.proactive_command(fixtures::MENU_HEX).unwrap();
    handle.proactive_command(fixtures::display_text_hex(true)).unwrap();
    handle.proactive_command(fixtures::idle_mode_text_hex()).unwrap();

    wait_until(|| radio.terminal_responses().len() == 3).await;
    assert_eq!(command_numbers(&radio), vec![1, 6, 7]);
    assert_eq!(listener.ready_commands().len(), 3);

    let service = runtime.shutdown().await.unwrap();
    assert!(service.is_disposed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dtmf_pause_runs_on_tokio_timers() {
    let radio = MockRadio::new();
    radio.set_call_active(true);
    let listener = RecordingListener::new();
    let runtime = StkRuntime::start(builder(&radio, &listener)).unwrap();

    runtime.handle().proactive_command(fixtures::send_dtmf_hex()).unwrap();
    wait_until(|| radio.calls().len() == 3).await;

    let calls = radio.calls();
    assert_eq!(calls[0], RadioCall::Dtmf('1'));
    assert_eq!(calls[1], RadioCall::Dtmf('2'));
    assert!(matches!(calls[2], RadioCall::TerminalResponse(_)));
    runtime.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn session_end_supersedes_command_in_decode() {
    let radio = MockRadio::new();
    let listener = RecordingListener::new();
    let decoder = JitterDecoder {
        inner: CommandDecoder::default(),
        delays: vec![100],
    };
    let runtime = StkRuntime::start_with_decoder(builder(&radio, &listener), decoder).unwrap();
    let handle = runtime.handle();

    handle.proactive_command(fixtures::display_text_hex(false)).unwrap();
    handle.session_end().unwrap();

    wait_until(|| !listener.events().is_empty()).await;
    // give the slow decode time to finish and be dispatched
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(listener.events(), vec![ListenerEvent::SessionEnded(None)]);
    assert!(radio.calls().is_empty());

    let service = runtime.shutdown().await.unwrap();
    assert_eq!(service.epoch(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn application_response_through_handle() {
    let radio = MockRadio::new();
    let listener = RecordingListener::new();
    let runtime = StkRuntime::start(builder(&radio, &listener)).unwrap();
    let handle = runtime.handle();

    handle.proactive_command(fixtures::get_input_hex()).unwrap();
    wait_until(|| listener.ready_commands().len() == 1).await;

    let cmd = listener.ready_commands().remove(0);
    handle
        .submit_response(StkResponseMessage::for_command(&cmd, ResultCode::Ok).with_input("Zed"))
        .unwrap();
    wait_until(|| radio.terminal_responses().len() == 1).await;

    let service = runtime.shutdown().await.unwrap();
    assert_eq!(service.state(), SessionState::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn handle_reports_closed_engine() {
    let radio = MockRadio::new();
    let listener = RecordingListener::new();
    let runtime = StkRuntime::start(builder(&radio, &listener)).unwrap();
    let handle = runtime.handle();
    assert!(runtime.is_decoder_running());

    handle.sim_ready().unwrap();
    wait_until(|| radio.calls() == vec![RadioCall::StkServiceRunning]).await;

    runtime.shutdown().await.unwrap();
    assert!(matches!(handle.sim_ready(), Err(Error::ChannelClosed)));
    assert!(matches!(handle.session_end(), Err(Error::ChannelClosed)));
}

#[test]
fn start_requires_a_tokio_runtime() {
    let radio = MockRadio::new();
    let listener = RecordingListener::new();
    let err = StkRuntime::start(builder(&radio, &listener)).err().unwrap();
    assert!(matches!(err, Error::Transport(_)));
}
