// Replay a captured toolkit session against the engine.
//
// Proactive commands are read as hex, one per line, from the file given as
// first argument (lines starting with '#' are skipped). Without a file a
// short built-in session is replayed. The radio and the UI are mocks; every
// outbound message is printed at the end.
//
//   RUST_LOG=debug cargo run --example session_replay -- session.txt

use std::time::Duration;

use anyhow::Context;
use libstk::pipeline::StkRuntime;
use libstk::transport::{ListenerEvent, MockRadio, RadioCall, RecordingListener};
use libstk::{ServiceConfig, StkResponseMessage, StkServiceBuilder, UserData};

const BUILTIN: &[&str] = &[
    // SET UP MENU "Menu" with item 1 "A"
    "d01381030125008202818285044d656e750f020141",
    // DISPLAY TEXT "Hello", immediate response
    "d0138103062180820281828d060448656c6c6f2b00",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let lines = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path))?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(String::from)
            .collect(),
        None => BUILTIN.iter().map(|l| l.to_string()).collect::<Vec<_>>(),
    };

    let radio = MockRadio::new();
    radio.set_call_active(true);
    let listener = RecordingListener::new();
    let builder = StkServiceBuilder::new()
        .with_config(ServiceConfig::default().with_dtmf_pause(Duration::from_millis(100)))
        .with_radio(Box::new(radio.clone()))
        .with_listener(Box::new(listener.clone()));
    let runtime = StkRuntime::start(builder)?;
    let handle = runtime.handle();

    for line in &lines {
        handle.proactive_command(line.as_str())?;
    }

    // Answer whatever the card asked for: pick the first item of menus,
    // accept everything else.
    tokio::time::sleep(Duration::from_millis(300)).await;
    for event in listener.events() {
        let ListenerEvent::CommandReady(cmd) = event else {
            continue;
        };
        println!("command ready: {}", cmd.command_type());
        let data = match cmd.menu() {
            Some(menu) => match menu.items.first() {
                Some(item) => UserData::MenuSelection(item.id),
                None => continue,
            },
            None if cmd.input().is_some() => UserData::Input("1234".into()),
            None if cmd.call_setup().is_some() => UserData::Confirm(true),
            None => UserData::None,
        };
        handle.submit_response(
            StkResponseMessage::for_command(&cmd, libstk::ResultCode::Ok).with_user_data(data),
        )?;
    }
    handle.session_end()?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let service = runtime.shutdown().await?;
    for call in radio.calls() {
        match call {
            RadioCall::TerminalResponse(hex) => println!("TR        {}", hex),
            RadioCall::Envelope(hex) => println!("ENVELOPE  {}", hex),
            other => println!("{:?}", other),
        }
    }
    println!("final state: {:?}", service);
    Ok(())
}
