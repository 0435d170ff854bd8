// libstk-rs/libstk/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize mock service setup and proactive command
//! construction so tests across the crate and tests/ directory can reuse
//! the same logic.
#![allow(dead_code)]

use crate::config::ServiceConfig;
use crate::constants::{BER_PROACTIVE_COMMAND_TAG, DEV_ID_TERMINAL, DEV_ID_UICC};
use crate::protocol::ber::EnvelopeBuilder;
use crate::protocol::tlv::write_tlv;
use crate::service::{ManualScheduler, StkService, StkServiceBuilder};
use crate::transport::{MockRadio, RecordingListener};
use crate::utils::bytes_to_hex;
use crate::{CommandDetails, Result, TagId};

/// A service wired to mocks, plus the handles that observe them.
#[doc(hidden)]
pub struct MockSetup {
    /// Service under test
    pub service: StkService,
    /// Radio the service talks to
    pub radio: MockRadio,
    /// Listener the service notifies
    pub listener: RecordingListener,
    /// Scheduler holding DTMF continuations
    pub scheduler: ManualScheduler,
}

/// Build a service backed by a [`MockRadio`], a [`RecordingListener`] and
/// a [`ManualScheduler`]. The returned handles share state with the ones
/// the service owns.
#[doc(hidden)]
pub fn mock_service(config: ServiceConfig) -> Result<MockSetup> {
    let radio = MockRadio::new();
    let listener = RecordingListener::new();
    let scheduler = ManualScheduler::new();
    let service = StkServiceBuilder::new()
        .with_config(config)
        .with_radio(Box::new(radio.clone()))
        .with_listener(Box::new(listener.clone()))
        .with_scheduler(Box::new(scheduler.clone()))
        .build()?;
    Ok(MockSetup {
        service,
        radio,
        listener,
        scheduler,
    })
}

/// Encode a PROACTIVE COMMAND: command details, UICC -> terminal device
/// identities, then `objects` as (tag, comprehension required, value).
#[doc(hidden)]
pub fn proactive_command(cmd_det: &CommandDetails, objects: &[(TagId, bool, &[u8])]) -> Vec<u8> {
    let mut builder = EnvelopeBuilder::new(BER_PROACTIVE_COMMAND_TAG);
    let buf = builder.buffer();
    write_tlv(
        buf,
        TagId::COMMAND_DETAILS,
        cmd_det.comprehension_required,
        &[
            cmd_det.command_number,
            cmd_det.type_of_command,
            cmd_det.command_qualifier,
        ],
    );
    write_tlv(buf, TagId::DEVICE_IDENTITIES, true, &[DEV_ID_UICC, DEV_ID_TERMINAL]);
    for (tag, cr, value) in objects {
        write_tlv(buf, *tag, *cr, value);
    }
    builder.finish()
}

/// [`proactive_command`] as the hex string the radio delivers.
#[doc(hidden)]
pub fn proactive_hex(cmd_det: &CommandDetails, objects: &[(TagId, bool, &[u8])]) -> String {
    bytes_to_hex(&proactive_command(cmd_det, objects))
}

/// ITEM object value: identifier followed by GSM 8-bit text.
#[doc(hidden)]
pub fn item_value(id: u8, text: &str) -> Vec<u8> {
    let mut value = vec![id];
    value.extend_from_slice(text.as_bytes());
    value
}
