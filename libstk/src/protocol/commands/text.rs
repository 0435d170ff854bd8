// libstk-rs/libstk/src/protocol/commands/text.rs

//! DISPLAY TEXT, SET UP IDLE MODE TEXT and the SEND SMS/SS/USSD notices.

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, ResultCode, TagId};

use super::{TextMessage, fields};

/// DISPLAY TEXT
pub fn decode_display_text(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<TextMessage, ResultCode> {
    let text = fields::text_string(fields::required(tlvs, TagId::TEXT_STRING)?)?
        .ok_or(ResultCode::CmdDataNotUnderstood)?;

    let mut msg = TextMessage {
        text: Some(text),
        high_priority: cmd_det.command_qualifier & 0x01 != 0,
        user_clear: cmd_det.command_qualifier & 0x80 != 0,
        response_needed: tlv::find(tlvs, TagId::IMMEDIATE_RESPONSE).is_none(),
        ..TextMessage::default()
    };
    if let Some(ctlv) = tlv::find(tlvs, TagId::DURATION) {
        msg.duration = Some(fields::duration(ctlv)?);
    }
    if let Some(ctlv) = tlv::find(tlvs, TagId::ICON_ID) {
        msg.icon = Some(fields::icon_id(ctlv)?);
    }
    Ok(msg)
}

/// SET UP IDLE MODE TEXT. A null text string removes the idle text.
pub fn decode_idle_mode_text(
    _cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<TextMessage, ResultCode> {
    let mut msg = TextMessage {
        text: fields::text_string(fields::required(tlvs, TagId::TEXT_STRING)?)?,
        ..TextMessage::default()
    };
    if let Some(ctlv) = tlv::find(tlvs, TagId::ICON_ID) {
        msg.icon = Some(fields::icon_id(ctlv)?);
    }
    Ok(msg)
}

/// SEND SMS / SEND SS / SEND USSD: only the user notification is
/// interpreted; the terminal does the sending.
pub fn decode_event_notify(
    _cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<TextMessage, ResultCode> {
    let mut msg = TextMessage {
        text: tlv::find(tlvs, TagId::ALPHA_ID).map(fields::alpha_id),
        ..TextMessage::default()
    };
    if let Some(ctlv) = tlv::find(tlvs, TagId::ICON_ID) {
        msg.icon = Some(fields::icon_id(ctlv)?);
    }
    Ok(msg)
}
