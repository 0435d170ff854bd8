// libstk-rs/libstk/src/protocol/commands/tone.rs

//! PLAY TONE.

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, ResultCode, TagId};

use super::{ToneSettings, fields};

/// PLAY TONE. Every object is optional.
pub fn decode_play_tone(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<ToneSettings, ResultCode> {
    let tone = match tlv::find(tlvs, TagId::TONE) {
        Some(ctlv) => Some(
            *ctlv
                .value
                .first()
                .ok_or(ResultCode::CmdDataNotUnderstood)?,
        ),
        None => None,
    };
    let duration = match tlv::find(tlvs, TagId::DURATION) {
        Some(ctlv) => Some(fields::duration(ctlv)?),
        None => None,
    };
    Ok(ToneSettings {
        text: tlv::find(tlvs, TagId::ALPHA_ID).map(fields::alpha_id),
        tone,
        duration,
        vibrate: cmd_det.command_qualifier & 0x01 != 0,
    })
}
