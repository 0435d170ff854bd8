// libstk-rs/libstk/src/protocol/commands/input.rs

//! GET INKEY and GET INPUT.

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, ResultCode, TagId};

use super::{Input, fields};

const Q_ALPHABET: u8 = 0x01;
const Q_UCS2: u8 = 0x02;
const Q_YES_NO: u8 = 0x04; // GET INKEY
const Q_HIDE_INPUT: u8 = 0x04; // GET INPUT
const Q_PACKED: u8 = 0x08;
const Q_HELP: u8 = 0x80;

fn prompt(tlvs: &[ComprehensionTlv]) -> Result<String, ResultCode> {
    let text = fields::text_string(fields::required(tlvs, TagId::TEXT_STRING)?)?;
    Ok(text.unwrap_or_default())
}

/// GET INKEY: a single key press, or a yes/no answer.
pub fn decode_get_inkey(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<Input, ResultCode> {
    let q = cmd_det.command_qualifier;
    let mut input = Input {
        text: prompt(tlvs)?,
        default_text: None,
        icon: None,
        min_len: 1,
        max_len: 1,
        ucs2: q & Q_UCS2 != 0,
        packed: false,
        digit_only: q & Q_ALPHABET == 0,
        echo: true,
        yes_no: q & Q_YES_NO != 0,
        help_available: q & Q_HELP != 0,
    };
    if let Some(ctlv) = tlv::find(tlvs, TagId::ICON_ID) {
        input.icon = Some(fields::icon_id(ctlv)?);
    }
    Ok(input)
}

/// GET INPUT: a string whose length bounds come from RESPONSE LENGTH.
pub fn decode_get_input(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<Input, ResultCode> {
    let q = cmd_det.command_qualifier;
    let text = prompt(tlvs)?;

    let (min_len, max_len) = match fields::required(tlvs, TagId::RESPONSE_LENGTH)?
        .value
        .as_slice()
    {
        [min, max, ..] if min <= max => (*min, *max),
        _ => return Err(ResultCode::CmdDataNotUnderstood),
    };

    let default_text = match tlv::find(tlvs, TagId::DEFAULT_TEXT) {
        Some(ctlv) => fields::text_string(ctlv)?,
        None => None,
    };

    let mut input = Input {
        text,
        default_text,
        icon: None,
        min_len,
        max_len,
        ucs2: q & Q_UCS2 != 0,
        packed: q & Q_PACKED != 0,
        digit_only: q & Q_ALPHABET == 0,
        echo: q & Q_HIDE_INPUT == 0,
        yes_no: false,
        help_available: q & Q_HELP != 0,
    };
    if let Some(ctlv) = tlv::find(tlvs, TagId::ICON_ID) {
        input.icon = Some(fields::icon_id(ctlv)?);
    }
    Ok(input)
}
