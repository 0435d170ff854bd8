// libstk-rs/libstk/src/protocol/commands/fields.rs

//! Decoders for the simple data objects shared by several proactive
//! commands. Each returns the `ResultCode` to report when the object is
//! present but unusable.

use crate::constants::{DCS_GSM_7BIT_PACKED, DCS_GSM_8BIT, DCS_UCS2};
use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, Duration, IconId, ResultCode, TagId, TimeUnit};
use crate::utils::gsm;

use super::Item;

/// Find a mandatory object.
pub fn required(tlvs: &[ComprehensionTlv], tag: TagId) -> Result<&ComprehensionTlv, ResultCode> {
    tlv::find(tlvs, tag).ok_or(ResultCode::RequiredValuesMissing)
}

/// COMMAND DETAILS: [number, type, qualifier]
pub fn command_details(ctlv: &ComprehensionTlv) -> Result<CommandDetails, ResultCode> {
    match ctlv.value.as_slice() {
        [number, kind, qualifier, ..] => Ok(CommandDetails {
            command_number: *number,
            type_of_command: *kind,
            command_qualifier: *qualifier,
            comprehension_required: ctlv.comprehension_required,
        }),
        _ => Err(ResultCode::CmdDataNotUnderstood),
    }
}

/// TEXT STRING: [dcs, text...]. A zero-length object is a null text.
pub fn text_string(ctlv: &ComprehensionTlv) -> Result<Option<String>, ResultCode> {
    let Some((&dcs, body)) = ctlv.value.split_first() else {
        return Ok(None);
    };
    // Only the character set bits (bits 2-3) matter once message class and
    // compression flags are masked off.
    match dcs & 0x0c {
        DCS_GSM_7BIT_PACKED => Ok(Some(gsm::gsm7_packed_to_string(body))),
        DCS_GSM_8BIT => Ok(Some(gsm::septets_to_string(body))),
        DCS_UCS2 => Ok(Some(gsm::ucs2_to_string(body))),
        _ => Err(ResultCode::CmdDataNotUnderstood),
    }
}

/// ALPHA IDENTIFIER in SIM alpha format.
pub fn alpha_id(ctlv: &ComprehensionTlv) -> String {
    gsm::alpha_id_to_string(&ctlv.value)
}

/// ICON IDENTIFIER: [qualifier, record number]
pub fn icon_id(ctlv: &ComprehensionTlv) -> Result<IconId, ResultCode> {
    match ctlv.value.as_slice() {
        [qualifier, record, ..] => Ok(IconId {
            record_number: *record,
            self_explanatory: qualifier & 0x01 == 0,
        }),
        _ => Err(ResultCode::CmdDataNotUnderstood),
    }
}

/// ITEM ICON IDENTIFIER LIST: [qualifier, record...]
pub fn item_icon_list(ctlv: &ComprehensionTlv) -> Result<(bool, Vec<u8>), ResultCode> {
    match ctlv.value.split_first() {
        Some((qualifier, records)) => Ok((qualifier & 0x01 == 0, records.to_vec())),
        None => Err(ResultCode::CmdDataNotUnderstood),
    }
}

/// DURATION: [unit, interval]. An interval of zero is reserved.
pub fn duration(ctlv: &ComprehensionTlv) -> Result<Duration, ResultCode> {
    match ctlv.value.as_slice() {
        [unit, interval, ..] if *interval != 0 => Ok(Duration {
            unit: TimeUnit::from_u8(*unit).ok_or(ResultCode::CmdDataNotUnderstood)?,
            interval: *interval,
        }),
        _ => Err(ResultCode::CmdDataNotUnderstood),
    }
}

/// ITEM: [id, text...]. A zero-length object is the null item.
pub fn item(ctlv: &ComprehensionTlv) -> Option<Item> {
    let (&id, text) = ctlv.value.split_first()?;
    Some(Item {
        id,
        text: gsm::alpha_id_to_string(text),
        icon: None,
    })
}

/// Swapped-nibble BCD digits as used by ADDRESS and DTMF STRING objects.
/// 0xf is filler and ends the string.
pub fn bcd_digits(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        for nibble in [b & 0x0f, b >> 4] {
            match nibble {
                0x0..=0x9 => out.push((b'0' + nibble) as char),
                0xa => out.push('*'),
                0xb => out.push('#'),
                0xc => out.push(crate::constants::DTMF_PAUSE_CHAR),
                0xd => out.push('?'),
                0xe => out.push('e'),
                _ => return out,
            }
        }
    }
    out
}
