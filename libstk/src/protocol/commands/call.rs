// libstk-rs/libstk/src/protocol/commands/call.rs

//! SET UP CALL.

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, ResultCode, TagId};

use super::{CallSetup, fields};

/// Highest SET UP CALL qualifier defined (redial variants included).
const MAX_CALL_QUALIFIER: u8 = 0x05;

/// SET UP CALL. The first ALPHA IDENTIFIER is the user confirmation
/// prompt, the second one is shown while the call is being set up.
pub fn decode_set_up_call(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<CallSetup, ResultCode> {
    if cmd_det.command_qualifier > MAX_CALL_QUALIFIER {
        return Err(ResultCode::CmdTypeNotUnderstood);
    }

    let address = fields::required(tlvs, TagId::ADDRESS)?;
    let (&ton_npi, digits) = address
        .value
        .split_first()
        .ok_or(ResultCode::CmdDataNotUnderstood)?;

    let mut alphas = tlv::find_all(tlvs, TagId::ALPHA_ID).map(fields::alpha_id);
    let confirm_text = alphas.next();
    let call_text = alphas.next();

    let icon = match tlv::find(tlvs, TagId::ICON_ID) {
        Some(ctlv) => Some(fields::icon_id(ctlv)?),
        None => None,
    };

    Ok(CallSetup {
        address: fields::bcd_digits(digits),
        ton_npi,
        confirm_text,
        call_text,
        icon,
    })
}
