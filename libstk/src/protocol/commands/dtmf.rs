// libstk-rs/libstk/src/protocol/commands/dtmf.rs

//! SEND DTMF.

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, ResultCode, TagId};

use super::{DtmfMessage, fields};

/// SEND DTMF. Digits come from the DTMF STRING object; basebands that
/// deliver them in an ADDRESS object (TON/NPI byte first) are accepted too.
pub fn decode_send_dtmf(
    _cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<DtmfMessage, ResultCode> {
    let dtmf_string = if let Some(ctlv) = tlv::find(tlvs, TagId::DTMF) {
        fields::bcd_digits(&ctlv.value)
    } else if let Some(ctlv) = tlv::find(tlvs, TagId::ADDRESS) {
        fields::bcd_digits(ctlv.value.get(1..).unwrap_or_default())
    } else {
        return Err(ResultCode::RequiredValuesMissing);
    };

    if dtmf_string.is_empty() {
        return Err(ResultCode::CmdDataNotUnderstood);
    }

    Ok(DtmfMessage {
        dtmf_string,
        alpha: tlv::find(tlvs, TagId::ALPHA_ID).map(fields::alpha_id),
    })
}
