// libstk-rs/libstk/src/protocol/commands/event_list.rs

//! SET UP EVENT LIST.

use std::collections::BTreeSet;

use crate::protocol::tlv::ComprehensionTlv;
use crate::types::{CommandDetails, EventType, ResultCode, TagId};

use super::fields;

/// SET UP EVENT LIST. An empty list removes every registered event.
/// Unsupported codes are kept as [`EventType::Other`] so that the service
/// can refuse the command as a whole.
pub fn decode_set_up_event_list(
    _cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<BTreeSet<EventType>, ResultCode> {
    let list = fields::required(tlvs, TagId::EVENT_LIST)?;
    Ok(list.value.iter().copied().map(EventType::from_u8).collect())
}
