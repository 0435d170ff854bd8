// libstk-rs/libstk/src/protocol/responses/terminal.rs

//! TERMINAL RESPONSE encoding.

use crate::error::DecodeError;
use crate::protocol::tlv::{self, ComprehensionTlv, write_tlv};
use crate::types::{CommandDetails, ResultCode, TagId};

use super::{DeviceIdentities, ResponseData};

/// Encode a TERMINAL RESPONSE routed terminal -> UICC.
///
/// Layout: COMMAND DETAILS (echoing the inbound comprehension-required
/// flag), DEVICE IDENTITIES, RESULT (general result plus optional
/// additional information byte), then the command-specific data.
pub fn encode_terminal_response(
    cmd_det: &CommandDetails,
    result_code: ResultCode,
    additional_info: Option<u8>,
    response_data: Option<&dyn ResponseData>,
) -> Vec<u8> {
    encode_terminal_response_with(
        DeviceIdentities::terminal_to_uicc(),
        cmd_det,
        result_code,
        additional_info,
        response_data,
    )
}

/// As [`encode_terminal_response`] with explicit device identities.
pub fn encode_terminal_response_with(
    devices: DeviceIdentities,
    cmd_det: &CommandDetails,
    result_code: ResultCode,
    additional_info: Option<u8>,
    response_data: Option<&dyn ResponseData>,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16);

    write_tlv(
        &mut buf,
        TagId::COMMAND_DETAILS,
        cmd_det.comprehension_required,
        &[
            cmd_det.command_number,
            cmd_det.type_of_command,
            cmd_det.command_qualifier,
        ],
    );
    devices.encode_into(&mut buf);

    let mut result = vec![result_code.value()];
    result.extend(additional_info);
    write_tlv(&mut buf, TagId::RESULT, true, &result);

    if let Some(data) = response_data {
        data.format(&mut buf);
    }
    buf
}

/// Decoded view of a terminal response, used to inspect what the engine
/// sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalResponse {
    /// Echoed command details
    pub cmd_details: CommandDetails,
    /// Routing
    pub devices: DeviceIdentities,
    /// General result
    pub result_code: ResultCode,
    /// Additional information byte, if any
    pub additional_info: Option<u8>,
    /// Objects following RESULT
    pub data: Vec<ComprehensionTlv>,
}

impl TerminalResponse {
    /// Decode an encoded terminal response.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let objects = tlv::decode_many(bytes)?;
        let mut it = objects.into_iter();

        let cmd = expect(it.next(), TagId::COMMAND_DETAILS)?;
        let cmd_details = match cmd.value.as_slice() {
            [number, kind, qualifier] => CommandDetails {
                command_number: *number,
                type_of_command: *kind,
                command_qualifier: *qualifier,
                comprehension_required: cmd.comprehension_required,
            },
            _ => return Err(DecodeError::Malformed("command details length")),
        };

        let dev = expect(it.next(), TagId::DEVICE_IDENTITIES)?;
        let devices = match dev.value.as_slice() {
            [source, destination] => DeviceIdentities::new(*source, *destination),
            _ => return Err(DecodeError::Malformed("device identities length")),
        };

        let res = expect(it.next(), TagId::RESULT)?;
        let (result_code, additional_info) = match res.value.as_slice() {
            [code] => (*code, None),
            [code, info] => (*code, Some(*info)),
            _ => return Err(DecodeError::Malformed("result length")),
        };
        let result_code =
            ResultCode::from_u8(result_code).ok_or(DecodeError::Malformed("unknown result"))?;

        Ok(Self {
            cmd_details,
            devices,
            result_code,
            additional_info,
            data: it.collect(),
        })
    }
}

fn expect(obj: Option<ComprehensionTlv>, tag: TagId) -> Result<ComprehensionTlv, DecodeError> {
    match obj {
        Some(o) if o.tag == tag => Ok(o),
        Some(_) => Err(DecodeError::Malformed("unexpected object order")),
        None => Err(DecodeError::Truncated {
            needed: 1,
            available: 0,
        }),
    }
}
