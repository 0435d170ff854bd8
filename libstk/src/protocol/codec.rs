// libstk-rs/libstk/src/protocol/codec.rs

//! Proactive command decoding entry points.

use thiserror::Error;

use crate::error::DecodeError;
use crate::types::{CommandDetails, ResultCode, TagId};

use super::ber::BerTlv;
use super::commands::{self, CommandParams, fields};
use super::tlv::{ComprehensionTlv, TagRegistry};

/// Decode the BER-TLV container of a proactive command into its
/// COMPREHENSION-TLV objects.
pub fn decode_proactive_command(bytes: &[u8]) -> Result<Vec<ComprehensionTlv>, DecodeError> {
    decode_proactive_command_with(bytes, &TagRegistry::default())
}

/// As [`decode_proactive_command`] with an explicit tag registry.
pub fn decode_proactive_command_with(
    bytes: &[u8],
    registry: &TagRegistry,
) -> Result<Vec<ComprehensionTlv>, DecodeError> {
    BerTlv::decode(bytes, registry).map(|ber| ber.objects)
}

/// A proactive command that could not be turned into [`CommandParams`].
///
/// `cmd_details` is set whenever the COMMAND DETAILS object was readable,
/// which is what the terminal response needs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("proactive command rejected with {code:?}")]
pub struct CommandDecodeError {
    /// COMMAND DETAILS, when readable
    pub cmd_details: Option<CommandDetails>,
    /// Result to answer the command with
    pub code: ResultCode,
}

/// Decode a raw proactive command all the way to typed parameters.
pub fn decode_command(
    bytes: &[u8],
    registry: &TagRegistry,
) -> Result<CommandParams, CommandDecodeError> {
    match decode_proactive_command_with(bytes, registry) {
        Ok(tlvs) => CommandParams::decode(&tlvs).map_err(|code| CommandDecodeError {
            cmd_details: commands::command_details(&tlvs).ok(),
            code,
        }),
        Err(err) => Err(CommandDecodeError {
            cmd_details: recover_command_details(bytes, registry),
            code: err.into(),
        }),
    }
}

/// Best effort: read the first object of a container that failed to
/// decode, hoping it is COMMAND DETAILS.
pub fn recover_command_details(bytes: &[u8], registry: &TagRegistry) -> Option<CommandDetails> {
    let body = BerTlv::body_lenient(bytes)?;
    let (first, _) = registry.decode(body, 0).ok()?;
    if first.tag != TagId::COMMAND_DETAILS {
        return None;
    }
    fields::command_details(&first).ok()
}
