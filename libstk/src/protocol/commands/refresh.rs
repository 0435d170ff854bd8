// libstk-rs/libstk/src/protocol/commands/refresh.rs

//! REFRESH.

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, ResultCode, TagId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::RefreshParams;

/// REFRESH qualifier values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RefreshMode {
    /// 0x00: NAA initialization and full file change notification
    InitAndFullFileChange,
    /// 0x01: file change notification
    FileChange,
    /// 0x02: NAA initialization and file change notification
    InitAndFileChange,
    /// 0x03: NAA initialization
    Init,
    /// 0x04: UICC reset
    Reset,
    /// 0x05: NAA application reset
    NaaApplicationReset,
    /// 0x06: NAA session reset
    NaaSessionReset,
}

impl RefreshMode {
    /// Mode for a REFRESH qualifier; values above 0x06 give `None`.
    pub fn from_qualifier(qualifier: u8) -> Option<Self> {
        match qualifier {
            0x00 => Some(Self::InitAndFullFileChange),
            0x01 => Some(Self::FileChange),
            0x02 => Some(Self::InitAndFileChange),
            0x03 => Some(Self::Init),
            0x04 => Some(Self::Reset),
            0x05 => Some(Self::NaaApplicationReset),
            0x06 => Some(Self::NaaSessionReset),
            _ => None,
        }
    }
}

const MF: u16 = 0x3f00;

/// REFRESH. FILE LIST is `[count, path...]` where every path starts at MF.
pub fn decode_refresh(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<RefreshParams, ResultCode> {
    let mode = RefreshMode::from_qualifier(cmd_det.command_qualifier)
        .ok_or(ResultCode::CmdTypeNotUnderstood)?;

    let files = match tlv::find(tlvs, TagId::FILE_LIST) {
        Some(ctlv) => file_paths(&ctlv.value)?,
        None => Vec::new(),
    };
    Ok(RefreshParams { mode, files })
}

fn file_paths(value: &[u8]) -> Result<Vec<Vec<u16>>, ResultCode> {
    let Some((&count, ids)) = value.split_first() else {
        return Err(ResultCode::CmdDataNotUnderstood);
    };
    if ids.len() % 2 != 0 {
        return Err(ResultCode::CmdDataNotUnderstood);
    }

    let mut paths: Vec<Vec<u16>> = Vec::new();
    for pair in ids.chunks_exact(2) {
        let fid = u16::from_be_bytes([pair[0], pair[1]]);
        if fid == MF {
            paths.push(vec![fid]);
        } else if let Some(path) = paths.last_mut() {
            path.push(fid);
        } else {
            // path not starting at MF
            return Err(ResultCode::CmdDataNotUnderstood);
        }
    }
    if paths.len() != count as usize {
        return Err(ResultCode::CmdDataNotUnderstood);
    }
    Ok(paths)
}
