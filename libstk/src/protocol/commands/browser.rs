// libstk-rs/libstk/src/protocol/commands/browser.rs

//! LAUNCH BROWSER.

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, ResultCode, TagId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{BrowserSettings, fields};

/// How LAUNCH BROWSER treats an already running browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LaunchBrowserMode {
    /// 0x00: launch if not already launched
    LaunchIfNotAlreadyLaunched,
    /// 0x02: use the existing browser
    UseExistingBrowser,
    /// 0x03: close the existing browser and launch a new one
    LaunchNewBrowser,
}

impl LaunchBrowserMode {
    /// Mode for a LAUNCH BROWSER qualifier; reserved values give `None`.
    pub fn from_qualifier(qualifier: u8) -> Option<Self> {
        match qualifier {
            0x00 => Some(Self::LaunchIfNotAlreadyLaunched),
            0x02 => Some(Self::UseExistingBrowser),
            0x03 => Some(Self::LaunchNewBrowser),
            _ => None,
        }
    }
}

/// LAUNCH BROWSER. An empty URL means the browser's default page.
pub fn decode_launch_browser(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<BrowserSettings, ResultCode> {
    let mode = LaunchBrowserMode::from_qualifier(cmd_det.command_qualifier)
        .ok_or(ResultCode::CmdTypeNotUnderstood)?;
    let url = fields::required(tlvs, TagId::URL)?;
    Ok(BrowserSettings {
        url: crate::utils::gsm::septets_to_string(&url.value),
        mode,
        confirm_text: tlv::find(tlvs, TagId::ALPHA_ID).map(fields::alpha_id),
    })
}
