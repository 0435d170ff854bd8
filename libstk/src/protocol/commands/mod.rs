// libstk-rs/libstk/src/protocol/commands/mod.rs

//! Proactive command parameters and their decoders.

pub mod browser;
pub mod call;
pub mod dtmf;
pub mod event_list;
pub mod fields;
pub mod input;
pub mod menu;
pub mod refresh;
pub mod text;
pub mod tone;

use std::collections::BTreeSet;

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, CommandType, Duration, EventType, IconId, ResultCode, TagId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use browser::{LaunchBrowserMode, decode_launch_browser};
pub use call::decode_set_up_call;
pub use dtmf::decode_send_dtmf;
pub use event_list::decode_set_up_event_list;
pub use input::{decode_get_inkey, decode_get_input};
pub use menu::{PresentationType, decode_select_item, decode_set_up_menu};
pub use refresh::{RefreshMode, decode_refresh};
pub use text::{decode_display_text, decode_event_notify, decode_idle_mode_text};
pub use tone::decode_play_tone;

/// One selectable entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Item identifier
    pub id: u8,
    /// Item text
    pub text: String,
    /// Record of the item's icon
    pub icon: Option<u8>,
}

/// SET UP MENU / SELECT ITEM contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Menu {
    /// Menu title
    pub title: Option<String>,
    /// Selectable entries; empty removes the menu
    pub items: Vec<Item>,
    /// Item selected by default
    pub default_item: Option<u8>,
    /// Selection through soft key preferred
    pub soft_key_preferred: bool,
    /// Help is available for the items
    pub help_available: bool,
    /// SELECT ITEM presentation hint
    pub presentation: PresentationType,
    /// Icon of the title
    pub title_icon: Option<IconId>,
    /// Item icons replace the item text
    pub items_icon_self_explanatory: bool,
}

/// Text shown to the user by DISPLAY TEXT, SET UP IDLE MODE TEXT and the
/// SEND SMS/SS/USSD notifications.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextMessage {
    /// Text to show
    pub text: Option<String>,
    /// Icon to show
    pub icon: Option<IconId>,
    /// Show even when the screen is busy
    pub high_priority: bool,
    /// Keep the text until the user clears it
    pub user_clear: bool,
    /// The card waits for an application response
    pub response_needed: bool,
    /// How long to show the text
    pub duration: Option<Duration>,
}

/// GET INKEY / GET INPUT request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Input {
    /// Prompt
    pub text: String,
    /// Text pre-filled in the entry field
    pub default_text: Option<String>,
    /// Icon of the prompt
    pub icon: Option<IconId>,
    /// Minimum answer length
    pub min_len: u8,
    /// Maximum answer length
    pub max_len: u8,
    /// Answer in UCS2
    pub ucs2: bool,
    /// Answer in packed GSM 7-bit
    pub packed: bool,
    /// Only digits, `*`, `#` and `+` allowed
    pub digit_only: bool,
    /// Show the characters as they are typed
    pub echo: bool,
    /// GET INKEY yes/no question
    pub yes_no: bool,
    /// Help is available
    pub help_available: bool,
}

/// SET UP CALL request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallSetup {
    /// Dialling number
    pub address: String,
    /// Type of number and numbering plan
    pub ton_npi: u8,
    /// Text of the user confirmation phase
    pub confirm_text: Option<String>,
    /// Text shown while the call is set up
    pub call_text: Option<String>,
    /// Icon of the confirmation phase
    pub icon: Option<IconId>,
}

/// SEND DTMF request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DtmfMessage {
    /// Digits, `P` for a pause
    pub dtmf_string: String,
    /// Text shown while the digits play
    pub alpha: Option<String>,
}

/// LAUNCH BROWSER request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrowserSettings {
    /// Empty means the browser's default URL
    pub url: String,
    /// What to do with a running browser
    pub mode: LaunchBrowserMode,
    /// Text of the user confirmation phase
    pub confirm_text: Option<String>,
}

/// PLAY TONE request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToneSettings {
    /// Text shown while the tone plays
    pub text: Option<String>,
    /// Tone code
    pub tone: Option<u8>,
    /// How long to play
    pub duration: Option<Duration>,
    /// Vibrate as well
    pub vibrate: bool,
}

/// REFRESH request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefreshParams {
    /// Kind of refresh
    pub mode: RefreshMode,
    /// File paths, each a list of file identifiers starting at MF (0x3f00)
    pub files: Vec<Vec<u16>>,
}

/// Typed parameters of one decoded proactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommandParams {
    /// SET UP MENU
    SetUpMenu {
        /// Command details
        cmd_det: CommandDetails,
        /// Menu contents
        menu: Menu,
    },
    /// SELECT ITEM
    SelectItem {
        /// Command details
        cmd_det: CommandDetails,
        /// Menu contents
        menu: Menu,
    },
    /// DISPLAY TEXT
    DisplayText {
        /// Command details
        cmd_det: CommandDetails,
        /// Text to show
        text: TextMessage,
    },
    /// SET UP IDLE MODE TEXT
    SetUpIdleModeText {
        /// Command details
        cmd_det: CommandDetails,
        /// Text to show
        text: TextMessage,
    },
    /// GET INPUT
    GetInput {
        /// Command details
        cmd_det: CommandDetails,
        /// Input request
        input: Input,
    },
    /// GET INKEY
    GetInkey {
        /// Command details
        cmd_det: CommandDetails,
        /// Input request
        input: Input,
    },
    /// SET UP CALL
    SetUpCall {
        /// Command details
        cmd_det: CommandDetails,
        /// Call to set up
        call: CallSetup,
    },
    /// SEND DTMF
    SendDtmf {
        /// Command details
        cmd_det: CommandDetails,
        /// Digits to play
        dtmf: DtmfMessage,
    },
    /// SEND SHORT MESSAGE notice
    SendSms {
        /// Command details
        cmd_det: CommandDetails,
        /// Text to show
        text: TextMessage,
    },
    /// SEND SS notice
    SendSs {
        /// Command details
        cmd_det: CommandDetails,
        /// Text to show
        text: TextMessage,
    },
    /// SEND USSD notice
    SendUssd {
        /// Command details
        cmd_det: CommandDetails,
        /// Text to show
        text: TextMessage,
    },
    /// LAUNCH BROWSER
    LaunchBrowser {
        /// Command details
        cmd_det: CommandDetails,
        /// Browser request
        browser: BrowserSettings,
    },
    /// PLAY TONE
    PlayTone {
        /// Command details
        cmd_det: CommandDetails,
        /// Tone to play
        tone: ToneSettings,
    },
    /// SET UP EVENT LIST
    SetUpEventList {
        /// Command details
        cmd_det: CommandDetails,
        /// Events to download from now on
        events: BTreeSet<EventType>,
    },
    /// REFRESH
    Refresh {
        /// Command details
        cmd_det: CommandDetails,
        /// Refresh request
        refresh: RefreshParams,
    },
}

impl CommandParams {
    /// Details of the command.
    pub fn cmd_details(&self) -> &CommandDetails {
        match self {
            Self::SetUpMenu { cmd_det, .. }
            | Self::SelectItem { cmd_det, .. }
            | Self::DisplayText { cmd_det, .. }
            | Self::SetUpIdleModeText { cmd_det, .. }
            | Self::GetInput { cmd_det, .. }
            | Self::GetInkey { cmd_det, .. }
            | Self::SetUpCall { cmd_det, .. }
            | Self::SendDtmf { cmd_det, .. }
            | Self::SendSms { cmd_det, .. }
            | Self::SendSs { cmd_det, .. }
            | Self::SendUssd { cmd_det, .. }
            | Self::LaunchBrowser { cmd_det, .. }
            | Self::PlayTone { cmd_det, .. }
            | Self::SetUpEventList { cmd_det, .. }
            | Self::Refresh { cmd_det, .. } => cmd_det,
        }
    }

    /// Type of the command.
    pub fn command_type(&self) -> CommandType {
        match self {
            Self::SetUpMenu { .. } => CommandType::SetUpMenu,
            Self::SelectItem { .. } => CommandType::SelectItem,
            Self::DisplayText { .. } => CommandType::DisplayText,
            Self::SetUpIdleModeText { .. } => CommandType::SetUpIdleModeText,
            Self::GetInput { .. } => CommandType::GetInput,
            Self::GetInkey { .. } => CommandType::GetInkey,
            Self::SetUpCall { .. } => CommandType::SetUpCall,
            Self::SendDtmf { .. } => CommandType::SendDtmf,
            Self::SendSms { .. } => CommandType::SendSms,
            Self::SendSs { .. } => CommandType::SendSs,
            Self::SendUssd { .. } => CommandType::SendUssd,
            Self::LaunchBrowser { .. } => CommandType::LaunchBrowser,
            Self::PlayTone { .. } => CommandType::PlayTone,
            Self::SetUpEventList { .. } => CommandType::SetUpEventList,
            Self::Refresh { .. } => CommandType::Refresh,
        }
    }

    /// Interpret a decoded object list as a proactive command.
    ///
    /// COMMAND DETAILS selects the variant; the per-command decoders in
    /// `protocol::commands::<name>.rs` pick out the fields they need. Any
    /// problem is reported as the `ResultCode` the terminal response must
    /// carry.
    pub fn decode(tlvs: &[ComprehensionTlv]) -> Result<Self, ResultCode> {
        let cmd_det = command_details(tlvs)?;
        let Some(kind) = cmd_det.command_type() else {
            return Err(ResultCode::CmdTypeNotUnderstood);
        };

        let params = match kind {
            CommandType::SetUpMenu => Self::SetUpMenu {
                cmd_det,
                menu: decode_set_up_menu(&cmd_det, tlvs)?,
            },
            CommandType::SelectItem => Self::SelectItem {
                cmd_det,
                menu: decode_select_item(&cmd_det, tlvs)?,
            },
            CommandType::DisplayText => Self::DisplayText {
                cmd_det,
                text: decode_display_text(&cmd_det, tlvs)?,
            },
            CommandType::SetUpIdleModeText => Self::SetUpIdleModeText {
                cmd_det,
                text: decode_idle_mode_text(&cmd_det, tlvs)?,
            },
            CommandType::GetInput => Self::GetInput {
                cmd_det,
                input: decode_get_input(&cmd_det, tlvs)?,
            },
            CommandType::GetInkey => Self::GetInkey {
                cmd_det,
                input: decode_get_inkey(&cmd_det, tlvs)?,
            },
            CommandType::SetUpCall => Self::SetUpCall {
                cmd_det,
                call: decode_set_up_call(&cmd_det, tlvs)?,
            },
            CommandType::SendDtmf => Self::SendDtmf {
                cmd_det,
                dtmf: decode_send_dtmf(&cmd_det, tlvs)?,
            },
            CommandType::SendSms => Self::SendSms {
                cmd_det,
                text: decode_event_notify(&cmd_det, tlvs)?,
            },
            CommandType::SendSs => Self::SendSs {
                cmd_det,
                text: decode_event_notify(&cmd_det, tlvs)?,
            },
            CommandType::SendUssd => Self::SendUssd {
                cmd_det,
                text: decode_event_notify(&cmd_det, tlvs)?,
            },
            CommandType::LaunchBrowser => Self::LaunchBrowser {
                cmd_det,
                browser: decode_launch_browser(&cmd_det, tlvs)?,
            },
            CommandType::PlayTone => Self::PlayTone {
                cmd_det,
                tone: decode_play_tone(&cmd_det, tlvs)?,
            },
            CommandType::SetUpEventList => Self::SetUpEventList {
                cmd_det,
                events: decode_set_up_event_list(&cmd_det, tlvs)?,
            },
            CommandType::Refresh => Self::Refresh {
                cmd_det,
                refresh: decode_refresh(&cmd_det, tlvs)?,
            },
        };
        Ok(params)
    }
}

/// Extract COMMAND DETAILS from an object list. It is mandatory in every
/// proactive command.
pub fn command_details(tlvs: &[ComprehensionTlv]) -> Result<CommandDetails, ResultCode> {
    let ctlv = tlv::find(tlvs, TagId::COMMAND_DETAILS).ok_or(ResultCode::RequiredValuesMissing)?;
    fields::command_details(ctlv)
}
