// libstk-rs/libstk/src/types.rs

//! Value types shared by the codec and the service: tags, command details,
//! command types, result codes and events.

use derive_more::{Display, From, Into};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// COMPREHENSION-TLV tag value with the comprehension-required bit stripped.
///
/// Kept as a raw number rather than a closed enum so that vendor tags can be
/// carried through the codec; see [`crate::protocol::tlv::TagRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[display(fmt = "{:#04x}", _0)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagId(u16);

impl TagId {
    /// COMMAND DETAILS
    pub const COMMAND_DETAILS: Self = Self(0x01);
    /// DEVICE IDENTITIES
    pub const DEVICE_IDENTITIES: Self = Self(0x02);
    /// RESULT
    pub const RESULT: Self = Self(0x03);
    /// DURATION
    pub const DURATION: Self = Self(0x04);
    /// ALPHA IDENTIFIER
    pub const ALPHA_ID: Self = Self(0x05);
    /// ADDRESS (TON/NPI + BCD dialling number)
    pub const ADDRESS: Self = Self(0x06);
    /// USSD STRING
    pub const USSD_STRING: Self = Self(0x0a);
    /// TEXT STRING (DCS byte + text)
    pub const TEXT_STRING: Self = Self(0x0d);
    /// TONE
    pub const TONE: Self = Self(0x0e);
    /// ITEM (identifier + text)
    pub const ITEM: Self = Self(0x0f);
    /// ITEM IDENTIFIER
    pub const ITEM_ID: Self = Self(0x10);
    /// RESPONSE LENGTH (min, max)
    pub const RESPONSE_LENGTH: Self = Self(0x11);
    /// FILE LIST
    pub const FILE_LIST: Self = Self(0x12);
    /// HELP REQUEST
    pub const HELP_REQUEST: Self = Self(0x15);
    /// DEFAULT TEXT
    pub const DEFAULT_TEXT: Self = Self(0x17);
    /// EVENT LIST
    pub const EVENT_LIST: Self = Self(0x19);
    /// ICON IDENTIFIER
    pub const ICON_ID: Self = Self(0x1e);
    /// ITEM ICON IDENTIFIER LIST
    pub const ITEM_ICON_ID_LIST: Self = Self(0x1f);
    /// IMMEDIATE RESPONSE
    pub const IMMEDIATE_RESPONSE: Self = Self(0x2b);
    /// DTMF STRING (vendor tag delivered by some basebands)
    pub const DTMF: Self = Self(0x2c);
    /// LANGUAGE
    pub const LANGUAGE: Self = Self(0x2d);
    /// URL
    pub const URL: Self = Self(0x31);
    /// BROWSER TERMINATION CAUSE
    pub const BROWSER_TERMINATION_CAUSE: Self = Self(0x34);
    /// TEXT ATTRIBUTE
    pub const TEXT_ATTRIBUTE: Self = Self(0x50);

    /// Wrap a raw tag value (CR bit already stripped).
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Raw tag value.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Single tag byte for encoding. Only valid for tags below 0x7f, which
    /// covers every tag this crate emits.
    pub fn as_u8(&self) -> u8 {
        (self.0 & 0x7f) as u8
    }
}

/// Identifies which proactive command follows in a COMMAND DETAILS object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommandDetails {
    /// Number the card assigned to this command
    pub command_number: u8,
    /// Raw command type byte, see [`CommandType`]
    pub type_of_command: u8,
    /// Command-specific qualifier bits
    pub command_qualifier: u8,
    /// CR flag of the COMMAND DETAILS tag, echoed in the answer
    pub comprehension_required: bool,
}

impl CommandDetails {
    /// Details with the CR flag set, as cards send them.
    pub fn new(command_number: u8, command_type: CommandType, command_qualifier: u8) -> Self {
        Self {
            command_number,
            type_of_command: command_type.value(),
            command_qualifier,
            comprehension_required: true,
        }
    }

    /// Typed command, or `None` for types the engine does not support.
    pub fn command_type(&self) -> Option<CommandType> {
        CommandType::from_u8(self.type_of_command)
    }

    /// Whether a response carrying `other` belongs to the command described
    /// by `self`. Number, type and qualifier must agree; the
    /// comprehension-required flag is not part of the identity.
    pub fn matches(&self, other: &CommandDetails) -> bool {
        self.command_number == other.command_number
            && self.type_of_command == other.type_of_command
            && self.command_qualifier == other.command_qualifier
    }
}

/// Proactive command types handled by the engine.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommandType {
    /// REFRESH
    #[display(fmt = "REFRESH")]
    Refresh = 0x01,
    /// SET UP EVENT LIST
    #[display(fmt = "SET_UP_EVENT_LIST")]
    SetUpEventList = 0x05,
    /// SET UP CALL
    #[display(fmt = "SET_UP_CALL")]
    SetUpCall = 0x10,
    /// SEND SS
    #[display(fmt = "SEND_SS")]
    SendSs = 0x11,
    /// SEND USSD
    #[display(fmt = "SEND_USSD")]
    SendUssd = 0x12,
    /// SEND SHORT MESSAGE
    #[display(fmt = "SEND_SMS")]
    SendSms = 0x13,
    /// SEND DTMF
    #[display(fmt = "SEND_DTMF")]
    SendDtmf = 0x14,
    /// LAUNCH BROWSER
    #[display(fmt = "LAUNCH_BROWSER")]
    LaunchBrowser = 0x15,
    /// PLAY TONE
    #[display(fmt = "PLAY_TONE")]
    PlayTone = 0x20,
    /// DISPLAY TEXT
    #[display(fmt = "DISPLAY_TEXT")]
    DisplayText = 0x21,
    /// GET INKEY
    #[display(fmt = "GET_INKEY")]
    GetInkey = 0x22,
    /// GET INPUT
    #[display(fmt = "GET_INPUT")]
    GetInput = 0x23,
    /// SELECT ITEM
    #[display(fmt = "SELECT_ITEM")]
    SelectItem = 0x24,
    /// SET UP MENU
    #[display(fmt = "SET_UP_MENU")]
    SetUpMenu = 0x25,
    /// SET UP IDLE MODE TEXT
    #[display(fmt = "SET_UP_IDLE_MODE_TEXT")]
    SetUpIdleModeText = 0x28,
}

impl CommandType {
    /// Decode a command type byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Refresh),
            0x05 => Some(Self::SetUpEventList),
            0x10 => Some(Self::SetUpCall),
            0x11 => Some(Self::SendSs),
            0x12 => Some(Self::SendUssd),
            0x13 => Some(Self::SendSms),
            0x14 => Some(Self::SendDtmf),
            0x15 => Some(Self::LaunchBrowser),
            0x20 => Some(Self::PlayTone),
            0x21 => Some(Self::DisplayText),
            0x22 => Some(Self::GetInkey),
            0x23 => Some(Self::GetInput),
            0x24 => Some(Self::SelectItem),
            0x25 => Some(Self::SetUpMenu),
            0x28 => Some(Self::SetUpIdleModeText),
            _ => None,
        }
    }

    /// Command type byte.
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

/// General result values of a TERMINAL RESPONSE (ETSI TS 102 223, 8.12).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResultCode {
    /// Command performed successfully
    Ok = 0x00,
    /// Performed with partial comprehension
    PrfrmdWithPartialComprehension = 0x01,
    /// Performed, with missing information
    PrfrmdWithMissingInfo = 0x02,
    /// REFRESH performed with additional EFs read
    PrfrmdWithAdditionalEfsRead = 0x03,
    /// Performed successfully, but requested icon could not be displayed
    PrfrmdIconNotDisplayed = 0x04,
    /// Performed, but modified by call control by NAA
    PrfrmdModifiedByNaa = 0x05,
    /// Performed successfully, limited service
    PrfrmdLimitedService = 0x06,
    /// Performed with modification
    PrfrmdWithModification = 0x07,
    /// REFRESH performed but indicated NAA was not active
    PrfrmdNaaNotActive = 0x08,
    /// Performed successfully, tone not played
    PrfrmdToneNotPlayed = 0x09,
    /// Proactive UICC session terminated by the user
    UiccSessionTermByUser = 0x10,
    /// Backward move in the proactive UICC session requested by the user
    BackwardMoveByUser = 0x11,
    /// No response from user
    NoResponseFromUser = 0x12,
    /// Help information required by the user
    HelpInfoRequired = 0x13,
    /// USSD or SS transaction terminated by the user
    UssdSsSessionTermByUser = 0x14,
    /// Terminal currently unable to process command
    TerminalCrntlyUnableToProcess = 0x20,
    /// Network currently unable to process command
    NetworkCrntlyUnableToProcess = 0x21,
    /// User did not accept the proactive command
    UserNotAccept = 0x22,
    /// User cleared down call before connection or network release
    UserClearDownCall = 0x23,
    /// Action in contradiction with the current timer state
    ContradictionWithTimer = 0x24,
    /// Interaction with call control by NAA, temporary problem
    NaaCallControlTemporary = 0x25,
    /// Launch browser generic error
    LaunchBrowserError = 0x26,
    /// MMS temporary problem
    MmsTemporary = 0x27,
    /// Command beyond terminal's capabilities
    BeyondTerminalCapability = 0x30,
    /// Command type not understood by terminal
    CmdTypeNotUnderstood = 0x31,
    /// Command data not understood by terminal
    CmdDataNotUnderstood = 0x32,
    /// Command number not known by terminal
    CmdNumNotKnown = 0x33,
    /// SS Return Error
    SsReturnError = 0x34,
    /// SMS RP-ERROR
    SmsRpError = 0x35,
    /// Error, required values are missing
    RequiredValuesMissing = 0x36,
    /// USSD Return Error
    UssdReturnError = 0x37,
    /// MultipleCard commands error
    MultiCardsCmdError = 0x38,
    /// Interaction with call control by USIM, permanent problem
    UsimCallControlPermanent = 0x39,
    /// Bearer Independent Protocol error
    BipError = 0x3a,
    /// Access Technology unable to process command
    AccessTechUnableToProcess = 0x3b,
    /// Frames error
    FramesError = 0x3c,
    /// MMS Error
    MmsError = 0x3d,
}

impl ResultCode {
    /// Decode a general result byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        use ResultCode::*;
        let code = match value {
            0x00 => Ok,
            0x01 => PrfrmdWithPartialComprehension,
            0x02 => PrfrmdWithMissingInfo,
            0x03 => PrfrmdWithAdditionalEfsRead,
            0x04 => PrfrmdIconNotDisplayed,
            0x05 => PrfrmdModifiedByNaa,
            0x06 => PrfrmdLimitedService,
            0x07 => PrfrmdWithModification,
            0x08 => PrfrmdNaaNotActive,
            0x09 => PrfrmdToneNotPlayed,
            0x10 => UiccSessionTermByUser,
            0x11 => BackwardMoveByUser,
            0x12 => NoResponseFromUser,
            0x13 => HelpInfoRequired,
            0x14 => UssdSsSessionTermByUser,
            0x20 => TerminalCrntlyUnableToProcess,
            0x21 => NetworkCrntlyUnableToProcess,
            0x22 => UserNotAccept,
            0x23 => UserClearDownCall,
            0x24 => ContradictionWithTimer,
            0x25 => NaaCallControlTemporary,
            0x26 => LaunchBrowserError,
            0x27 => MmsTemporary,
            0x30 => BeyondTerminalCapability,
            0x31 => CmdTypeNotUnderstood,
            0x32 => CmdDataNotUnderstood,
            0x33 => CmdNumNotKnown,
            0x34 => SsReturnError,
            0x35 => SmsRpError,
            0x36 => RequiredValuesMissing,
            0x37 => UssdReturnError,
            0x38 => MultiCardsCmdError,
            0x39 => UsimCallControlPermanent,
            0x3a => BipError,
            0x3b => AccessTechUnableToProcess,
            0x3c => FramesError,
            0x3d => MmsError,
            _ => return None,
        };
        Some(code)
    }

    /// General result byte.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Results in the 0x0X range: the command was performed, possibly with
    /// a caveat.
    pub fn is_performed(&self) -> bool {
        self.value() < 0x10
    }
}

/// Events a card can register for with SET UP EVENT LIST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventType {
    /// MT call
    MtCall,
    /// Call connected
    CallConnected,
    /// Call disconnected
    CallDisconnected,
    /// Location status
    LocationStatus,
    /// User activity
    UserActivity,
    /// Idle screen available
    IdleScreenAvailable,
    /// Card reader status
    CardReaderStatus,
    /// Language selection
    LanguageSelection,
    /// Browser termination
    BrowserTermination,
    /// Data available
    DataAvailable,
    /// Channel status
    ChannelStatus,
    /// Any event code the engine does not act on
    Other(u8),
}

impl EventType {
    /// Map an event code; unknown codes become [`EventType::Other`].
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::MtCall,
            0x01 => Self::CallConnected,
            0x02 => Self::CallDisconnected,
            0x03 => Self::LocationStatus,
            0x04 => Self::UserActivity,
            0x05 => Self::IdleScreenAvailable,
            0x06 => Self::CardReaderStatus,
            0x07 => Self::LanguageSelection,
            0x08 => Self::BrowserTermination,
            0x09 => Self::DataAvailable,
            0x0a => Self::ChannelStatus,
            other => Self::Other(other),
        }
    }

    /// Event code as carried in EVENT LIST.
    pub fn value(&self) -> u8 {
        match self {
            Self::MtCall => 0x00,
            Self::CallConnected => 0x01,
            Self::CallDisconnected => 0x02,
            Self::LocationStatus => 0x03,
            Self::UserActivity => 0x04,
            Self::IdleScreenAvailable => 0x05,
            Self::CardReaderStatus => 0x06,
            Self::LanguageSelection => 0x07,
            Self::BrowserTermination => 0x08,
            Self::DataAvailable => 0x09,
            Self::ChannelStatus => 0x0a,
            Self::Other(v) => *v,
        }
    }

    /// Whether the engine can download this event to the card.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// Time unit of a DURATION object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeUnit {
    /// Minutes
    Minute,
    /// Seconds
    Second,
    /// Tenths of seconds
    TenthSecond,
}

impl TimeUnit {
    /// Decode the unit byte of a DURATION object.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Minute),
            0x01 => Some(Self::Second),
            0x02 => Some(Self::TenthSecond),
            _ => None,
        }
    }
}

/// DURATION object: a count of time units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Duration {
    /// Unit of `interval`
    pub unit: TimeUnit,
    /// Number of units
    pub interval: u8,
}

impl Duration {
    /// As a [`std::time::Duration`].
    pub fn to_std(&self) -> std::time::Duration {
        let n = u64::from(self.interval);
        match self.unit {
            TimeUnit::Minute => std::time::Duration::from_secs(n * 60),
            TimeUnit::Second => std::time::Duration::from_secs(n),
            TimeUnit::TenthSecond => std::time::Duration::from_millis(n * 100),
        }
    }
}

/// ICON IDENTIFIER object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IconId {
    /// Record in EF(IMG)
    pub record_number: u8,
    /// Icon replaces the text rather than accompanying it
    pub self_explanatory: bool,
}
