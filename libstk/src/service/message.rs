// libstk-rs/libstk/src/service/message.rs

//! Messages exchanged with the radio and the application.

use std::collections::BTreeSet;

use crate::protocol::commands::{
    BrowserSettings, CallSetup, CommandParams, DtmfMessage, Input, Menu, RefreshParams,
    TextMessage, ToneSettings,
};
use crate::types::{CommandDetails, CommandType, EventType, ResultCode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decoded proactive command as handed to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StkCmdMessage {
    params: CommandParams,
}

impl StkCmdMessage {
    /// Wrap decoded parameters.
    pub fn new(params: CommandParams) -> Self {
        Self { params }
    }

    /// Decoded parameters.
    pub fn params(&self) -> &CommandParams {
        &self.params
    }

    /// COMMAND DETAILS the answer must echo.
    pub fn cmd_details(&self) -> &CommandDetails {
        self.params.cmd_details()
    }

    /// Type of the command.
    pub fn command_type(&self) -> CommandType {
        self.params.command_type()
    }

    /// Menu of SET UP MENU or SELECT ITEM.
    pub fn menu(&self) -> Option<&Menu> {
        match &self.params {
            CommandParams::SetUpMenu { menu, .. } | CommandParams::SelectItem { menu, .. } => {
                Some(menu)
            }
            _ => None,
        }
    }

    /// Text of DISPLAY TEXT, idle mode text and the SEND SMS/SS/USSD notices.
    pub fn text_message(&self) -> Option<&TextMessage> {
        match &self.params {
            CommandParams::DisplayText { text, .. }
            | CommandParams::SetUpIdleModeText { text, .. }
            | CommandParams::SendSms { text, .. }
            | CommandParams::SendSs { text, .. }
            | CommandParams::SendUssd { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Input request of GET INPUT or GET INKEY.
    pub fn input(&self) -> Option<&Input> {
        match &self.params {
            CommandParams::GetInput { input, .. } | CommandParams::GetInkey { input, .. } => {
                Some(input)
            }
            _ => None,
        }
    }

    /// SEND DTMF parameters.
    pub fn dtmf_message(&self) -> Option<&DtmfMessage> {
        match &self.params {
            CommandParams::SendDtmf { dtmf, .. } => Some(dtmf),
            _ => None,
        }
    }

    /// SET UP CALL parameters.
    pub fn call_setup(&self) -> Option<&CallSetup> {
        match &self.params {
            CommandParams::SetUpCall { call, .. } => Some(call),
            _ => None,
        }
    }

    /// LAUNCH BROWSER parameters.
    pub fn browser_settings(&self) -> Option<&BrowserSettings> {
        match &self.params {
            CommandParams::LaunchBrowser { browser, .. } => Some(browser),
            _ => None,
        }
    }

    /// PLAY TONE parameters.
    pub fn tone_settings(&self) -> Option<&ToneSettings> {
        match &self.params {
            CommandParams::PlayTone { tone, .. } => Some(tone),
            _ => None,
        }
    }

    /// REFRESH parameters.
    pub fn refresh(&self) -> Option<&RefreshParams> {
        match &self.params {
            CommandParams::Refresh { refresh, .. } => Some(refresh),
            _ => None,
        }
    }

    /// Events of SET UP EVENT LIST.
    pub fn events(&self) -> Option<&BTreeSet<EventType>> {
        match &self.params {
            CommandParams::SetUpEventList { events, .. } => Some(events),
            _ => None,
        }
    }
}

impl From<CommandParams> for StkCmdMessage {
    fn from(params: CommandParams) -> Self {
        Self::new(params)
    }
}

/// Command-specific part of an application response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UserData {
    /// No command-specific data
    #[default]
    None,
    /// Item chosen in SET UP MENU / SELECT ITEM
    MenuSelection(u8),
    /// GET INPUT / GET INKEY text
    Input(String),
    /// GET INKEY yes/no answer
    YesNo(bool),
    /// SET UP CALL confirmation
    Confirm(bool),
}

/// The application's answer to the current command.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StkResponseMessage {
    /// Details of the command being answered
    pub cmd_details: CommandDetails,
    /// General result
    pub result_code: ResultCode,
    /// Command-specific data
    pub user_data: UserData,
}

impl StkResponseMessage {
    /// Response without user data.
    pub fn new(cmd_details: CommandDetails, result_code: ResultCode) -> Self {
        Self {
            cmd_details,
            result_code,
            user_data: UserData::None,
        }
    }

    /// Answer `cmd` with `result_code`.
    pub fn for_command(cmd: &StkCmdMessage, result_code: ResultCode) -> Self {
        Self::new(*cmd.cmd_details(), result_code)
    }

    /// Attach user data.
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = user_data;
        self
    }

    /// Attach the chosen item.
    pub fn with_menu_selection(self, item_id: u8) -> Self {
        self.with_user_data(UserData::MenuSelection(item_id))
    }

    /// Attach entered text.
    pub fn with_input(self, text: impl Into<String>) -> Self {
        self.with_user_data(UserData::Input(text.into()))
    }

    /// Attach a yes/no answer.
    pub fn with_yes_no(self, answer: bool) -> Self {
        self.with_user_data(UserData::YesNo(answer))
    }

    /// Attach a SET UP CALL decision.
    pub fn with_confirmation(self, accepted: bool) -> Self {
        self.with_user_data(UserData::Confirm(accepted))
    }
}

/// Kind of radio notification carried by a [`RilMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageId {
    /// The card ended the proactive session
    SessionEnd,
    /// A command the terminal must answer
    ProactiveCommand,
    /// A command the modem already handled, delivered for display
    EventNotify,
    /// The modem is ready to set up a held call
    CallSetup,
    /// A REFRESH the modem delivered outside the proactive command flow
    Refresh,
}

/// Unit of work of the decode pipeline: raw payload in, decoded parameters
/// (or the failure code) out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RilMessage {
    /// Notification kind
    pub id: MessageId,
    /// Hex payload as delivered by the radio
    pub raw_payload: Option<String>,
    /// `None` until decoded
    pub result_code: Option<ResultCode>,
    /// Command details, also set when decoding failed after they were read
    pub cmd_details: Option<CommandDetails>,
    /// Decoded parameters on success
    pub params: Option<CommandParams>,
    /// Session epoch at intake
    pub epoch: u64,
}

impl RilMessage {
    /// Undecoded message.
    pub fn new(id: MessageId, raw_payload: Option<String>) -> Self {
        Self {
            id,
            raw_payload,
            result_code: None,
            cmd_details: None,
            params: None,
            epoch: 0,
        }
    }

    /// SESSION END notification.
    pub fn session_end() -> Self {
        Self::new(MessageId::SessionEnd, None)
    }

    /// PROACTIVE COMMAND notification.
    pub fn proactive_command(hex: impl Into<String>) -> Self {
        Self::new(MessageId::ProactiveCommand, Some(hex.into()))
    }

    /// EVENT NOTIFY notification.
    pub fn event_notify(hex: impl Into<String>) -> Self {
        Self::new(MessageId::EventNotify, Some(hex.into()))
    }

    /// CALL SETUP notification.
    pub fn call_setup(hex: Option<String>) -> Self {
        Self::new(MessageId::CallSetup, hex)
    }

    /// REFRESH notification.
    pub fn refresh(hex: impl Into<String>) -> Self {
        Self::new(MessageId::Refresh, Some(hex.into()))
    }

    /// Stamp with a session epoch.
    pub fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Whether a decoder has processed this message.
    pub fn is_decoded(&self) -> bool {
        self.result_code.is_some()
    }
}

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SessionState {
    /// Nothing pending
    #[default]
    Idle,
    /// The current command waits for an application response
    AwaitingApplication,
    /// The last terminal response went out; the next event returns to `Idle`.
    Done,
}
