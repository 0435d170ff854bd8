// libstk-rs/libstk/src/service/engine.rs

//! The session state machine.

use log::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::pipeline::decoder::{CommandDecoder, MessageDecoder};
use crate::protocol::commands::CommandParams;
use crate::protocol::responses::envelope::{encode_event_download, encode_menu_selection_with};
use crate::protocol::responses::terminal::encode_terminal_response_with;
use crate::protocol::responses::{
    DeviceIdentities, GetInkeyInputResponseData, ResponseData, SelectItemResponseData,
};
use crate::transport::{RadioInterface, ToolkitListener};
use crate::types::{CommandDetails, CommandType, EventType, ResultCode};
use crate::utils::bytes_to_hex;

use super::dtmf::PendingDtmf;
use super::message::{
    MessageId, RilMessage, SessionState, StkCmdMessage, StkResponseMessage, UserData,
};
use super::scheduler::{ContinuationId, Scheduler};

/// The session state machine.
///
/// Owns the current command and the current menu. Every input goes through
/// `&mut self`, so the owner decides the threading model: call it directly,
/// or let [`crate::pipeline::StkRuntime`] drive it from a dispatch task.
pub struct StkService {
    pub(super) config: ServiceConfig,
    pub(super) radio: Box<dyn RadioInterface>,
    listener: Box<dyn ToolkitListener>,
    pub(super) scheduler: Box<dyn Scheduler>,
    decoder: CommandDecoder,
    state: SessionState,
    current_command: Option<StkCmdMessage>,
    current_menu: Option<StkCmdMessage>,
    /// SET UP CALL announced by EVENT NOTIFY, waiting for CALL SETUP
    pending_call_setup: Option<CommandParams>,
    pub(super) pending_dtmf: Option<PendingDtmf>,
    pub(super) next_continuation: ContinuationId,
    epoch: u64,
    disposed: bool,
}

impl StkService {
    pub(super) fn new(
        config: ServiceConfig,
        radio: Box<dyn RadioInterface>,
        listener: Box<dyn ToolkitListener>,
        scheduler: Box<dyn Scheduler>,
        decoder: CommandDecoder,
    ) -> Self {
        Self {
            config,
            radio,
            listener,
            scheduler,
            decoder,
            state: SessionState::Idle,
            current_command: None,
            current_menu: None,
            pending_call_setup: None,
            pending_dtmf: None,
            next_continuation: 0,
            epoch: 0,
            disposed: false,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Command the session is on, if any.
    pub fn current_command(&self) -> Option<&StkCmdMessage> {
        self.current_command.as_ref()
    }

    /// Installed main menu, if any.
    pub fn current_menu(&self) -> Option<&StkCmdMessage> {
        self.current_menu.as_ref()
    }

    /// Whether [`StkService::dispose`] was called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Epoch of the last session end seen by the dispatcher.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ---- radio notifications, decoded inline --------------------------

    /// SESSION END from the radio.
    pub fn session_end(&mut self) {
        self.handle_ril_message(RilMessage::session_end().with_epoch(self.epoch));
    }

    /// PROACTIVE COMMAND from the radio, decoded inline.
    pub fn proactive_command(&mut self, hex: &str) {
        self.decode_and_handle(RilMessage::proactive_command(hex));
    }

    /// EVENT NOTIFY from the radio, decoded inline.
    pub fn event_notify(&mut self, hex: &str) {
        self.decode_and_handle(RilMessage::event_notify(hex));
    }

    /// CALL SETUP from the radio; `None` reuses the held SET UP CALL.
    pub fn call_setup(&mut self, hex: Option<&str>) {
        self.decode_and_handle(RilMessage::call_setup(hex.map(str::to_string)));
    }

    fn decode_and_handle(&mut self, msg: RilMessage) {
        let decoded = self.decoder.decode(msg.with_epoch(self.epoch));
        self.handle_ril_message(decoded);
    }

    /// Dispatch one decoded radio notification.
    pub fn handle_ril_message(&mut self, msg: RilMessage) {
        if self.disposed {
            debug!("disposed, dropping {:?}", msg.id);
            return;
        }

        if msg.id == MessageId::SessionEnd {
            self.epoch = self.epoch.max(msg.epoch);
            self.handle_session_end();
            return;
        }
        if msg.epoch < self.epoch {
            info!(
                "dropping {:?} superseded by session end (epoch {} < {})",
                msg.id, msg.epoch, self.epoch
            );
            return;
        }

        let RilMessage {
            id,
            result_code,
            cmd_details,
            params,
            ..
        } = msg;

        match (id, result_code, params) {
            (_, None, _) => warn!("{:?} was not decoded, dropping", id),

            (MessageId::ProactiveCommand, Some(ResultCode::Ok), Some(params)) => {
                self.handle_proactive_command(params)
            }
            (MessageId::ProactiveCommand, Some(code), _) => match cmd_details {
                // the card still waits for an answer to the broken command
                Some(det) => self.send_terminal_response(&det, code, None, None),
                None => warn!("undecodable proactive command ({:?}), no details to answer", code),
            },

            (MessageId::EventNotify, Some(ResultCode::Ok), Some(params)) => {
                if params.command_type() == CommandType::SetUpCall {
                    debug!("holding SET_UP_CALL until CALL_SETUP");
                    self.pending_call_setup = Some(params);
                } else {
                    self.handle_proactive_command(params);
                }
            }

            (MessageId::CallSetup, Some(ResultCode::Ok), params) => {
                match params.or_else(|| self.pending_call_setup.take()) {
                    Some(params) => self.handle_proactive_command(params),
                    None => warn!("CALL_SETUP without parameters"),
                }
            }

            (MessageId::Refresh, Some(ResultCode::Ok), Some(params)) => {
                self.handle_proactive_command(params)
            }

            (id, Some(code), _) => warn!("{:?} dropped: {:?}", id, code),
        }
    }

    fn handle_proactive_command(&mut self, params: CommandParams) {
        let cmd = StkCmdMessage::new(params);
        let det = *cmd.cmd_details();
        info!(
            "proactive command {} #{} qualifier {:#04x}",
            cmd.command_type(),
            det.command_number,
            det.command_qualifier
        );

        let immediate = match cmd.params() {
            CommandParams::SetUpMenu { menu, .. } => {
                self.send_terminal_response(&det, ResultCode::Ok, None, None);
                if menu.items.is_empty() {
                    info!("menu removed");
                    self.current_menu = None;
                } else {
                    self.current_menu = Some(cmd.clone());
                }
                true
            }
            CommandParams::DisplayText { text, .. } if !text.response_needed => {
                self.send_terminal_response(&det, ResultCode::Ok, None, None);
                true
            }
            CommandParams::SetUpIdleModeText { .. } => {
                self.send_terminal_response(&det, ResultCode::Ok, None, None);
                true
            }
            CommandParams::SetUpEventList { events, .. } => {
                let code = if events.iter().all(EventType::is_supported) {
                    ResultCode::Ok
                } else {
                    ResultCode::CmdTypeNotUnderstood
                };
                self.send_terminal_response(&det, code, None, None);
                return;
            }
            CommandParams::SendDtmf { dtmf, .. } => {
                let digits = dtmf.dtmf_string.clone();
                self.start_dtmf(det, digits);
                return;
            }
            _ => false,
        };

        self.current_command = Some(cmd);
        self.transition(if immediate {
            SessionState::Idle
        } else {
            SessionState::AwaitingApplication
        });
        if let Some(cmd) = &self.current_command {
            self.listener.command_ready(cmd);
        }
    }

    fn handle_session_end(&mut self) {
        info!("session end");
        self.cancel_dtmf();
        if self.pending_call_setup.take().is_some() {
            debug!("held SET_UP_CALL dropped");
        }
        self.current_command = self.current_menu.clone();
        self.transition(if self.current_menu.is_some() {
            SessionState::AwaitingApplication
        } else {
            SessionState::Idle
        });
        self.listener.session_ended(self.current_menu.as_ref());
    }

    // ---- application responses ----------------------------------------

    /// Validate and answer an application response. Responses that do not
    /// belong to the current command are dropped without touching the
    /// session.
    pub fn handle_response(&mut self, resp: StkResponseMessage) {
        if self.disposed {
            return;
        }
        let Some(current) = self.current_command.clone() else {
            warn!("response {:?} without current command, dropped", resp.result_code);
            return;
        };
        if !current.cmd_details().matches(&resp.cmd_details) {
            warn!(
                "stale response for {:?}, current is {:?}; dropped",
                resp.cmd_details,
                current.cmd_details()
            );
            return;
        }

        let is_menu = matches!(
            current.params(),
            CommandParams::SetUpMenu { menu, .. } if !menu.items.is_empty()
        );
        if self.state != SessionState::AwaitingApplication && !is_menu {
            warn!("no response pending for {}, dropped", current.command_type());
            return;
        }

        let det = *current.cmd_details();
        let code = resp.result_code;
        let help = code == ResultCode::HelpInfoRequired;

        if code.is_performed() || help {
            match current.params() {
                CommandParams::SetUpMenu { .. } => {
                    match resp.user_data {
                        UserData::MenuSelection(id) => self.send_menu_selection(id, help),
                        other => warn!("menu response without selection: {:?}", other),
                    }
                    // the menu stays current
                    self.transition(SessionState::Idle);
                    return;
                }
                CommandParams::SelectItem { .. } => {
                    let UserData::MenuSelection(id) = resp.user_data else {
                        warn!("SELECT_ITEM response without item, dropped");
                        return;
                    };
                    let data = SelectItemResponseData::new(id);
                    self.send_terminal_response(&det, code, None, Some(&data));
                }
                CommandParams::GetInput { input, .. } | CommandParams::GetInkey { input, .. } => {
                    let data = match (&resp.user_data, input.yes_no) {
                        _ if help => None,
                        (UserData::YesNo(answer), true) => {
                            Some(GetInkeyInputResponseData::yes_no(*answer))
                        }
                        (UserData::Input(text), false) => Some(GetInkeyInputResponseData::text(
                            text.as_str(),
                            input.ucs2,
                            input.packed,
                        )),
                        (other, _) => {
                            warn!("input response with {:?}, dropped", other);
                            return;
                        }
                    };
                    self.send_terminal_response(
                        &det,
                        code,
                        None,
                        data.as_ref().map(|d| d as &dyn ResponseData),
                    );
                }
                CommandParams::SetUpCall { .. } => {
                    let UserData::Confirm(accepted) = resp.user_data else {
                        warn!("SET_UP_CALL response without confirmation, dropped");
                        return;
                    };
                    info!("call set up {}", if accepted { "accepted" } else { "rejected" });
                    if let Err(e) = self.radio.forward_call_setup_decision(accepted) {
                        warn!("forwarding call set up decision failed: {}", e);
                    }
                    self.finish_command();
                    return;
                }
                _ => self.send_terminal_response(&det, code, None, None),
            }
        } else {
            match code {
                ResultCode::NoResponseFromUser
                | ResultCode::UiccSessionTermByUser
                | ResultCode::BackwardMoveByUser
                | ResultCode::UserNotAccept
                | ResultCode::TerminalCrntlyUnableToProcess
                | ResultCode::LaunchBrowserError
                    if current.command_type() != CommandType::SetUpMenu =>
                {
                    self.send_terminal_response(&det, code, None, None)
                }
                other => {
                    warn!(
                        "result {:?} not expected for {}, dropped",
                        other,
                        current.command_type()
                    );
                    return;
                }
            }
        }

        self.transition(SessionState::Done);
        self.finish_command();
    }

    fn finish_command(&mut self) {
        self.current_command = None;
        self.transition(SessionState::Idle);
    }

    // ---- other inputs -------------------------------------------------

    /// Outcome of a REFRESH reported by the modem; 0 means success.
    pub fn handle_refresh_result(&mut self, result: i32) {
        if self.disposed {
            return;
        }
        let det = match &self.current_command {
            Some(cmd) if cmd.command_type() == CommandType::Refresh => *cmd.cmd_details(),
            _ => {
                warn!("refresh result {} without pending REFRESH", result);
                return;
            }
        };
        let code = if result == 0 {
            if let Err(e) = self.radio.refresh_sim_records() {
                warn!("refreshing SIM records failed: {}", e);
            }
            ResultCode::Ok
        } else {
            ResultCode::TerminalCrntlyUnableToProcess
        };
        self.send_terminal_response(&det, code, None, None);
        self.transition(SessionState::Done);
        self.finish_command();
    }

    /// SIM reported ready: report the toolkit as running when configured.
    pub fn handle_sim_ready(&mut self) {
        if self.disposed || !self.config.report_running_on_sim_ready {
            return;
        }
        info!("SIM ready, reporting toolkit running");
        if let Err(e) = self.radio.report_stk_service_running() {
            warn!("reporting toolkit running failed: {}", e);
        }
    }

    /// Send an EVENT DOWNLOAD envelope.
    pub fn event_download(
        &mut self,
        event: EventType,
        source_id: u8,
        destination_id: u8,
        additional_info: Option<&[u8]>,
    ) {
        if self.disposed {
            return;
        }
        let bytes = encode_event_download(event, source_id, destination_id, additional_info);
        self.send_envelope(&bytes);
    }

    /// Stop the engine: pending DTMF is cancelled and every later input is
    /// ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        info!("disposing toolkit service");
        self.cancel_dtmf();
        self.current_command = None;
        self.current_menu = None;
        self.pending_call_setup = None;
        self.state = SessionState::Idle;
        self.disposed = true;
    }

    // ---- outbound -----------------------------------------------------

    pub(super) fn send_terminal_response(
        &mut self,
        cmd_det: &CommandDetails,
        code: ResultCode,
        additional_info: Option<u8>,
        data: Option<&dyn ResponseData>,
    ) {
        let devices =
            DeviceIdentities::new(self.config.terminal_device_id, self.config.uicc_device_id);
        let bytes = encode_terminal_response_with(devices, cmd_det, code, additional_info, data);
        let hex = bytes_to_hex(&bytes);
        debug!("terminal response {:?}: {}", code, hex);
        if let Err(e) = self.radio.send_terminal_response(&hex) {
            warn!("sending terminal response failed: {}", e);
        }
    }

    fn send_menu_selection(&mut self, item_id: u8, help: bool) {
        let devices =
            DeviceIdentities::new(self.config.keypad_device_id, self.config.uicc_device_id);
        let bytes = encode_menu_selection_with(devices, item_id, help);
        self.send_envelope(&bytes);
    }

    fn send_envelope(&mut self, bytes: &[u8]) {
        let hex = bytes_to_hex(bytes);
        debug!("envelope: {}", hex);
        if let Err(e) = self.radio.send_envelope(&hex) {
            warn!("sending envelope failed: {}", e);
        }
    }

    fn transition(&mut self, to: SessionState) {
        if self.state != to {
            debug!("state {:?} -> {:?}", self.state, to);
            self.state = to;
        }
    }
}

impl std::fmt::Debug for StkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StkService")
            .field("state", &self.state)
            .field("current_command", &self.current_command.as_ref().map(|c| c.command_type()))
            .field("has_menu", &self.current_menu.is_some())
            .field("epoch", &self.epoch)
            .field("disposed", &self.disposed)
            .finish()
    }
}
