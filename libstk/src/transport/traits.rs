// libstk-rs/libstk/src/transport/traits.rs

//! Radio and application traits.

use crate::Result;
use crate::service::StkCmdMessage;

/// Radio/modem side of the engine. Every payload is the lowercase hex wire
/// representation.
///
/// Implementations must be `Send` so the engine can live on its own
/// dispatch task.
pub trait RadioInterface: Send {
    /// Deliver a TERMINAL RESPONSE to the card
    fn send_terminal_response(&mut self, hex: &str) -> Result<()>;

    /// Deliver an ENVELOPE (menu selection, event download) to the card
    fn send_envelope(&mut self, hex: &str) -> Result<()>;

    /// Play one DTMF digit on the active call
    fn send_dtmf(&mut self, digit: char) -> Result<()>;

    /// Accept or reject a card-initiated call. The radio answers the card
    /// itself, so no terminal response is sent by the engine.
    fn forward_call_setup_decision(&mut self, accepted: bool) -> Result<()>;

    /// Whether a voice call is currently up
    fn is_call_active(&self) -> bool;

    /// Tell the modem the toolkit is ready to receive proactive commands.
    fn report_stk_service_running(&mut self) -> Result<()> {
        Ok(())
    }

    /// Re-read SIM records after a successful REFRESH.
    fn refresh_sim_records(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Application side: whatever presents commands to the user.
pub trait ToolkitListener: Send {
    /// A command needs user interaction (or was installed, for menus and
    /// idle text).
    fn command_ready(&mut self, cmd: &StkCmdMessage);

    /// The card ended the session. `menu` is the main menu that became the
    /// current command again, if one is installed.
    fn session_ended(&mut self, menu: Option<&StkCmdMessage>);
}
