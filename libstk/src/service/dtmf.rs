// libstk-rs/libstk/src/service/dtmf.rs

//! SEND DTMF sub-flow.
//!
//! Digits are played one by one. A pause digit stops the batch and the
//! rest is scheduled after the configured pause; the terminal response is
//! only sent once the last digit went out.

use log::{debug, info, warn};

use crate::constants::{ADDITIONAL_INFO_NO_ACTIVE_CALL, DTMF_PAUSE_CHAR};
use crate::types::{CommandDetails, ResultCode};

use super::engine::StkService;
use super::scheduler::ContinuationId;

/// DTMF digits still owed to the radio after a pause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDtmf {
    /// Continuation that resumes playback
    pub id: ContinuationId,
    /// SEND DTMF being answered
    pub cmd_det: CommandDetails,
    /// Digits after the pause
    pub remaining: String,
}

impl StkService {
    pub(super) fn start_dtmf(&mut self, cmd_det: CommandDetails, digits: String) {
        self.cancel_dtmf();
        info!("SEND_DTMF {:?}", digits);
        self.play_dtmf(cmd_det, &digits);
    }

    /// A scheduled continuation fired. Ids that were cancelled or replaced
    /// are ignored.
    pub fn resume_dtmf(&mut self, id: ContinuationId) {
        if self.is_disposed() {
            return;
        }
        match self.pending_dtmf.take() {
            Some(pending) if pending.id == id => {
                debug!("DTMF continuation {} resumed", id);
                self.play_dtmf(pending.cmd_det, &pending.remaining);
            }
            other => {
                debug!("stale DTMF continuation {}", id);
                self.pending_dtmf = other;
            }
        }
    }

    pub(super) fn cancel_dtmf(&mut self) {
        if let Some(pending) = self.pending_dtmf.take() {
            debug!("cancelling DTMF continuation {}", pending.id);
            self.scheduler.cancel(pending.id);
        }
    }

    /// Whether DTMF digits are waiting for a pause to elapse.
    pub fn has_pending_dtmf(&self) -> bool {
        self.pending_dtmf.is_some()
    }

    fn play_dtmf(&mut self, cmd_det: CommandDetails, digits: &str) {
        // checked again after every pause: the call may have ended
        if !self.radio.is_call_active() {
            info!("SEND_DTMF without an active call");
            self.send_terminal_response(
                &cmd_det,
                ResultCode::Ok,
                Some(ADDITIONAL_INFO_NO_ACTIVE_CALL),
                None,
            );
            return;
        }

        for (idx, digit) in digits.char_indices() {
            if digit == DTMF_PAUSE_CHAR {
                let id = self.next_continuation;
                self.next_continuation += 1;
                self.pending_dtmf = Some(PendingDtmf {
                    id,
                    cmd_det,
                    remaining: digits[idx + digit.len_utf8()..].to_string(),
                });
                debug!("DTMF pause, continuation {}", id);
                self.scheduler.schedule(self.config.dtmf_pause, id);
                return;
            }
            if let Err(e) = self.radio.send_dtmf(digit) {
                warn!("sending DTMF digit {:?} failed: {}", digit, e);
            }
        }
        self.send_terminal_response(&cmd_det, ResultCode::Ok, None, None);
    }
}
