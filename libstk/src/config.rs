// libstk-rs/libstk/src/config.rs

//! Service configuration.

use std::time::Duration;

use crate::constants::{DEV_ID_KEYPAD, DEV_ID_TERMINAL, DEV_ID_UICC, DTMF_PAUSE_MS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Engine settings. `Default` matches ETSI device identities and a three
/// second DTMF pause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServiceConfig {
    /// Delay inserted for each pause digit of SEND DTMF
    pub dtmf_pause: Duration,
    /// Device identity of the terminal in TERMINAL RESPONSE
    pub terminal_device_id: u8,
    /// Device identity of the UICC
    pub uicc_device_id: u8,
    /// Source identity of MENU SELECTION envelopes
    pub keypad_device_id: u8,
    /// Tell the modem the toolkit is running once the SIM reports ready
    pub report_running_on_sim_ready: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dtmf_pause: Duration::from_millis(DTMF_PAUSE_MS),
            terminal_device_id: DEV_ID_TERMINAL,
            uicc_device_id: DEV_ID_UICC,
            keypad_device_id: DEV_ID_KEYPAD,
            report_running_on_sim_ready: true,
        }
    }
}

impl ServiceConfig {
    /// Same as [`ServiceConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DTMF pause.
    pub fn with_dtmf_pause(mut self, pause: Duration) -> Self {
        self.dtmf_pause = pause;
        self
    }

    /// Set the terminal device identity.
    pub fn with_terminal_device_id(mut self, id: u8) -> Self {
        self.terminal_device_id = id;
        self
    }

    /// Set the UICC device identity.
    pub fn with_uicc_device_id(mut self, id: u8) -> Self {
        self.uicc_device_id = id;
        self
    }

    /// Set the keypad device identity.
    pub fn with_keypad_device_id(mut self, id: u8) -> Self {
        self.keypad_device_id = id;
        self
    }

    /// Enable or disable the service-running report on SIM ready.
    pub fn with_report_running_on_sim_ready(mut self, report: bool) -> Self {
        self.report_running_on_sim_ready = report;
        self
    }
}
