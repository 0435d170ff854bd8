// libstk-rs/libstk/src/transport/mock.rs

//! In-memory radio and listener used by tests and demos.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::service::StkCmdMessage;
use crate::transport::traits::{RadioInterface, ToolkitListener};
use crate::{Error, Result};

/// One call made on a [`MockRadio`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCall {
    /// `send_terminal_response` with its hex
    TerminalResponse(String),
    /// `send_envelope` with its hex
    Envelope(String),
    /// `send_dtmf`
    Dtmf(char),
    /// `forward_call_setup_decision`
    CallSetupDecision(bool),
    /// `report_stk_service_running`
    StkServiceRunning,
    /// `refresh_sim_records`
    RefreshSimRecords,
}

// Recorded values plus a condvar so tests can wait for a threaded engine.
#[derive(Debug)]
struct Log<T> {
    entries: Mutex<Vec<T>>,
    changed: Condvar,
}

impl<T: Clone> Log<T> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            changed: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        // a panicking test thread must not hide the log from the others
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, entry: T) {
        self.lock().push(entry);
        self.changed.notify_all();
    }

    fn snapshot(&self) -> Vec<T> {
        self.lock().clone()
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self.lock();
        while guard.len() < count {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            guard = match self.changed.wait_timeout(guard, deadline - now) {
                Ok((g, _)) => g,
                Err(e) => e.into_inner().0,
            };
        }
        true
    }
}

/// Mock radio for tests. Clones share the same call log, so a test can keep
/// one handle while the engine owns another.
#[derive(Debug, Clone)]
pub struct MockRadio {
    log: Arc<Log<RadioCall>>,
    call_active: Arc<AtomicBool>,
    /// Number of upcoming sends that should fail with a transport error
    failures: Arc<AtomicUsize>,
}

impl Default for MockRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRadio {
    /// Radio with no call active and no recorded calls.
    pub fn new() -> Self {
        Self {
            log: Arc::new(Log::new()),
            call_active: Arc::new(AtomicBool::new(false)),
            failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Switch the reported call state.
    pub fn set_call_active(&self, active: bool) {
        self.call_active.store(active, Ordering::SeqCst);
    }

    /// Make the next `n` outbound sends fail.
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<RadioCall> {
        self.log.snapshot()
    }

    /// Forget the recorded calls.
    pub fn clear(&self) {
        self.log.clear();
    }

    /// Terminal responses sent, in order.
    pub fn terminal_responses(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RadioCall::TerminalResponse(hex) => Some(hex),
                _ => None,
            })
            .collect()
    }

    /// Envelopes sent, in order.
    pub fn envelopes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RadioCall::Envelope(hex) => Some(hex),
                _ => None,
            })
            .collect()
    }

    /// DTMF digits played, concatenated.
    pub fn dtmf_digits(&self) -> String {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RadioCall::Dtmf(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// Block until at least `count` calls were recorded.
    pub fn wait_for_calls(&self, count: usize, timeout: Duration) -> bool {
        self.log.wait_for(count, timeout)
    }

    fn record(&self, call: RadioCall) -> Result<()> {
        let failed = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(Error::Transport(format!("mock failure on {:?}", call)));
        }
        self.log.push(call);
        Ok(())
    }
}

impl RadioInterface for MockRadio {
    fn send_terminal_response(&mut self, hex: &str) -> Result<()> {
        self.record(RadioCall::TerminalResponse(hex.to_string()))
    }

    fn send_envelope(&mut self, hex: &str) -> Result<()> {
        self.record(RadioCall::Envelope(hex.to_string()))
    }

    fn send_dtmf(&mut self, digit: char) -> Result<()> {
        self.record(RadioCall::Dtmf(digit))
    }

    fn forward_call_setup_decision(&mut self, accepted: bool) -> Result<()> {
        self.record(RadioCall::CallSetupDecision(accepted))
    }

    fn is_call_active(&self) -> bool {
        self.call_active.load(Ordering::SeqCst)
    }

    fn report_stk_service_running(&mut self) -> Result<()> {
        self.record(RadioCall::StkServiceRunning)
    }

    fn refresh_sim_records(&mut self) -> Result<()> {
        self.record(RadioCall::RefreshSimRecords)
    }
}

/// One notification received by a [`RecordingListener`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListenerEvent {
    /// `command_ready`
    CommandReady(StkCmdMessage),
    /// `session_ended` with the restored menu
    SessionEnded(Option<StkCmdMessage>),
}

/// Listener that records every notification. Clones share the record.
#[derive(Debug, Clone)]
pub struct RecordingListener {
    log: Arc<Log<ListenerEvent>>,
}

impl Default for RecordingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingListener {
    /// Listener with an empty record.
    pub fn new() -> Self {
        Self {
            log: Arc::new(Log::new()),
        }
    }

    /// Every notification so far, in order.
    pub fn events(&self) -> Vec<ListenerEvent> {
        self.log.snapshot()
    }

    /// Forget the recorded notifications.
    pub fn clear(&self) {
        self.log.clear();
    }

    /// Commands handed to the application, in order.
    pub fn ready_commands(&self) -> Vec<StkCmdMessage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ListenerEvent::CommandReady(cmd) => Some(cmd),
                _ => None,
            })
            .collect()
    }

    /// Block until at least `count` notifications arrived or `timeout`
    /// elapsed. Returns whether the count was reached.
    pub fn wait_for_events(&self, count: usize, timeout: Duration) -> bool {
        self.log.wait_for(count, timeout)
    }
}

impl ToolkitListener for RecordingListener {
    fn command_ready(&mut self, cmd: &StkCmdMessage) {
        self.log.push(ListenerEvent::CommandReady(cmd.clone()));
    }

    fn session_ended(&mut self, menu: Option<&StkCmdMessage>) {
        self.log.push(ListenerEvent::SessionEnded(menu.cloned()));
    }
}
