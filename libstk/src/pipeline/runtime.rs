// libstk-rs/libstk/src/pipeline/runtime.rs

//! Tokio runtime hosting the service on a dispatch task.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, info};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::decoder::{CommandDecoder, MessageDecoder, RilMessageDecoder};
use crate::service::{
    ContinuationId, RilMessage, Scheduler, StkResponseMessage, StkService, StkServiceBuilder,
};
use crate::types::EventType;
use crate::{Error, Result};

/// Everything the dispatch task reacts to.
#[derive(Debug)]
pub enum EngineEvent {
    /// A message out of the decoder, or a SESSION END
    Decoded(RilMessage),
    /// Application answer
    Response(StkResponseMessage),
    /// A DTMF pause elapsed
    DtmfResume(ContinuationId),
    /// REFRESH outcome from the modem
    RefreshResult(i32),
    /// SIM reported ready
    SimReady,
    /// Application-initiated event download
    EventDownload {
        /// Event to report
        event: EventType,
        /// Source device
        source_id: u8,
        /// Destination device
        destination_id: u8,
        /// Encoded event-specific objects
        additional_info: Option<Vec<u8>>,
    },
    /// Stop the engine
    Dispose,
}

/// Scheduler backed by tokio timers. A fired timer posts
/// [`EngineEvent::DtmfResume`] to the dispatch queue.
pub struct TokioScheduler {
    events: mpsc::UnboundedSender<EngineEvent>,
    runtime: tokio::runtime::Handle,
    timers: HashMap<ContinuationId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Scheduler posting to `events`, spawning timers on `runtime`.
    pub fn new(
        events: mpsc::UnboundedSender<EngineEvent>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            events,
            runtime,
            timers: HashMap::new(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, id: ContinuationId) {
        self.timers.retain(|_, t| !t.is_finished());
        let events = self.events.clone();
        let timer = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // dispatch task gone means the service was disposed
            let _ = events.send(EngineEvent::DtmfResume(id));
        });
        self.timers.insert(id, timer);
    }

    fn cancel(&mut self, id: ContinuationId) {
        if let Some(timer) = self.timers.remove(&id) {
            timer.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
    }
}

/// Cloneable front door of a running engine.
///
/// Radio notifications are stamped with the current session epoch and
/// queued for decoding; SESSION END skips the decoder and bumps the epoch,
/// so commands still being decoded when it arrives are dropped at dispatch.
#[derive(Clone, Debug)]
pub struct StkHandle {
    raw: mpsc::UnboundedSender<RilMessage>,
    events: mpsc::UnboundedSender<EngineEvent>,
    epoch: Arc<AtomicU64>,
}

impl StkHandle {
    fn post(&self, event: EngineEvent) -> Result<()> {
        self.events.send(event).map_err(|_| Error::ChannelClosed)
    }

    fn decode(&self, msg: RilMessage) -> Result<()> {
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.raw
            .send(msg.with_epoch(epoch))
            .map_err(|_| Error::ChannelClosed)
    }

    /// SESSION END. Commands still in decode are dropped.
    pub fn session_end(&self) -> Result<()> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let mut msg = RilMessage::session_end().with_epoch(epoch);
        msg.result_code = Some(crate::types::ResultCode::Ok);
        self.post(EngineEvent::Decoded(msg))
    }

    /// Queue a PROACTIVE COMMAND for decoding.
    pub fn proactive_command(&self, hex: impl Into<String>) -> Result<()> {
        self.decode(RilMessage::proactive_command(hex))
    }

    /// Queue an EVENT NOTIFY for decoding.
    pub fn event_notify(&self, hex: impl Into<String>) -> Result<()> {
        self.decode(RilMessage::event_notify(hex))
    }

    /// Queue a CALL SETUP; `None` reuses the held SET UP CALL.
    pub fn call_setup(&self, hex: Option<String>) -> Result<()> {
        self.decode(RilMessage::call_setup(hex))
    }

    /// Queue a REFRESH notification for decoding.
    pub fn refresh(&self, hex: impl Into<String>) -> Result<()> {
        self.decode(RilMessage::refresh(hex))
    }

    /// REFRESH outcome reported by the modem (0 = success).
    pub fn refresh_result(&self, result: i32) -> Result<()> {
        self.post(EngineEvent::RefreshResult(result))
    }

    /// SIM reported ready.
    pub fn sim_ready(&self) -> Result<()> {
        self.post(EngineEvent::SimReady)
    }

    /// Answer the current command.
    pub fn submit_response(&self, resp: StkResponseMessage) -> Result<()> {
        self.post(EngineEvent::Response(resp))
    }

    /// Send an EVENT DOWNLOAD envelope.
    pub fn event_download(
        &self,
        event: EventType,
        source_id: u8,
        destination_id: u8,
        additional_info: Option<Vec<u8>>,
    ) -> Result<()> {
        self.post(EngineEvent::EventDownload {
            event,
            source_id,
            destination_id,
            additional_info,
        })
    }

    /// Stop the engine.
    pub fn dispose(&self) -> Result<()> {
        self.post(EngineEvent::Dispose)
    }
}

/// A [`StkService`] running on a tokio dispatch task, fed by a
/// [`RilMessageDecoder`] thread.
pub struct StkRuntime {
    handle: StkHandle,
    dispatch: JoinHandle<StkService>,
    decoder: RilMessageDecoder,
}

impl StkRuntime {
    /// Start with the standard decoder. Must be called from within a tokio
    /// runtime; any scheduler set on the builder is replaced by a
    /// [`TokioScheduler`].
    pub fn start(builder: StkServiceBuilder) -> Result<Self> {
        Self::start_with_decoder(builder, CommandDecoder::default())
    }

    /// As [`StkRuntime::start`] with a custom decoder.
    pub fn start_with_decoder<D: MessageDecoder>(
        builder: StkServiceBuilder,
        decoder: D,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::Transport(format!("no tokio runtime: {}", e)))?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let service = builder
            .with_scheduler(Box::new(TokioScheduler::new(
                events_tx.clone(),
                runtime.clone(),
            )))
            .build()?;

        let sink_tx = events_tx.clone();
        let decoder = RilMessageDecoder::spawn(decoder, move |msg| {
            sink_tx.send(EngineEvent::Decoded(msg)).is_ok()
        })?;

        let handle = StkHandle {
            raw: decoder.sender(),
            events: events_tx,
            epoch: Arc::new(AtomicU64::new(0)),
        };
        let dispatch = runtime.spawn(dispatch_loop(service, events_rx));
        info!("toolkit runtime started");

        Ok(Self {
            handle,
            dispatch,
            decoder,
        })
    }

    /// Handle for feeding the engine.
    pub fn handle(&self) -> StkHandle {
        self.handle.clone()
    }

    /// Whether the decoder thread is alive.
    pub fn is_decoder_running(&self) -> bool {
        self.decoder.is_running()
    }

    /// Dispose the service and wait for the dispatch task. Returns the
    /// service for inspection.
    pub async fn shutdown(self) -> Result<StkService> {
        // already gone is fine: the task is finishing anyway
        let _ = self.handle.dispose();
        self.dispatch
            .await
            .map_err(|e| Error::Transport(format!("dispatch task: {}", e)))
    }
}

async fn dispatch_loop(
    mut service: StkService,
    mut events: mpsc::UnboundedReceiver<EngineEvent>,
) -> StkService {
    while let Some(event) = events.recv().await {
        match event {
            EngineEvent::Decoded(msg) => service.handle_ril_message(msg),
            EngineEvent::Response(resp) => service.handle_response(resp),
            EngineEvent::DtmfResume(id) => service.resume_dtmf(id),
            EngineEvent::RefreshResult(result) => service.handle_refresh_result(result),
            EngineEvent::SimReady => service.handle_sim_ready(),
            EngineEvent::EventDownload {
                event,
                source_id,
                destination_id,
                additional_info,
            } => service.event_download(
                event,
                source_id,
                destination_id,
                additional_info.as_deref(),
            ),
            EngineEvent::Dispose => {
                service.dispose();
                break;
            }
        }
    }
    debug!("dispatch loop finished");
    service
}
