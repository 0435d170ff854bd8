// libstk-rs/libstk/src/pipeline/decoder.rs

//! Raw message decoding and the decoder worker thread.

use log::{debug, warn};

use crate::protocol::codec;
use crate::protocol::tlv::TagRegistry;
use crate::service::{MessageId, RilMessage};
use crate::types::ResultCode;
use crate::utils::parse_hex;

/// Turns a raw [`RilMessage`] into a decoded one. Implementations must not
/// touch session state; they only fill in `result_code`, `cmd_details` and
/// `params`.
pub trait MessageDecoder: Send + 'static {
    /// Decode `msg`, returning it with the outcome filled in.
    fn decode(&self, msg: RilMessage) -> RilMessage;
}

/// The standard decoder: hex -> BER-TLV -> COMPREHENSION-TLV -> parameters.
#[derive(Debug, Clone, Default)]
pub struct CommandDecoder {
    registry: TagRegistry,
}

impl CommandDecoder {
    /// Decoder understanding the tags in `registry`.
    pub fn new(registry: TagRegistry) -> Self {
        Self { registry }
    }

    /// Tags this decoder understands.
    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }
}

impl MessageDecoder for CommandDecoder {
    fn decode(&self, mut msg: RilMessage) -> RilMessage {
        let hex = match (msg.id, msg.raw_payload.as_deref()) {
            // nothing to decode; CALL_SETUP without payload reuses the
            // parameters of the preceding EVENT_NOTIFY
            (MessageId::SessionEnd, _) | (MessageId::CallSetup, None) => {
                msg.result_code = Some(ResultCode::Ok);
                return msg;
            }
            (id, None) => {
                warn!("{:?} without payload", id);
                msg.result_code = Some(ResultCode::CmdDataNotUnderstood);
                return msg;
            }
            (_, Some(hex)) => hex,
        };

        let bytes = match parse_hex(hex) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("{:?}: {}", msg.id, e);
                msg.result_code = Some(ResultCode::CmdDataNotUnderstood);
                return msg;
            }
        };

        match codec::decode_command(&bytes, &self.registry) {
            Ok(params) => {
                msg.cmd_details = Some(*params.cmd_details());
                msg.params = Some(params);
                msg.result_code = Some(ResultCode::Ok);
            }
            Err(e) => {
                debug!("{:?} decode failed: {} ({:?})", msg.id, e, e.cmd_details);
                msg.cmd_details = e.cmd_details;
                msg.result_code = Some(e.code);
            }
        }
        msg
    }
}

#[cfg(feature = "async")]
pub use worker::RilMessageDecoder;

#[cfg(feature = "async")]
mod worker {
    use log::debug;
    use tokio::sync::mpsc;

    use super::MessageDecoder;
    use crate::service::RilMessage;
    use crate::{Error, Result};

    /// Sequential decode worker on a dedicated thread.
    ///
    /// Messages are decoded strictly in submission order and handed to the
    /// sink, which normally forwards them to the dispatch task. The thread
    /// stops once every sender is gone or the sink reports that its
    /// receiver is closed.
    pub struct RilMessageDecoder {
        input: mpsc::UnboundedSender<RilMessage>,
        worker: std::thread::JoinHandle<()>,
    }

    impl RilMessageDecoder {
        /// Start the worker thread. Every decoded message goes to `sink`; the
        /// worker stops once `sink` returns `false` or all senders are dropped.
        pub fn spawn<D, S>(decoder: D, mut sink: S) -> Result<Self>
        where
            D: MessageDecoder,
            S: FnMut(RilMessage) -> bool + Send + 'static,
        {
            let (input, mut rx) = mpsc::unbounded_channel::<RilMessage>();
            let worker = std::thread::Builder::new()
                .name("stk-ril-decoder".into())
                .spawn(move || {
                    while let Some(msg) = rx.blocking_recv() {
                        let decoded = decoder.decode(msg);
                        if !sink(decoded) {
                            break;
                        }
                    }
                    debug!("ril decoder stopped");
                })
                .map_err(|e| Error::Transport(format!("decoder thread: {}", e)))?;
            Ok(Self { input, worker })
        }

        /// Queue a raw message for decoding.
        pub fn submit(&self, msg: RilMessage) -> Result<()> {
            self.input.send(msg).map_err(|_| Error::ChannelClosed)
        }

        /// Another handle on the input queue.
        pub fn sender(&self) -> mpsc::UnboundedSender<RilMessage> {
            self.input.clone()
        }

        /// Whether the worker thread is still alive.
        pub fn is_running(&self) -> bool {
            !self.worker.is_finished()
        }
    }
}
