// libstk-rs/libstk/src/pipeline/mod.rs

//! Decode work off the dispatch path.
//!
//! Raw notifications go through one [`decoder::MessageDecoder`] on a
//! dedicated thread, strictly FIFO, and the decoded messages land in the
//! single queue of the dispatch task that owns the [`crate::StkService`].

pub mod decoder;
#[cfg(feature = "async")]
pub mod runtime;

pub use decoder::{CommandDecoder, MessageDecoder};
#[cfg(feature = "async")]
pub use decoder::RilMessageDecoder;
#[cfg(feature = "async")]
pub use runtime::{EngineEvent, StkHandle, StkRuntime, TokioScheduler};
