// libstk-rs/libstk/src/lib.rs

//! libstk
//!
//! SIM Toolkit (STK) protocol engine: COMPREHENSION-TLV codec, proactive
//! command decoding, terminal response and envelope encoding, and the
//! session state machine that sits between the radio and a toolkit UI.
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod protocol;
pub mod service;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the value types in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
