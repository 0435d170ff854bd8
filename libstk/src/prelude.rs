// libstk-rs/libstk/src/prelude.rs

//! Common imports for applications embedding the engine.

pub use crate::config::ServiceConfig;
pub use crate::protocol::commands::CommandParams;
pub use crate::service::{
    SessionState, StkCmdMessage, StkResponseMessage, StkService, StkServiceBuilder, UserData,
};
pub use crate::transport::{RadioInterface, ToolkitListener};
pub use crate::{CommandDetails, CommandType, Error, EventType, Result, ResultCode};

#[cfg(feature = "async")]
pub use crate::pipeline::{StkHandle, StkRuntime};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, parse_hex};
