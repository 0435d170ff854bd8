// libstk-rs/libstk/src/transport/mod.rs

//! Collaborator interfaces of the engine and their mocks.

pub mod mock;
pub mod traits;

pub use mock::{ListenerEvent, MockRadio, RadioCall, RecordingListener};
pub use traits::{RadioInterface, ToolkitListener};
