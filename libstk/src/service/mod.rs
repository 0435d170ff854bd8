// libstk-rs/libstk/src/service/mod.rs

//! Session state machine and the messages exchanged with the application.

pub mod builder;
pub mod dtmf;
pub mod engine;
pub mod message;
pub mod scheduler;

pub use builder::StkServiceBuilder;
pub use dtmf::PendingDtmf;
pub use engine::StkService;
pub use message::{
    MessageId, RilMessage, SessionState, StkCmdMessage, StkResponseMessage, UserData,
};
pub use scheduler::{ContinuationId, ManualScheduler, Scheduler};
