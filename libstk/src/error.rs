// libstk-rs/libstk/src/error.rs

//! Crate error types.

use thiserror::Error;

use crate::types::ResultCode;

/// Failure while decoding a COMPREHENSION-TLV or BER-TLV byte stream.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before the object did
    #[error("truncated tlv: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required from the start of the input
        needed: usize,
        /// Bytes actually present
        available: usize,
    },

    /// Comprehension-required tag missing from the registry
    #[error("unknown comprehension-required tag {0:#04x}")]
    UnknownTag(u16),

    /// Invalid tag or length encoding
    #[error("malformed tlv: {0}")]
    Malformed(&'static str),
}

impl From<DecodeError> for ResultCode {
    fn from(_: DecodeError) -> Self {
        // Every codec-level failure means the terminal could not parse the
        // command data.
        ResultCode::CmdDataNotUnderstood
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// Wire data could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Radio payload is not valid hex
    #[error("invalid hex payload: {0}")]
    InvalidHex(String),

    /// Radio, runtime or setup failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The running engine is gone
    #[error("engine channel closed")]
    ChannelClosed,
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
