//! Utilities for libstk: small, reusable helpers used across the crate.
//!
//! `hex` converts between wire bytes and the hex strings exchanged with the
//! radio; `gsm` holds the SIM text codings (GSM 7-bit, 8-bit, UCS2 and the
//! alpha identifier formats).

pub mod gsm;
pub mod hex;

pub use hex::*;
