// libstk-rs/libstk/src/protocol/mod.rs

//! Wire protocol: TLV codec, command decoders and response encoders.

pub mod ber;
pub mod codec;
pub mod commands;
pub mod parser;
pub mod responses;
pub mod tlv;

pub use ber::{BerTlv, EnvelopeBuilder};
pub use codec::{CommandDecodeError, decode_command, decode_proactive_command};
pub use commands::{
    BrowserSettings, CallSetup, CommandParams, DtmfMessage, Input, Item, LaunchBrowserMode, Menu,
    PresentationType, RefreshMode, RefreshParams, TextMessage, ToneSettings,
};
pub use responses::{
    DeviceIdentities, GetInkeyInputResponseData, ResponseData, SelectItemResponseData,
    TerminalResponse, encode_event_download, encode_menu_selection, encode_terminal_response,
};
pub use tlv::{ComprehensionTlv, TagRegistry, decode_comprehension_tlv, decode_many};
