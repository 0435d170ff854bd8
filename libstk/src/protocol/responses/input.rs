// libstk-rs/libstk/src/protocol/responses/input.rs

//! GET INKEY / GET INPUT response data.

use crate::constants::{DCS_GSM_7BIT_PACKED, DCS_GSM_8BIT, DCS_UCS2, GET_INKEY_NO, GET_INKEY_YES};
use crate::protocol::parser::write_ber_length;
use crate::types::TagId;
use crate::utils::gsm;

use super::ResponseData;

/// TEXT STRING answering GET INKEY / GET INPUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetInkeyInputResponseData {
    /// Entered text
    Text {
        /// The text as typed
        text: String,
        /// Encode as UCS2
        ucs2: bool,
        /// Encode as packed GSM 7-bit (ignored with `ucs2`)
        packed: bool,
    },
    /// GET INKEY yes/no answer
    YesNo(bool),
}

impl GetInkeyInputResponseData {
    /// Text answer.
    pub fn text(text: impl Into<String>, ucs2: bool, packed: bool) -> Self {
        Self::Text {
            text: text.into(),
            ucs2,
            packed,
        }
    }

    /// Yes/no answer.
    pub fn yes_no(answer: bool) -> Self {
        Self::YesNo(answer)
    }

    fn coded(&self) -> (u8, Vec<u8>) {
        match self {
            Self::YesNo(true) => (DCS_GSM_8BIT, vec![GET_INKEY_YES]),
            Self::YesNo(false) => (DCS_GSM_8BIT, vec![GET_INKEY_NO]),
            Self::Text { text, ucs2: true, .. } => (DCS_UCS2, gsm::string_to_ucs2(text)),
            Self::Text {
                text, packed: true, ..
            } => (DCS_GSM_7BIT_PACKED, gsm::string_to_gsm7_packed(text)),
            Self::Text { text, .. } => (DCS_GSM_8BIT, gsm::string_to_gsm8(text)),
        }
    }
}

impl ResponseData for GetInkeyInputResponseData {
    fn format(&self, buf: &mut Vec<u8>) {
        let (dcs, data) = self.coded();
        buf.push(TagId::TEXT_STRING.as_u8() | crate::constants::COMPREHENSION_REQUIRED_FLAG);
        // DCS byte + data
        write_ber_length(buf, data.len() + 1);
        buf.push(dcs);
        buf.extend_from_slice(&data);
    }
}
