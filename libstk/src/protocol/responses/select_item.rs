// libstk-rs/libstk/src/protocol/responses/select_item.rs

//! SELECT ITEM response data.

use crate::protocol::tlv::write_tlv;
use crate::types::TagId;

use super::ResponseData;

/// ITEM IDENTIFIER of the chosen SELECT ITEM entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectItemResponseData {
    /// Identifier of the chosen item
    pub id: u8,
}

impl SelectItemResponseData {
    /// Answer with item `id`.
    pub fn new(id: u8) -> Self {
        Self { id }
    }
}

impl ResponseData for SelectItemResponseData {
    fn format(&self, buf: &mut Vec<u8>) {
        write_tlv(buf, TagId::ITEM_ID, true, &[self.id]);
    }
}
