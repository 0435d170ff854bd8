// libstk-rs/libstk/src/protocol/commands/menu.rs

//! SET UP MENU and SELECT ITEM.

use crate::protocol::tlv::{self, ComprehensionTlv};
use crate::types::{CommandDetails, ResultCode, TagId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Menu, fields};

/// SELECT ITEM presentation hint (qualifier bits 0-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PresentationType {
    /// No presentation hint
    #[default]
    NotSpecified,
    /// Choice of data values
    DataValues,
    /// Choice of navigation options
    NavigationOptions,
}

impl PresentationType {
    fn from_qualifier(qualifier: u8) -> Self {
        match qualifier & 0x03 {
            0x01 => Self::DataValues,
            0x03 => Self::NavigationOptions,
            _ => Self::NotSpecified,
        }
    }
}

/// SET UP MENU. The title is mandatory; a menu without any non-null item
/// asks the terminal to remove the current menu and decodes to an empty
/// item list.
pub fn decode_set_up_menu(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<Menu, ResultCode> {
    let title = fields::alpha_id(fields::required(tlvs, TagId::ALPHA_ID)?);
    let mut menu = decode_items(cmd_det, tlvs)?;
    menu.title = Some(title);
    menu.soft_key_preferred = cmd_det.command_qualifier & 0x01 != 0;
    Ok(menu)
}

/// SELECT ITEM. At least one item is required.
pub fn decode_select_item(
    cmd_det: &CommandDetails,
    tlvs: &[ComprehensionTlv],
) -> Result<Menu, ResultCode> {
    let mut menu = decode_items(cmd_det, tlvs)?;
    if menu.items.is_empty() {
        return Err(ResultCode::RequiredValuesMissing);
    }
    menu.title = tlv::find(tlvs, TagId::ALPHA_ID).map(fields::alpha_id);
    menu.presentation = PresentationType::from_qualifier(cmd_det.command_qualifier);
    menu.soft_key_preferred = cmd_det.command_qualifier & 0x04 != 0;
    Ok(menu)
}

// Fields shared by both menu commands.
fn decode_items(cmd_det: &CommandDetails, tlvs: &[ComprehensionTlv]) -> Result<Menu, ResultCode> {
    let mut menu = Menu {
        items: tlv::find_all(tlvs, TagId::ITEM).filter_map(fields::item).collect(),
        help_available: cmd_det.command_qualifier & 0x80 != 0,
        ..Menu::default()
    };

    if let Some(ctlv) = tlv::find(tlvs, TagId::ITEM_ID) {
        menu.default_item = Some(
            *ctlv
                .value
                .first()
                .ok_or(ResultCode::CmdDataNotUnderstood)?,
        );
    }
    if let Some(ctlv) = tlv::find(tlvs, TagId::ICON_ID) {
        menu.title_icon = Some(fields::icon_id(ctlv)?);
    }
    if let Some(ctlv) = tlv::find(tlvs, TagId::ITEM_ICON_ID_LIST) {
        let (self_explanatory, records) = fields::item_icon_list(ctlv)?;
        menu.items_icon_self_explanatory = self_explanatory;
        for (item, record) in menu.items.iter_mut().zip(records) {
            item.icon = Some(record);
        }
    }
    Ok(menu)
}
