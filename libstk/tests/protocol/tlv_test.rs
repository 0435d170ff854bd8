#[path = "../common/mod.rs"]
mod common;

use libstk::error::DecodeError;
use libstk::protocol::tlv::{TagRegistry, decode_comprehension_tlv, decode_many, write_tlv};
use libstk::protocol::{BerTlv, decode_proactive_command};
use libstk::TagId;

#[test]
fn short_and_long_length_forms() {
    let (short, next) = decode_comprehension_tlv(&[0x85, 0x02, 0x41, 0x42], 0).unwrap();
    assert_eq!(short.tag, TagId::ALPHA_ID);
    assert!(short.comprehension_required);
    assert_eq!(short.length, 2);
    assert_eq!(short.value, b"AB");
    assert_eq!(next, 4);

    let mut long = vec![0x0d, 0x81, 0x90, 0x04];
    long.extend_from_slice(&[0x41; 0x8f]);
    let (tlv, next) = decode_comprehension_tlv(&long, 0).unwrap();
    assert_eq!(tlv.tag, TagId::TEXT_STRING);
    assert_eq!(tlv.length, 0x90);
    assert!(!tlv.comprehension_required);
    assert_eq!(next, long.len());
}

#[test]
fn three_byte_tag() {
    // 0x7f escape, comprehension required, tag 0x0031 (URL)
    let (tlv, next) = decode_comprehension_tlv(&[0x7f, 0x80, 0x31, 0x01, 0x61], 0).unwrap();
    assert_eq!(tlv.tag, TagId::URL);
    assert!(tlv.comprehension_required);
    assert_eq!(tlv.value, b"a");
    assert_eq!(next, 5);
}

#[test]
fn unknown_tags_depend_on_comprehension_flag() {
    // tag 0x3e is not in the registry
    let err = decode_comprehension_tlv(&[0xbe, 0x01, 0x00], 0).unwrap_err();
    assert_eq!(err, DecodeError::UnknownTag(0x3e));

    let (tlv, _) = decode_comprehension_tlv(&[0x3e, 0x01, 0x00], 0).unwrap();
    assert_eq!(tlv.tag, TagId::new(0x3e));
}

#[test]
fn vendor_tag_can_be_registered() {
    let registry = TagRegistry::standard().with_tag(TagId::new(0x3e));
    let (tlv, _) = registry.decode(&[0xbe, 0x01, 0x07], 0).unwrap();
    assert_eq!(tlv.value, vec![0x07]);
}

#[test]
fn truncated_value_is_reported() {
    let err = decode_comprehension_tlv(&[0x85, 0x05, 0x41], 0).unwrap_err();
    assert!(matches!(err, DecodeError::Truncated { .. }));
    assert!(decode_many(&[0x81, 0x03, 0x01]).is_err());
}

#[test]
fn written_objects_decode_back() {
    let mut buf = Vec::new();
    write_tlv(&mut buf, TagId::COMMAND_DETAILS, true, &[1, 0x25, 0]);
    write_tlv(&mut buf, TagId::ITEM, false, &[1, b'A']);
    let tlvs = decode_many(&buf).unwrap();
    assert_eq!(tlvs.len(), 2);
    assert_eq!(tlvs[1].tag, TagId::ITEM);
    assert!(!tlvs[1].comprehension_required);
}

#[test]
fn container_length_must_match() {
    let bytes = hex::decode(common::fixtures::MENU_HEX).unwrap();
    let objects = decode_proactive_command(&bytes).unwrap();
    assert_eq!(objects.len(), 4);

    let mut trailing = bytes.clone();
    trailing.push(0x00);
    assert!(BerTlv::body(&trailing).is_err());

    let truncated = hex::decode(common::fixtures::TRUNCATED_MENU_HEX).unwrap();
    assert!(matches!(
        decode_proactive_command(&truncated),
        Err(DecodeError::Truncated { .. })
    ));
}
