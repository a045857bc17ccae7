//! Transport form of attributes.

use crate::common::{person_entry, registry};
use directory_core::{Attribute, DirectoryError, SerializedAttribute};

#[test]
fn test_round_trip_preserves_identity() {
    let registry = registry();
    let entry = person_entry(&registry);
    let cn = registry.lookup("cn").unwrap();

    let mut attribute = Attribute::with_up_id("CommonName", &cn).unwrap();
    attribute.add(["Test  1", "test 2"]);

    let json = attribute.to_json().unwrap();
    let restored = Attribute::from_json(&json, &registry).unwrap();

    assert_eq!(restored, attribute);
    assert_eq!(restored.up_id(), "CommonName");
    assert_eq!(restored.id(), "commonname");
    assert_eq!(restored.is_human_readable(), attribute.is_human_readable());
    assert_eq!(restored.get_str(), Some("Test  1"));

    for original in &entry {
        let restored = Attribute::from_serialized(original.to_serialized(), &registry).unwrap();
        assert_eq!(&restored, original);
        assert_eq!(restored.up_id(), original.up_id());
    }
}

#[test]
fn test_record_fields() {
    let registry = registry();
    let entry = person_entry(&registry);
    let record: SerializedAttribute = entry.get("userPassword").unwrap().to_serialized();

    assert_eq!(record.up_id, "userPassword");
    assert_eq!(record.attribute_type, "2.5.4.35");
    assert!(!record.is_human_readable);
    assert_eq!(record.value_count, 1);
    assert_eq!(record.values[0].bytes.as_deref(), Some("YWI="));
    assert!(record.values[0].text.is_none());
}

#[test]
fn test_tampered_record_is_rejected() {
    let registry = registry();
    let entry = person_entry(&registry);
    let mut record = entry.get("sn").unwrap().to_serialized();
    record.value_count = 5;

    assert_directory_error!(
        Attribute::from_serialized(record.clone(), &registry),
        DirectoryError::Serialization { .. }
    );

    record.value_count = record.values.len();
    record.up_id = "givenName".to_string();
    assert_directory_error!(
        Attribute::from_serialized(record, &registry),
        DirectoryError::InvalidArgument { .. }
    );
}
