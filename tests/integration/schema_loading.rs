//! Registries assembled from schema files on disk.

use crate::common::{CUSTOM_SCHEMA_JSON, init_logging};
use directory_core::schema::embedded;
use directory_core::{Attribute, Dn, Entry, FilteredEntry, SchemaError, SchemaRegistry, UsageCategory};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn schema_dir() -> TempDir {
    init_logging();
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("00-core.json"), embedded::core_schema()).unwrap();
    fs::write(dir.path().join("10-example.json"), CUSTOM_SCHEMA_JSON).unwrap();
    fs::write(dir.path().join("README.txt"), "not a schema").unwrap();
    dir
}

#[test]
fn test_from_schema_dir_loads_in_name_order() {
    let dir = schema_dir();
    let registry = SchemaRegistry::from_schema_dir(dir.path()).unwrap();

    assert_eq!(registry.schemas().len(), 2);
    assert!(registry.get_schema("example").is_some());
    assert!(registry.get("createTimestamp").is_none());

    let nick = registry.lookup("nickName").unwrap();
    let name = registry.lookup("name").unwrap();
    assert_eq!(nick.superior(), Some(name.oid()));
    assert_eq!(nick.equality(), name.equality());
}

#[test]
fn test_custom_types_govern_values() {
    let dir = schema_dir();
    let registry = Arc::new(SchemaRegistry::from_schema_dir(dir.path()).unwrap());
    let mut entry = Entry::new(Arc::clone(&registry), Dn::new("uid=jdoe,dc=example").unwrap());

    assert_eq!(entry.add("badge", ["007", "8"]).unwrap(), 1);
    assert!(entry.contains("badgeNumber", ["7"]));

    assert_eq!(entry.add("badgePhoto", ["not bytes"]).unwrap(), 0);
    assert_eq!(entry.add("badgePhoto", [vec![0xFFu8, 0xD8]]).unwrap(), 1);

    entry.add("lastBadgeSwipe", ["20240301101500Z"]).unwrap();
    assert!(entry.contains("lastBadgeSwipe", ["20240301101500.000Z"]));

    let operational = FilteredEntry::create(&entry, UsageCategory::DirectoryOperation, false);
    assert_eq!(operational.len(), 1);
}

#[test]
fn test_copy_between_schema_contexts() {
    let dir = schema_dir();
    let custom = Arc::new(SchemaRegistry::from_schema_dir(dir.path()).unwrap());
    let mut entry = Entry::new(Arc::clone(&custom), Dn::new("cn=x").unwrap());
    entry.add("cn", ["X"]).unwrap();
    entry.add("badgeNumber", ["12"]).unwrap();

    let standard = Arc::new(SchemaRegistry::new().unwrap());
    let copy = entry.copy_to(Arc::clone(&standard));

    assert_eq!(copy.len(), 1);
    assert!(copy.contains("cn", ["x"]));
    assert!(Arc::ptr_eq(copy.registry(), &standard));
    assert!(Arc::ptr_eq(
        copy.get("cn").map(Attribute::attribute_type).unwrap(),
        &standard.lookup("cn").unwrap()
    ));
}

#[test]
fn test_invalid_schema_file() {
    init_logging();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ \"id\": \"broken\"").unwrap();

    assert!(matches!(
        SchemaRegistry::from_schema_dir(dir.path()),
        Err(SchemaError::Json(_))
    ));
}

#[test]
fn test_superior_from_later_file_is_unknown() {
    init_logging();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("00-example.json"), CUSTOM_SCHEMA_JSON).unwrap();
    fs::write(dir.path().join("10-core.json"), embedded::core_schema()).unwrap();

    assert!(matches!(
        SchemaRegistry::from_schema_dir(dir.path()),
        Err(SchemaError::UnknownSuperior { .. })
    ));
}
