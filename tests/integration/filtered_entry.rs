//! Projections of entries by usage category and by search attribute list.

use crate::common::{entry_with_operational, registry};
use directory_core::{Attribute, FilteredEntry, UsageCategory, UsageFilter};

#[test]
fn test_directory_operation_projection() {
    let registry = registry();
    let entry = entry_with_operational(&registry);
    assert_eq!(entry.len(), 6);

    let projection = FilteredEntry::create(&entry, UsageCategory::DirectoryOperation, false);

    assert_eq!(projection.len(), 2);
    assert!(projection.contains_attribute(["createTimestamp", "creatorsName"]));
    assert!(projection.get("cn").is_none());
    assert!(
        projection
            .iter()
            .all(|attribute| attribute.attribute_type().usage() == UsageCategory::DirectoryOperation)
    );

    assert!(!std::ptr::eq(projection.dn(), entry.dn()));
    assert_eq!(projection.dn().to_string(), entry.dn().to_string());
}

#[test]
fn test_user_projection_and_types_only() {
    let registry = registry();
    let entry = entry_with_operational(&registry);

    let user = FilteredEntry::create(&entry, UsageCategory::UserApplications, false);
    assert_eq!(user.len(), 4);
    assert_eq!(user.get("cn").unwrap().len(), 2);

    let names = FilteredEntry::create(&entry, UsageCategory::UserApplications, true);
    assert_eq!(names.len(), 4);
    assert!(names.iter().all(Attribute::is_empty));
    assert_eq!(names.get("cn").unwrap().up_id(), "cn");
}

#[test]
fn test_projection_does_not_track_source() {
    let registry = registry();
    let mut entry = entry_with_operational(&registry);
    let projection = FilteredEntry::create(&entry, UsageFilter::All, false);

    entry.clear();
    assert_eq!(projection.len(), 6);
    assert!(projection.get("userPassword").is_some());
}

#[test]
fn test_search_attribute_selection() {
    let registry = registry();
    let entry = entry_with_operational(&registry);

    assert_eq!(FilteredEntry::select(&entry, &[], false).len(), 4);
    assert_eq!(FilteredEntry::select(&entry, &["+"], false).len(), 2);
    assert_eq!(FilteredEntry::select(&entry, &["*", "+"], false).len(), 6);
    assert_eq!(FilteredEntry::select(&entry, &["2.5.4.4", "creatorsname"], false).len(), 2);
    assert!(FilteredEntry::select(&entry, &["1.1"], false).is_empty());
}

#[test]
fn test_projection_materializes_as_entry() {
    let registry = registry();
    let entry = entry_with_operational(&registry);
    let operational = FilteredEntry::create(&entry, UsageFilter::Operational, false).to_entry();

    assert_eq!(operational.len(), 2);
    assert_eq!(operational.dn(), entry.dn());
    assert!(operational.contains("creatorsName", ["CN=Admin,OU=System"]));
}
