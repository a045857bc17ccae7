//! Entry lifecycle scenarios: attributes added under any identifier, looked
//! up by OID or alias, replaced and removed.

use crate::common::{person_entry, registry};
use directory_core::{Attribute, DirectoryError, Dn, Entry, Value, ValueInput};
use std::sync::Arc;

#[test]
fn test_lookup_by_oid_matches_lookup_by_name() {
    let registry = registry();
    let entry = person_entry(&registry);

    let by_oid = entry.get("2.5.4.3").expect("cn by OID");
    let by_name = entry.get("cn").expect("cn by name");
    assert_eq!(by_oid, by_name);
    assert!(std::ptr::eq(by_oid, by_name));

    assert_eq!(entry.get("sn").unwrap().len(), 2);
    assert_eq!(entry.get("userPassword").unwrap().get_bytes(), Some(&[0x61u8, 0x62][..]));
}

#[test]
fn test_remove_then_remove_again_yields_nothing() {
    let registry = registry();
    let mut entry = person_entry(&registry);
    let cn = registry.lookup("cn").unwrap();

    let removed = entry.remove(&[Attribute::new(&cn)]);
    assert_eq!(removed.len(), 1);
    assert!(removed[0].contains(["test1", "test2"]));

    assert!(entry.remove_attributes(["cn"]).is_none());
    assert_eq!(entry.len(), 2);
}

#[test]
fn test_put_returns_replaced_attribute() {
    let registry = registry();
    let cn = registry.lookup("cn").unwrap();
    let mut entry = Entry::new(Arc::clone(&registry), Dn::new("cn=test").unwrap());

    let first = Attribute::with_values(&cn, ["first"]);
    let second = Attribute::with_values(&cn, ["second", "third"]);

    assert!(entry.put_attribute(first.clone()).is_none());
    let replaced = entry.put_attribute(second.clone()).expect("first was replaced");
    assert_eq!(replaced, first);
    assert_eq!(entry.get(&cn), Some(&second));
}

#[test]
fn test_normalized_containment() {
    let registry = registry();
    let cn = registry.lookup("cn").unwrap();
    let mut attribute = Attribute::new(&cn);
    attribute.add(["Test  1"]);

    assert!(attribute.contains(["Test 1"]));
    assert!(attribute.contains(["  test 1 "]));
    assert!(!attribute.contains(["Test 2"]));
    // the raw form is kept for display
    assert_eq!(attribute.get_str(), Some("Test  1"));
}

#[test]
fn test_exact_matching_rule_is_case_sensitive() {
    let registry = registry();
    let password = registry.lookup("userPassword").unwrap();
    let mut attribute = Attribute::with_values(&password, [b"Secret".to_vec()]);

    assert!(attribute.contains([b"Secret".to_vec()]));
    assert!(!attribute.contains([b"secret".to_vec()]));
    assert_eq!(attribute.add([b"secret".to_vec()]), 1);
}

#[test]
fn test_wrong_kind_values_are_rejected_softly() {
    let registry = registry();
    let mut entry = Entry::new(Arc::clone(&registry), Dn::root());

    assert_eq!(entry.add("cn", [vec![1u8, 2, 3]]).unwrap(), 0);
    assert_eq!(entry.add("userPassword", ["plain text"]).unwrap(), 0);
    assert_eq!(entry.get("cn").map(Attribute::len), Some(0));
}

#[test]
fn test_single_valued_attribute_ignores_extra_values() {
    let registry = registry();
    let mut entry = Entry::new(Arc::clone(&registry), Dn::root());

    assert_eq!(entry.add("c", ["NZ", "AU"]).unwrap(), 1);
    assert_eq!(entry.add("c", ["US"]).unwrap(), 0);
    assert_eq!(entry.get("countryName").unwrap().len(), 1);
    assert!(entry.get("c").unwrap().is_valid());
}

#[test]
fn test_partial_value_removal_reports_failure() {
    let registry = registry();
    let cn = registry.lookup("cn").unwrap();
    let mut attribute = Attribute::with_values(&cn, ["a", "b", "c"]);

    assert!(!attribute.remove(["a", "missing"]));
    assert_eq!(attribute.len(), 2);
    assert!(attribute.remove(["b", "c"]));
    assert!(attribute.is_empty());
}

#[test]
fn test_up_id_is_preserved_and_checked() {
    let registry = registry();
    let cn = registry.lookup("cn").unwrap();
    let mut entry = Entry::new(Arc::clone(&registry), Dn::root());

    entry.add("  CommonName ", ["x"]).unwrap();
    let attribute = entry.get("cn").unwrap();
    assert_eq!(attribute.up_id(), "CommonName");
    assert_eq!(attribute.id(), "commonname");

    let mut renamed = attribute.clone();
    renamed.set_up_id("2.5.4.3").unwrap();
    assert_eq!(renamed.up_id(), "2.5.4.3");

    assert_directory_error!(renamed.set_up_id("sn"), DirectoryError::InvalidArgument { .. });
    assert_directory_error!(
        Attribute::with_up_id("surname", &cn),
        DirectoryError::InvalidArgument { .. }
    );
}

#[test]
fn test_unknown_and_blank_identifiers() {
    let registry = registry();
    let mut entry = Entry::new(Arc::clone(&registry), Dn::root());

    assert_directory_error!(
        entry.add("notInSchema", ["x"]),
        DirectoryError::NoSuchAttribute { .. }
    );
    assert_error_message_contains!(entry.put("  ", ["x"]), "blank");
    assert!(entry.get("notInSchema").is_none());
    assert!(!entry.contains_attribute(["notInSchema"]));
}

#[test]
fn test_typed_values_are_rebound() {
    let registry = registry();
    let mut entry = Entry::new(Arc::clone(&registry), Dn::root());

    let unbound = Value::text("Mixed CASE");
    entry.add("description", [unbound.clone()]).unwrap();
    assert!(entry.contains("description", ["mixed case"]));

    let stored = entry.get("description").unwrap().get().unwrap();
    assert_eq!(stored.attribute_type().unwrap().oid(), "2.5.4.13");
    assert!(unbound.attribute_type().is_none());

    let null = ValueInput::Text(None);
    assert_eq!(entry.add("description", [null]).unwrap(), 1);
    assert!(entry.get("description").unwrap().iter().any(Value::is_null));
}

#[test]
fn test_clone_is_independent() {
    let registry = registry();
    let entry = person_entry(&registry);
    let mut copy = entry.clone();
    assert_eq!(copy, entry);

    copy.remove_values("sn", ["test1"]);
    assert_ne!(copy, entry);
    assert_eq!(entry.get("sn").unwrap().len(), 2);
}

#[test]
fn test_ldif_rendering() {
    let registry = registry();
    let entry = person_entry(&registry);
    let ldif = entry.to_string();

    assert!(ldif.starts_with("dn: cn=test,ou=system\n"));
    assert!(ldif.contains("cn: test1\n"));
    assert!(ldif.contains("userPassword:: YWI=\n"));
}
