//! Property-Based Tests for Attributes and Entries
//!
//! Uses proptest to check that attribute invariants hold for arbitrary value
//! sets: adding is idempotent under normalized equality, single-valued types
//! never exceed one value, clones are independent and the transport form
//! round-trips.

use crate::common::registry;
use directory_core::{Attribute, Dn, Entry};
use proptest::prelude::*;
use std::sync::Arc;

/// Attribute types covering the textual matching rules.
fn attribute_id_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "cn",
        "description",
        "mail",
        "telephoneNumber",
        "uidNumber",
        "objectClass",
    ])
}

/// Single-valued types from the embedded schemas.
fn single_valued_id_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["c", "dc", "displayName", "uidNumber", "gidNumber"])
}

fn text_values_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9 ]{0,12}", 0..10)
}

prop_compose! {
    fn binary_values_strategy()
        (values in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 0..10))
        -> Vec<Vec<u8>> {
        values
    }
}

proptest! {
    #[test]
    fn test_add_is_idempotent(id in attribute_id_strategy(), values in text_values_strategy()) {
        let registry = registry();
        let attribute_type = registry.lookup(id).unwrap();
        let mut attribute = Attribute::new(&attribute_type);

        let first = attribute.add(values.iter());
        let size = attribute.len();
        let second = attribute.add(values.iter());

        prop_assert_eq!(first, size);
        prop_assert_eq!(second, 0);
        prop_assert_eq!(attribute.len(), size);
    }

    #[test]
    fn test_binary_add_is_idempotent(values in binary_values_strategy()) {
        let registry = registry();
        let password = registry.lookup("userPassword").unwrap();
        let mut attribute = Attribute::new(&password);

        attribute.add(values.clone());
        let size = attribute.len();
        prop_assert_eq!(attribute.add(values), 0);
        prop_assert_eq!(attribute.len(), size);
        prop_assert!(attribute.is_valid());
    }

    #[test]
    fn test_single_valued_never_exceeds_one(
        id in single_valued_id_strategy(),
        batches in prop::collection::vec(text_values_strategy(), 1..5)
    ) {
        let registry = registry();
        let attribute_type = registry.lookup(id).unwrap();
        let mut attribute = Attribute::new(&attribute_type);

        for batch in &batches {
            attribute.add(batch.iter());
            prop_assert!(attribute.len() <= 1);
        }
        prop_assert!(attribute.is_valid());
    }

    #[test]
    fn test_clone_is_independent(values in text_values_strategy(), extra in "_[a-z]{1,8}") {
        let registry = registry();
        let cn = registry.lookup("cn").unwrap();
        let original = Attribute::with_values(&cn, values.iter());

        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        // `extra` starts with '_' and so is never among the generated values
        prop_assert_eq!(copy.add([extra.as_str()]), 1);
        prop_assert_ne!(&copy, &original);
        prop_assert_eq!(copy.len(), original.len() + 1);
    }

    #[test]
    fn test_serialized_round_trip(id in attribute_id_strategy(), values in text_values_strategy()) {
        let registry = registry();
        let attribute_type = registry.lookup(id).unwrap();
        let attribute = Attribute::with_values(&attribute_type, values.iter());

        let restored = Attribute::from_json(&attribute.to_json().unwrap(), &registry).unwrap();
        prop_assert_eq!(&restored, &attribute);
        prop_assert_eq!(restored.up_id(), attribute.up_id());
        prop_assert_eq!(restored.id(), attribute.id());
    }

    #[test]
    fn test_removing_every_value_drops_the_attribute(values in text_values_strategy()) {
        let registry = registry();
        let mut entry = Entry::new(Arc::clone(&registry), Dn::root());
        entry.add("description", values.iter()).unwrap();

        let stored: Vec<String> = entry
            .get("description")
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();

        prop_assert!(entry.remove_values("description", stored.iter()));
        prop_assert!(entry.get("description").is_none());
    }
}
