//! Modify requests applied to entries.

use crate::common::{person_entry, registry};
use directory_core::{Attribute, DirectoryError, Modification, ModificationOperation};

#[test]
fn test_modify_request_in_order() {
    let registry = registry();
    let mut entry = person_entry(&registry);
    let cn = registry.lookup("cn").unwrap();
    let sn = registry.lookup("sn").unwrap();
    let mail = registry.lookup("mail").unwrap();

    let changes = vec![
        Modification::add(Attribute::with_values(&mail, ["test@example.com"])),
        Modification::remove(Attribute::with_values(&cn, ["TEST1"])),
        Modification::replace(Attribute::with_values(&sn, ["Tester"])),
        Modification::remove(Attribute::new(&registry.lookup("userPassword").unwrap())),
    ];
    entry.apply_modifications(&changes).unwrap();

    assert!(entry.contains("mail", ["TEST@example.com"]));
    assert!(entry.contains("cn", ["test2"]));
    assert!(!entry.contains("cn", ["test1"]));
    assert_eq!(entry.get("sn").unwrap().len(), 1);
    assert!(entry.get("userPassword").is_none());
}

#[test]
fn test_modification_parsed_from_ldif_keyword() {
    let registry = registry();
    let mut entry = person_entry(&registry);
    let sn = registry.lookup("sn").unwrap();

    let operation: ModificationOperation = "delete".parse().unwrap();
    entry
        .apply_modification(&Modification::new(operation, Attribute::new(&sn)))
        .unwrap();
    assert!(entry.get("sn").is_none());

    assert_directory_error!(
        "increment".parse::<ModificationOperation>(),
        DirectoryError::InvalidArgument { .. }
    );
}
