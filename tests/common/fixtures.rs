//! Test fixtures: registries, sample entries and schema documents.

use directory_core::{Dn, Entry, SchemaRegistry};
use std::sync::Arc;

/// Route library logging to the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A registry holding the embedded core and operational schemas.
pub fn registry() -> Arc<SchemaRegistry> {
    init_logging();
    Arc::new(SchemaRegistry::new().expect("Failed to create schema registry"))
}

/// The entry used throughout the lifecycle scenarios.
pub fn person_entry(registry: &Arc<SchemaRegistry>) -> Entry {
    let mut entry = Entry::new(
        Arc::clone(registry),
        Dn::new("cn=test,ou=system").expect("valid DN"),
    );
    entry.add("cn", ["test1", "test2"]).expect("cn is embedded");
    entry.add("sn", ["Test1", "Test2"]).expect("sn is embedded");
    entry
        .add("userPassword", [vec![0x61u8, 0x62]])
        .expect("userPassword is embedded");
    entry
}

/// An entry with four user attributes and two directory-operation attributes.
pub fn entry_with_operational(registry: &Arc<SchemaRegistry>) -> Entry {
    let mut entry = person_entry(registry);
    entry
        .add("objectClass", ["top", "person"])
        .expect("objectClass is embedded");
    entry
        .add("createTimestamp", ["20240101120000Z"])
        .expect("createTimestamp is embedded");
    entry
        .add("creatorsName", ["cn=admin,ou=system"])
        .expect("creatorsName is embedded");
    entry
}

/// A schema document extending the embedded schemas.
pub const CUSTOM_SCHEMA_JSON: &str = r#"{
    "id": "example",
    "name": "Example Corp",
    "description": "Site-specific attribute types",
    "attributeTypes": [
        {
            "oid": "1.3.6.1.4.1.99999.1.1",
            "names": ["badgeNumber", "badge"],
            "syntax": "1.3.6.1.4.1.1466.115.121.1.27",
            "equality": "integerMatch",
            "singleValued": true
        },
        {
            "oid": "1.3.6.1.4.1.99999.1.2",
            "names": ["nickName"],
            "sup": "name"
        },
        {
            "oid": "1.3.6.1.4.1.99999.1.3",
            "names": ["badgePhoto"],
            "syntax": "1.3.6.1.4.1.1466.115.121.1.28"
        },
        {
            "oid": "1.3.6.1.4.1.99999.1.4",
            "names": ["lastBadgeSwipe"],
            "syntax": "1.3.6.1.4.1.1466.115.121.1.24",
            "equality": "generalizedTimeMatch",
            "singleValued": true,
            "usage": "directoryOperation"
        }
    ]
}"#;
