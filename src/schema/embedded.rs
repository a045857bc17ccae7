//! Embedded directory schemas.
//!
//! This module provides the core user attribute types (RFC 4519, plus the
//! commonly deployed inetOrgPerson/COSINE types) and the operational attribute
//! types (RFC 4512, RFC 4530, RFC 3296) as static JSON strings, so a registry
//! can be built without any schema files.

/// Returns the core user attribute types as a JSON string.
pub fn core_schema() -> &'static str {
    r#"{
  "id": "core",
  "name": "Core",
  "description": "User application attribute types",
  "attributeTypes": [
    {
      "oid": "2.5.4.0",
      "names": ["objectClass"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.38",
      "equality": "objectIdentifierMatch"
    },
    {
      "oid": "2.5.4.1",
      "names": ["aliasedObjectName", "aliasedEntryName"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "equality": "distinguishedNameMatch",
      "singleValued": true
    },
    {
      "oid": "2.5.4.41",
      "names": ["name"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch"
    },
    {
      "oid": "2.5.4.3",
      "names": ["cn", "commonName"],
      "description": "RFC4519: common name(s) for which the entity is known by",
      "sup": "name"
    },
    {
      "oid": "2.5.4.4",
      "names": ["sn", "surname"],
      "description": "RFC4519: last (family) name(s) for which the entity is known by",
      "sup": "name"
    },
    {
      "oid": "2.5.4.42",
      "names": ["givenName", "gn"],
      "sup": "name"
    },
    {
      "oid": "2.5.4.6",
      "names": ["c", "countryName"],
      "sup": "name",
      "singleValued": true
    },
    {
      "oid": "2.5.4.7",
      "names": ["l", "localityName"],
      "sup": "name"
    },
    {
      "oid": "2.5.4.8",
      "names": ["st", "stateOrProvinceName"],
      "sup": "name"
    },
    {
      "oid": "2.5.4.10",
      "names": ["o", "organizationName"],
      "sup": "name"
    },
    {
      "oid": "2.5.4.11",
      "names": ["ou", "organizationalUnitName"],
      "sup": "name"
    },
    {
      "oid": "2.5.4.12",
      "names": ["title"],
      "sup": "name"
    },
    {
      "oid": "2.5.4.13",
      "names": ["description"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch"
    },
    {
      "oid": "2.5.4.20",
      "names": ["telephoneNumber"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.50",
      "equality": "telephoneNumberMatch",
      "substring": "telephoneNumberSubstringsMatch"
    },
    {
      "oid": "2.5.4.31",
      "names": ["member"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "equality": "distinguishedNameMatch"
    },
    {
      "oid": "2.5.4.35",
      "names": ["userPassword"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.40",
      "equality": "octetStringMatch"
    },
    {
      "oid": "2.5.4.36",
      "names": ["userCertificate"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.8",
      "equality": "certificateExactMatch"
    },
    {
      "oid": "0.9.2342.19200300.100.1.1",
      "names": ["uid", "userid"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch"
    },
    {
      "oid": "0.9.2342.19200300.100.1.3",
      "names": ["mail", "rfc822Mailbox"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "equality": "caseIgnoreIA5Match",
      "substring": "caseIgnoreIA5SubstringsMatch"
    },
    {
      "oid": "0.9.2342.19200300.100.1.25",
      "names": ["dc", "domainComponent"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "equality": "caseIgnoreIA5Match",
      "substring": "caseIgnoreIA5SubstringsMatch",
      "singleValued": true
    },
    {
      "oid": "0.9.2342.19200300.100.1.60",
      "names": ["jpegPhoto"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.28"
    },
    {
      "oid": "2.16.840.1.113730.3.1.241",
      "names": ["displayName"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch",
      "singleValued": true
    },
    {
      "oid": "2.16.840.1.113730.3.1.3",
      "names": ["employeeNumber"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "equality": "caseIgnoreMatch",
      "singleValued": true
    },
    {
      "oid": "1.3.6.1.1.1.1.0",
      "names": ["uidNumber"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.27",
      "equality": "integerMatch",
      "ordering": "integerOrderingMatch",
      "singleValued": true
    },
    {
      "oid": "1.3.6.1.1.1.1.1",
      "names": ["gidNumber"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.27",
      "equality": "integerMatch",
      "ordering": "integerOrderingMatch",
      "singleValued": true
    }
  ]
}"#
}

/// Returns the operational attribute types as a JSON string.
pub fn operational_schema() -> &'static str {
    r#"{
  "id": "operational",
  "name": "Operational",
  "description": "Operational attribute types maintained by the server",
  "attributeTypes": [
    {
      "oid": "2.5.18.1",
      "names": ["createTimestamp"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.24",
      "equality": "generalizedTimeMatch",
      "ordering": "generalizedTimeOrderingMatch",
      "singleValued": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "2.5.18.2",
      "names": ["modifyTimestamp"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.24",
      "equality": "generalizedTimeMatch",
      "ordering": "generalizedTimeOrderingMatch",
      "singleValued": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "2.5.18.3",
      "names": ["creatorsName"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "equality": "distinguishedNameMatch",
      "singleValued": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "2.5.18.4",
      "names": ["modifiersName"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "equality": "distinguishedNameMatch",
      "singleValued": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "2.5.18.10",
      "names": ["subschemaSubentry"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "equality": "distinguishedNameMatch",
      "singleValued": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "1.3.6.1.1.16.4",
      "names": ["entryUUID"],
      "syntax": "1.3.6.1.1.16.1",
      "equality": "uuidMatch",
      "ordering": "uuidOrderingMatch",
      "singleValued": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "1.3.6.1.1.20",
      "names": ["entryDN"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "equality": "distinguishedNameMatch",
      "singleValued": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "2.16.840.1.113730.3.1.34",
      "names": ["ref"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "equality": "caseExactMatch",
      "usage": "distributedOperation"
    },
    {
      "oid": "1.3.6.1.4.1.4203.666.1.7",
      "names": ["entryCSN"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "equality": "caseExactIA5Match",
      "singleValued": true,
      "usage": "dSAOperation"
    },
    {
      "oid": "1.3.6.1.4.1.4203.666.1.25",
      "names": ["contextCSN"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "equality": "caseExactIA5Match",
      "usage": "dSAOperation"
    }
  ]
}"#
}
