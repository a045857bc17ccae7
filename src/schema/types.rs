//! Core schema type definitions for directory attributes.
//!
//! This module contains the serialized schema format ([`Schema`] and
//! [`AttributeTypeDefinition`]) and the resolved, immutable [`AttributeType`]
//! descriptor that values, attributes and entries are bound to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named collection of attribute type definitions.
///
/// Schemas are the unit of loading: the registry is assembled from one or more
/// of them, either embedded in the library or read from JSON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Unique schema identifier
    pub id: String,
    /// Human-readable schema name
    pub name: String,
    /// Schema description
    #[serde(default)]
    pub description: String,
    /// Attribute type definitions declared by this schema
    pub attribute_types: Vec<AttributeTypeDefinition>,
}

/// Definition of an attribute type as written in a schema file.
///
/// Definitions may omit syntax and matching rules when they name a superior
/// type (`sup`); the registry fills those in when it resolves the definition
/// into an [`AttributeType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeTypeDefinition {
    /// Numeric object identifier
    pub oid: String,
    /// Name aliases, the first one being the preferred name
    #[serde(default)]
    pub names: Vec<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Superior attribute type (name or OID)
    #[serde(default)]
    pub sup: Option<String>,
    /// Syntax OID
    #[serde(default)]
    pub syntax: Option<String>,
    /// Equality matching rule (name or OID)
    #[serde(default)]
    pub equality: Option<String>,
    /// Ordering matching rule (name or OID)
    #[serde(default)]
    pub ordering: Option<String>,
    /// Substring matching rule (name or OID)
    #[serde(default)]
    pub substring: Option<String>,
    /// Whether the attribute may hold at most one value
    #[serde(default)]
    pub single_valued: bool,
    /// Usage category
    #[serde(default)]
    pub usage: UsageCategory,
    /// Overrides the human-readable flag derived from the syntax
    #[serde(default)]
    pub human_readable: Option<bool>,
}

impl Default for AttributeTypeDefinition {
    fn default() -> Self {
        Self {
            oid: String::new(),
            names: Vec::new(),
            description: None,
            sup: None,
            syntax: None,
            equality: None,
            ordering: None,
            substring: None,
            single_valued: false,
            usage: UsageCategory::UserApplications,
            human_readable: None,
        }
    }
}

/// Attribute usage categories as defined in RFC 4512.
///
/// Everything except [`UsageCategory::UserApplications`] is operational
/// and hidden from searches unless explicitly requested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum UsageCategory {
    /// End-user data
    #[default]
    UserApplications,
    /// Operational data shared by all servers (timestamps, creator names)
    DirectoryOperation,
    /// Operational data shared across a distributed directory
    DistributedOperation,
    /// Operational data local to one server
    #[serde(rename = "dSAOperation", alias = "dsaOperation")]
    DsaOperation,
}

impl UsageCategory {
    /// Returns true for every category except user applications.
    pub fn is_operational(&self) -> bool {
        !matches!(self, Self::UserApplications)
    }
}

impl fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserApplications => "userApplications",
            Self::DirectoryOperation => "directoryOperation",
            Self::DistributedOperation => "distributedOperation",
            Self::DsaOperation => "dSAOperation",
        };
        f.write_str(name)
    }
}

/// Well-known syntax OIDs.
pub mod syntax {
    pub const BINARY: &str = "1.3.6.1.4.1.1466.115.121.1.5";
    pub const BOOLEAN: &str = "1.3.6.1.4.1.1466.115.121.1.7";
    pub const CERTIFICATE: &str = "1.3.6.1.4.1.1466.115.121.1.8";
    pub const CERTIFICATE_LIST: &str = "1.3.6.1.4.1.1466.115.121.1.9";
    pub const CERTIFICATE_PAIR: &str = "1.3.6.1.4.1.1466.115.121.1.10";
    pub const DN: &str = "1.3.6.1.4.1.1466.115.121.1.12";
    pub const DIRECTORY_STRING: &str = "1.3.6.1.4.1.1466.115.121.1.15";
    pub const GENERALIZED_TIME: &str = "1.3.6.1.4.1.1466.115.121.1.24";
    pub const IA5_STRING: &str = "1.3.6.1.4.1.1466.115.121.1.26";
    pub const INTEGER: &str = "1.3.6.1.4.1.1466.115.121.1.27";
    pub const JPEG: &str = "1.3.6.1.4.1.1466.115.121.1.28";
    pub const OID: &str = "1.3.6.1.4.1.1466.115.121.1.38";
    pub const OCTET_STRING: &str = "1.3.6.1.4.1.1466.115.121.1.40";
    pub const TELEPHONE_NUMBER: &str = "1.3.6.1.4.1.1466.115.121.1.50";
    pub const UUID: &str = "1.3.6.1.1.16.1";

    /// Whether values of the given syntax are text rather than opaque bytes.
    ///
    /// Unknown syntaxes are treated as human readable.
    pub fn is_human_readable(oid: &str) -> bool {
        !matches!(
            oid.trim(),
            BINARY | CERTIFICATE | CERTIFICATE_LIST | CERTIFICATE_PAIR | JPEG | OCTET_STRING
        )
    }
}

/// A resolved attribute type.
///
/// Immutable once built by the registry and shared through `Arc`. Values,
/// attributes and entries all hold a reference to the type that governs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeType {
    pub(crate) oid: String,
    pub(crate) names: Vec<String>,
    pub(crate) description: Option<String>,
    pub(crate) superior: Option<String>,
    pub(crate) syntax: String,
    pub(crate) human_readable: bool,
    pub(crate) single_valued: bool,
    pub(crate) equality: Option<String>,
    pub(crate) ordering: Option<String>,
    pub(crate) substring: Option<String>,
    pub(crate) usage: UsageCategory,
}

impl AttributeType {
    /// Create a standalone attribute type with no matching rules.
    ///
    /// Mostly useful for tests and for callers that build registries by hand;
    /// schema files go through [`crate::schema::SchemaRegistry`] instead.
    pub fn new(oid: impl Into<String>, names: &[&str], syntax: impl Into<String>) -> Self {
        let syntax = syntax.into();
        Self {
            oid: oid.into(),
            names: names.iter().map(|n| n.to_string()).collect(),
            description: None,
            superior: None,
            human_readable: syntax::is_human_readable(&syntax),
            syntax,
            single_valued: false,
            equality: None,
            ordering: None,
            substring: None,
            usage: UsageCategory::UserApplications,
        }
    }

    /// Set the equality matching rule.
    pub fn with_equality(mut self, rule: impl Into<String>) -> Self {
        self.equality = Some(rule.into());
        self
    }

    /// Mark the type single-valued.
    pub fn single_valued(mut self) -> Self {
        self.single_valued = true;
        self
    }

    /// Set the usage category.
    pub fn with_usage(mut self, usage: UsageCategory) -> Self {
        self.usage = usage;
        self
    }

    /// Numeric object identifier.
    pub fn oid(&self) -> &str {
        &self.oid
    }

    /// All name aliases, preferred name first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The preferred name, or the OID when the type is unnamed.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or(&self.oid)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// OID of the superior type, if any.
    pub fn superior(&self) -> Option<&str> {
        self.superior.as_deref()
    }

    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    pub fn is_human_readable(&self) -> bool {
        self.human_readable
    }

    pub fn is_single_valued(&self) -> bool {
        self.single_valued
    }

    pub fn equality(&self) -> Option<&str> {
        self.equality.as_deref()
    }

    pub fn ordering(&self) -> Option<&str> {
        self.ordering.as_deref()
    }

    pub fn substring(&self) -> Option<&str> {
        self.substring.as_deref()
    }

    pub fn usage(&self) -> UsageCategory {
        self.usage
    }

    pub fn is_operational(&self) -> bool {
        self.usage.is_operational()
    }

    /// Whether `id` names this type: the OID or any alias, ignoring case and
    /// surrounding whitespace.
    pub fn is_named(&self, id: &str) -> bool {
        let id = id.trim();
        self.oid.eq_ignore_ascii_case(id) || self.names.iter().any(|n| n.eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.oid)
    }
}
