//! Schema-governed directory entries for Rust.
//!
//! Provides the entry/attribute/value model of an LDAP-style directory. Every
//! attribute is bound to an attribute type resolved through a
//! [`SchemaRegistry`], and values are compared under the type's equality
//! matching rule.
//!
//! # Core Components
//!
//! - [`Entry`] - A distinguished name plus its attributes
//! - [`Attribute`] - Duplicate-free values of one attribute type
//! - [`Value`] - Text or binary datum with a cached normalized form
//! - [`FilteredEntry`] - Read-only projection of an entry by usage category
//! - [`SchemaRegistry`] - Attribute type resolution by OID or alias
//!
//! # Quick Start
//!
//! ```rust
//! use directory_core::{Dn, Entry, FilteredEntry, SchemaRegistry, UsageCategory};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(SchemaRegistry::new()?);
//! let mut entry = Entry::new(registry, Dn::new("cn=test,ou=system")?);
//!
//! entry.add("cn", ["test1", "test2"])?;
//! entry.add("sn", ["Test"])?;
//! entry.add("userPassword", [vec![0x61u8, 0x62]])?;
//! entry.add("createTimestamp", ["20240101120000Z"])?;
//!
//! assert_eq!(entry.get("2.5.4.3"), entry.get("commonName"));
//!
//! let user = FilteredEntry::create(&entry, UsageCategory::UserApplications, false);
//! assert_eq!(user.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod dn;
pub mod entry;
pub mod error;
pub mod schema;

// Re-export commonly used types for convenience
pub use dn::Dn;
pub use entry::{
    Attribute, AttributeId, Entry, EntryBuilder, FilteredEntry, Modification,
    ModificationOperation, SerializedAttribute, SerializedValue, UsageFilter, Value, ValueInput,
};
pub use error::{DirectoryError, DirectoryResult, SchemaError, SchemaResult};
pub use schema::{AttributeType, SchemaRegistry, UsageCategory};
