//! Fluent construction of entries.
//!
//! This module provides a builder that collects a DN and attributes and
//! reports the first failure when the entry is built, so chains of
//! `with_attribute` calls need a single `?`.

use super::entry::{AttributeId, Entry};
use super::value::ValueInput;
use crate::dn::Dn;
use crate::error::{DirectoryError, DirectoryResult};
use crate::schema::SchemaRegistry;
use chrono::Utc;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

const GENERALIZED_TIME_FORMAT: &str = "%Y%m%d%H%M%SZ";

/// Builder for [`Entry`].
///
/// # Example
/// ```rust
/// use directory_core::entry::EntryBuilder;
/// use directory_core::schema::SchemaRegistry;
/// use std::sync::Arc;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let registry = Arc::new(SchemaRegistry::new()?);
///     let entry = EntryBuilder::new(registry)
///         .with_dn("cn=jdoe,ou=people,dc=example,dc=com")
///         .with_object_classes(["top", "person"])
///         .with_attribute("cn", ["jdoe"])
///         .with_attribute("sn", ["Doe"])
///         .build()?;
///
///     assert!(entry.has_object_class("person"));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct EntryBuilder {
    entry: Entry,
    error: Option<DirectoryError>,
}

impl EntryBuilder {
    /// Start an entry at the root DN.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            entry: Entry::new(registry, Dn::root()),
            error: None,
        }
    }

    /// Set the DN from its string form.
    pub fn with_dn(mut self, dn: &str) -> Self {
        match Dn::new(dn) {
            Ok(dn) => self.entry.set_dn(dn),
            Err(e) => self.fail(e),
        }
        self
    }

    /// Add values to an attribute.
    pub fn with_attribute<'a, I>(mut self, id: impl Into<AttributeId<'a>>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        if self.error.is_none() {
            if let Err(e) = self.entry.add(id, values) {
                self.fail(e);
            }
        }
        self
    }

    /// Add values to the objectClass attribute.
    pub fn with_object_classes<I>(self, object_classes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        self.with_attribute("objectClass", object_classes)
    }

    /// Build the entry, or return the first error met while building.
    pub fn build(self) -> DirectoryResult<Entry> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.entry),
        }
    }

    /// Build the entry and stamp the operational attributes of a newly
    /// created entry: `createTimestamp`, `creatorsName`, `entryUUID` and
    /// `entryDN`. Values already present are left alone.
    pub fn build_with_operational(mut self, creator: &str) -> DirectoryResult<Entry> {
        let timestamp = Utc::now().format(GENERALIZED_TIME_FORMAT).to_string();
        let entry_dn = self.entry.dn().up_name().to_string();
        let stamps = [
            ("createTimestamp", timestamp),
            ("creatorsName", creator.to_string()),
            ("entryUUID", Uuid::new_v4().to_string()),
            ("entryDN", entry_dn),
        ];

        for (id, value) in stamps {
            if !self.entry.contains_attribute([id]) {
                self = self.with_attribute(id, [value]);
            }
        }
        self.build()
    }

    fn fail(&mut self, error: DirectoryError) {
        if self.error.is_none() {
            self.error = Some(error);
        } else {
            debug!("Ignoring subsequent builder error: {}", error);
        }
    }
}
