//! Filtered views of entries.
//!
//! A [`FilteredEntry`] is a read-only snapshot of an [`Entry`] restricted to
//! attributes of a usage category, or to an explicit attribute selection as
//! found in search requests. It owns its own copy of the DN and attributes and
//! keeps no link back to the source entry.

use super::attribute::Attribute;
use super::entry::{AttributeId, Entry};
use crate::dn::Dn;
use crate::schema::{AttributeType, SchemaRegistry, UsageCategory};
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

/// Selection of "all user attributes" in a search attribute list.
pub const ALL_USER_ATTRIBUTES: &str = "*";
/// Selection of "all operational attributes" in a search attribute list.
pub const ALL_OPERATIONAL_ATTRIBUTES: &str = "+";
/// Selection of "no attributes" in a search attribute list.
pub const NO_ATTRIBUTES: &str = "1.1";

/// Which attributes a usage-based projection keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UsageFilter {
    /// Attributes of exactly this usage category
    Category(UsageCategory),
    /// Every operational attribute, whatever its category
    Operational,
    /// Every attribute
    #[default]
    All,
}

impl UsageFilter {
    pub fn accepts(&self, attribute_type: &AttributeType) -> bool {
        match self {
            Self::Category(usage) => attribute_type.usage() == *usage,
            Self::Operational => attribute_type.is_operational(),
            Self::All => true,
        }
    }
}

impl From<UsageCategory> for UsageFilter {
    fn from(usage: UsageCategory) -> Self {
        Self::Category(usage)
    }
}

impl From<Option<UsageCategory>> for UsageFilter {
    fn from(usage: Option<UsageCategory>) -> Self {
        usage.map_or(Self::All, Self::Category)
    }
}

/// A read-only projection of an entry.
///
/// # Examples
///
/// ```rust
/// use directory_core::dn::Dn;
/// use directory_core::entry::{Entry, FilteredEntry};
/// use directory_core::schema::{SchemaRegistry, UsageCategory};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = Arc::new(SchemaRegistry::new()?);
/// let mut entry = Entry::new(registry, Dn::new("cn=test")?);
/// entry.add("cn", ["test"])?;
/// entry.add("createTimestamp", ["20240101000000Z"])?;
///
/// let operational = FilteredEntry::create(&entry, UsageCategory::DirectoryOperation, false);
/// assert_eq!(operational.len(), 1);
/// assert!(operational.get("createTimestamp").is_some());
/// assert!(operational.get("cn").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FilteredEntry {
    registry: Arc<SchemaRegistry>,
    dn: Dn,
    attributes: HashMap<String, Attribute>,
    types_only: bool,
}

impl FilteredEntry {
    /// Project `entry` onto the attributes accepted by `filter`.
    ///
    /// With `types_only`, every retained attribute is kept but emptied.
    pub fn create(entry: &Entry, filter: impl Into<UsageFilter>, types_only: bool) -> Self {
        let filter = filter.into();
        let attributes = entry
            .iter()
            .filter(|attribute| filter.accepts(attribute.attribute_type()))
            .map(|attribute| project(attribute, types_only))
            .collect();
        trace!("Projected {} with {:?}", entry.dn(), filter);
        Self::from_parts(entry, attributes, types_only)
    }

    /// Project `entry` onto a search attribute list.
    ///
    /// `*` selects all user attributes, `+` all operational attributes and
    /// `1.1` nothing; other identifiers select their attribute. Unknown
    /// identifiers are ignored. An empty list selects all user attributes.
    pub fn select(entry: &Entry, requested: &[&str], types_only: bool) -> Self {
        let registry = entry.registry();
        let wants = |id: &str| requested.iter().any(|r| r.trim() == id);

        let all_user = requested.is_empty() || wants(ALL_USER_ATTRIBUTES);
        let all_operational = wants(ALL_OPERATIONAL_ATTRIBUTES);
        let named: Vec<Arc<AttributeType>> = requested
            .iter()
            .map(|r| r.trim())
            .filter(|r| ![ALL_USER_ATTRIBUTES, ALL_OPERATIONAL_ATTRIBUTES, NO_ATTRIBUTES].contains(r))
            .filter_map(|r| registry.get(r))
            .collect();

        let attributes = entry
            .iter()
            .filter(|attribute| {
                let attribute_type = attribute.attribute_type();
                (all_user && !attribute_type.is_operational())
                    || (all_operational && attribute_type.is_operational())
                    || named.iter().any(|n| n.oid() == attribute_type.oid())
            })
            .map(|attribute| project(attribute, types_only))
            .collect();
        Self::from_parts(entry, attributes, types_only)
    }

    fn from_parts(entry: &Entry, attributes: HashMap<String, Attribute>, types_only: bool) -> Self {
        Self {
            registry: Arc::clone(entry.registry()),
            dn: entry.dn().clone(),
            attributes,
            types_only,
        }
    }

    pub fn dn(&self) -> &Dn {
        &self.dn
    }

    /// Whether the projection was built without values.
    pub fn is_types_only(&self) -> bool {
        self.types_only
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Get a retained attribute, resolving `id` like [`Entry::get`].
    pub fn get<'a>(&self, id: impl Into<AttributeId<'a>>) -> Option<&Attribute> {
        let id: AttributeId<'_> = id.into();
        let (attribute_type, _) = id.resolve(&self.registry).ok()?;
        self.attributes.get(attribute_type.oid())
    }

    /// True iff an attribute is retained for every identifier.
    pub fn contains_attribute<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<AttributeId<'a>>,
    {
        ids.into_iter().all(|id| self.get(id).is_some())
    }

    /// Materialize the projection as a standalone entry.
    pub fn to_entry(&self) -> Entry {
        Entry::with_attributes(
            Arc::clone(&self.registry),
            self.dn.clone(),
            self.attributes.values().cloned(),
        )
    }
}

fn project(attribute: &Attribute, types_only: bool) -> (String, Attribute) {
    let mut copy = attribute.clone();
    if types_only {
        copy.clear();
    }
    (attribute.attribute_type().oid().to_string(), copy)
}
