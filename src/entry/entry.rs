//! Directory entries.
//!
//! An [`Entry`] is a distinguished name plus at most one [`Attribute`] per
//! attribute type. Attributes are addressed by any identifier of their type:
//! the OID, any alias in any case, or the resolved [`AttributeType`] itself.
//!
//! Entries carry the [`SchemaRegistry`] they were created against. The
//! registry is shared and read-only; everything else in the entry is owned,
//! so `clone()` yields a fully independent copy.

use super::attribute::Attribute;
use super::value::ValueInput;
use crate::dn::Dn;
use crate::error::{DirectoryError, DirectoryResult};
use crate::schema::{AttributeType, SchemaRegistry};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const OBJECT_CLASS_OID: &str = "2.5.4.0";

/// Identifies an attribute within an entry.
///
/// Strings and attribute types convert into this through `From`, so entry
/// methods accept `"cn"`, `"2.5.4.3"`, `&cn_type` or `("CommonName", &cn_type)`.
#[derive(Debug, Clone, Copy)]
pub enum AttributeId<'a> {
    /// An OID or alias, resolved through the entry's registry
    Name(&'a str),
    /// A resolved type; the up id is the type's preferred name
    Type(&'a Arc<AttributeType>),
    /// An up id that must name the supplied type
    Named(&'a str, &'a Arc<AttributeType>),
}

impl<'a> AttributeId<'a> {
    /// Resolve to an attribute type and the up id to use for new attributes.
    pub fn resolve(&self, registry: &SchemaRegistry) -> DirectoryResult<(Arc<AttributeType>, String)> {
        match *self {
            Self::Name(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(DirectoryError::invalid_argument(
                        "attribute identifier cannot be blank",
                    ));
                }
                Ok((registry.lookup(trimmed)?, trimmed.to_string()))
            }
            Self::Type(attribute_type) => Ok((
                Arc::clone(attribute_type),
                attribute_type.name().to_string(),
            )),
            Self::Named(up_id, attribute_type) => {
                let trimmed = up_id.trim();
                if trimmed.is_empty() {
                    return Ok((
                        Arc::clone(attribute_type),
                        attribute_type.name().to_string(),
                    ));
                }
                if !attribute_type.is_named(trimmed) {
                    return Err(DirectoryError::invalid_argument(format!(
                        "'{}' does not name attribute type {}",
                        trimmed, attribute_type
                    )));
                }
                Ok((Arc::clone(attribute_type), trimmed.to_string()))
            }
        }
    }
}

impl<'a> From<&'a str> for AttributeId<'a> {
    fn from(value: &'a str) -> Self {
        Self::Name(value)
    }
}

impl<'a> From<&'a String> for AttributeId<'a> {
    fn from(value: &'a String) -> Self {
        Self::Name(value.as_str())
    }
}

impl<'a> From<&'a Arc<AttributeType>> for AttributeId<'a> {
    fn from(value: &'a Arc<AttributeType>) -> Self {
        Self::Type(value)
    }
}

impl<'a> From<(&'a str, &'a Arc<AttributeType>)> for AttributeId<'a> {
    fn from((up_id, attribute_type): (&'a str, &'a Arc<AttributeType>)) -> Self {
        Self::Named(up_id, attribute_type)
    }
}

/// A directory entry.
///
/// # Examples
///
/// ```rust
/// use directory_core::dn::Dn;
/// use directory_core::entry::Entry;
/// use directory_core::schema::SchemaRegistry;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = Arc::new(SchemaRegistry::new()?);
/// let mut entry = Entry::new(registry, Dn::new("cn=test,ou=system")?);
///
/// entry.add("cn", ["test1", "test2"])?;
/// entry.add("userPassword", [vec![0x61u8, 0x62]])?;
///
/// assert_eq!(entry.get("2.5.4.3"), entry.get("CommonName"));
/// assert!(entry.contains("cn", ["TEST1"]));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Entry {
    registry: Arc<SchemaRegistry>,
    dn: Dn,
    /// Attributes keyed by their type's OID
    attributes: HashMap<String, Attribute>,
}

impl Entry {
    /// Create an empty entry.
    pub fn new(registry: Arc<SchemaRegistry>, dn: Dn) -> Self {
        Self {
            registry,
            dn,
            attributes: HashMap::new(),
        }
    }

    /// Create an entry holding `attributes`, merging any that share a type.
    pub fn with_attributes<I>(registry: Arc<SchemaRegistry>, dn: Dn, attributes: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        let mut entry = Self::new(registry, dn);
        entry.add_attributes(attributes);
        entry
    }

    /// The schema context this entry resolves identifiers against.
    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn dn(&self) -> &Dn {
        &self.dn
    }

    pub fn set_dn(&mut self, dn: Dn) {
        self.dn = dn;
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Types of the attributes present.
    pub fn attribute_types(&self) -> impl Iterator<Item = &Arc<AttributeType>> {
        self.attributes.values().map(Attribute::attribute_type)
    }

    /// Add values to the attribute named by `id`, creating it if needed.
    ///
    /// Returns how many values were actually stored. Unknown identifiers fail
    /// with `NoSuchAttribute`, blank ones and mismatched up ids with
    /// `InvalidArgument`.
    pub fn add<'a, I>(&mut self, id: impl Into<AttributeId<'a>>, values: I) -> DirectoryResult<usize>
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        let id: AttributeId<'_> = id.into();
        let (attribute_type, up_id) = id.resolve(&self.registry)?;
        let attribute = self
            .attributes
            .entry(attribute_type.oid().to_string())
            .or_insert_with(|| new_attribute(&attribute_type, &up_id));
        Ok(attribute.add(values))
    }

    /// Merge whole attributes into the entry.
    ///
    /// An attribute whose type is already present contributes its values to
    /// the existing attribute; otherwise it is inserted as is. Returns how many
    /// values were stored.
    pub fn add_attributes<I>(&mut self, attributes: I) -> usize
    where
        I: IntoIterator<Item = Attribute>,
    {
        let mut added = 0;
        for attribute in attributes {
            let oid = attribute.attribute_type().oid().to_string();
            match self.attributes.get_mut(&oid) {
                Some(existing) => added += existing.add(attribute.values().to_vec()),
                None => {
                    added += attribute.len();
                    self.attributes.insert(oid, attribute);
                }
            }
        }
        added
    }

    /// Replace the attribute named by `id` with one holding `values`.
    ///
    /// Returns the attribute previously held for that type.
    pub fn put<'a, I>(&mut self, id: impl Into<AttributeId<'a>>, values: I) -> DirectoryResult<Option<Attribute>>
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        let id: AttributeId<'_> = id.into();
        let (attribute_type, up_id) = id.resolve(&self.registry)?;
        let mut attribute = new_attribute(&attribute_type, &up_id);
        attribute.add(values);
        Ok(self.put_attribute(attribute))
    }

    /// Store `attribute`, replacing any attribute of the same type.
    pub fn put_attribute(&mut self, attribute: Attribute) -> Option<Attribute> {
        self.attributes
            .insert(attribute.attribute_type().oid().to_string(), attribute)
    }

    /// Store several attributes, returning every attribute they displaced.
    pub fn put_attributes<I>(&mut self, attributes: I) -> Vec<Attribute>
    where
        I: IntoIterator<Item = Attribute>,
    {
        attributes
            .into_iter()
            .filter_map(|attribute| self.put_attribute(attribute))
            .collect()
    }

    /// Declare empty attributes for each identifier, returning the displaced
    /// ones.
    ///
    /// All identifiers are resolved before anything changes, so a failure
    /// leaves the entry untouched.
    pub fn set<'a, I>(&mut self, ids: I) -> DirectoryResult<Vec<Attribute>>
    where
        I: IntoIterator,
        I::Item: Into<AttributeId<'a>>,
    {
        let resolved = ids
            .into_iter()
            .map(|id| {
                let id: AttributeId<'_> = id.into();
                id.resolve(&self.registry)
            })
            .collect::<DirectoryResult<Vec<_>>>()?;

        Ok(resolved
            .into_iter()
            .filter_map(|(attribute_type, up_id)| {
                self.put_attribute(new_attribute(&attribute_type, &up_id))
            })
            .collect())
    }

    /// Remove whole attributes by their type, returning those actually held.
    pub fn remove(&mut self, attributes: &[Attribute]) -> Vec<Attribute> {
        attributes
            .iter()
            .filter_map(|attribute| self.attributes.remove(attribute.attribute_type().oid()))
            .collect()
    }

    /// Remove whole attributes by identifier.
    ///
    /// Returns `None` when none of the identifiers named an attribute present
    /// in the entry. Unresolvable identifiers are skipped.
    pub fn remove_attributes<'a, I>(&mut self, ids: I) -> Option<Vec<Attribute>>
    where
        I: IntoIterator,
        I::Item: Into<AttributeId<'a>>,
    {
        let removed: Vec<Attribute> = ids
            .into_iter()
            .filter_map(|id| {
                let id: AttributeId<'_> = id.into();
                match id.resolve(&self.registry) {
                    Ok((attribute_type, _)) => self.attributes.remove(attribute_type.oid()),
                    Err(e) => {
                        debug!("Skipping attribute removal for {:?}: {}", id, e);
                        None
                    }
                }
            })
            .collect();

        if removed.is_empty() { None } else { Some(removed) }
    }

    /// Remove values from the attribute named by `id`.
    ///
    /// Follows [`Attribute::remove`]: present values are removed and the
    /// result is true only if all of them were found. An attribute emptied by
    /// this call is removed from the entry; one that was already empty stays.
    pub fn remove_values<'a, I>(&mut self, id: impl Into<AttributeId<'a>>, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        let Some(oid) = self.resolve_oid(id) else {
            return false;
        };
        let Some(attribute) = self.attributes.get_mut(&oid) else {
            return false;
        };

        let before = attribute.len();
        let removed = attribute.remove(values);
        if attribute.len() < before && attribute.is_empty() {
            self.attributes.remove(&oid);
        }
        removed
    }

    /// Get the attribute named by `id`.
    pub fn get<'a>(&self, id: impl Into<AttributeId<'a>>) -> Option<&Attribute> {
        let oid = self.resolve_oid(id)?;
        self.attributes.get(&oid)
    }

    pub fn get_mut<'a>(&mut self, id: impl Into<AttributeId<'a>>) -> Option<&mut Attribute> {
        let oid = self.resolve_oid(id)?;
        self.attributes.get_mut(&oid)
    }

    /// True iff the attribute named by `id` holds every one of `values`.
    pub fn contains<'a, I>(&self, id: impl Into<AttributeId<'a>>, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        self.get(id).is_some_and(|attribute| attribute.contains(values))
    }

    /// True iff an attribute is present for every identifier.
    pub fn contains_attribute<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<AttributeId<'a>>,
    {
        ids.into_iter().all(|id| self.get(id).is_some())
    }

    /// True iff every given attribute is present with all of its values.
    pub fn contains_attributes(&self, attributes: &[Attribute]) -> bool {
        attributes.iter().all(|attribute| {
            self.attributes
                .get(attribute.attribute_type().oid())
                .is_some_and(|held| held.contains(attribute.values()))
        })
    }

    /// Whether the entry's objectClass attribute holds `object_class`.
    pub fn has_object_class(&self, object_class: &str) -> bool {
        self.attributes
            .get(OBJECT_CLASS_OID)
            .is_some_and(|attribute| attribute.contains([object_class]))
    }

    /// Remove every attribute. The DN is kept.
    pub fn clear(&mut self) {
        self.attributes.clear();
    }

    /// Copy the entry into another schema context.
    ///
    /// Each attribute is rebound to the target registry's type with the same
    /// OID; values that do not fit the target type are dropped, and attributes
    /// whose type the target does not know are left out.
    pub fn copy_to(&self, registry: Arc<SchemaRegistry>) -> Entry {
        let mut copy = Entry::new(Arc::clone(&registry), self.dn.clone());
        for attribute in self.attributes.values() {
            let oid = attribute.attribute_type().oid();
            match registry.get(oid) {
                Some(attribute_type) => {
                    let mut attribute = attribute.clone();
                    if !Arc::ptr_eq(attribute.attribute_type(), &attribute_type) {
                        attribute.apply(&attribute_type);
                    }
                    copy.put_attribute(attribute);
                }
                None => warn!(
                    "Dropping attribute '{}' from {}: type {} unknown to target schema",
                    attribute.up_id(),
                    self.dn,
                    oid
                ),
            }
        }
        copy
    }

    fn resolve_oid<'a>(&self, id: impl Into<AttributeId<'a>>) -> Option<String> {
        let id: AttributeId<'_> = id.into();
        id.resolve(&self.registry)
            .ok()
            .map(|(attribute_type, _)| attribute_type.oid().to_string())
    }

    /// Attributes in rendering order: objectClass first, then by id.
    fn sorted_attributes(&self) -> Vec<&Attribute> {
        let mut attributes: Vec<&Attribute> = self.attributes.values().collect();
        attributes.sort_by(|a, b| {
            let a_key = (a.attribute_type().oid() != OBJECT_CLASS_OID, a.id());
            let b_key = (b.attribute_type().oid() != OBJECT_CLASS_OID, b.id());
            a_key.cmp(&b_key)
        });
        attributes
    }
}

fn new_attribute(attribute_type: &Arc<AttributeType>, up_id: &str) -> Attribute {
    // up ids come from AttributeId::resolve and always name the type
    Attribute::with_up_id(up_id, attribute_type).unwrap_or_else(|_| Attribute::new(attribute_type))
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.dn == other.dn && self.attributes == other.attributes
    }
}

impl Eq for Entry {}

impl<'a> IntoIterator for &'a Entry {
    type Item = &'a Attribute;
    type IntoIter = std::collections::hash_map::Values<'a, String, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.values()
    }
}

/// Renders the entry as an LDIF record.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ldif_line(f, "dn", Some(self.dn.up_name().as_bytes()), true)?;
        for attribute in self.sorted_attributes() {
            for value in attribute {
                write_ldif_line(f, attribute.up_id(), value.as_bytes(), value.is_human_readable())?;
            }
        }
        Ok(())
    }
}

fn write_ldif_line(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    value: Option<&[u8]>,
    human_readable: bool,
) -> fmt::Result {
    let bytes = value.unwrap_or_default();
    match std::str::from_utf8(bytes) {
        Ok(text) if human_readable && is_ldif_safe(text) => {
            if text.is_empty() {
                writeln!(f, "{}:", name)
            } else {
                writeln!(f, "{}: {}", name, text)
            }
        }
        _ => writeln!(f, "{}:: {}", name, BASE64.encode(bytes)),
    }
}

/// RFC 2849 SAFE-STRING.
fn is_ldif_safe(text: &str) -> bool {
    let safe_chars = text
        .chars()
        .all(|c| c.is_ascii() && !matches!(c, '\0' | '\n' | '\r'));
    let safe_start = !text.starts_with([' ', ':', '<']);
    safe_chars && safe_start && !text.ends_with(' ')
}
