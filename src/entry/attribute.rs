//! Schema-bound attributes.
//!
//! An [`Attribute`] is an ordered, duplicate-free collection of values bound to
//! exactly one [`AttributeType`], together with the identifier the caller used
//! to name it (the "up id").
//!
//! ## Invariants
//!
//! - Every stored value is bound to the attribute's type and its kind (text
//!   or binary) matches the type's human-readable flag.
//! - A single-valued attribute holds at most one value.
//! - No two stored values are equal under the type's equality rule.
//! - The up id names the bound type (by OID or alias, any case).
//!
//! Values that would break an invariant are rejected softly: the operation
//! succeeds and the returned count or flag shows what was actually done.

use super::value::{Value, ValueInput};
use crate::error::{DirectoryError, DirectoryResult};
use crate::schema::AttributeType;
use log::debug;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An attribute: one attribute type and its values.
///
/// # Examples
///
/// ```rust
/// use directory_core::entry::Attribute;
/// use directory_core::schema::SchemaRegistry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = SchemaRegistry::new()?;
/// let cn = registry.lookup("cn")?;
///
/// let mut attribute = Attribute::with_up_id("CommonName", &cn)?;
/// assert_eq!(attribute.add(["Test  1", "test 1", "Test 2"]), 2);
/// assert!(attribute.contains(["TEST 1"]));
/// assert_eq!(attribute.up_id(), "CommonName");
/// assert_eq!(attribute.id(), "commonname");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Attribute {
    attribute_type: Arc<AttributeType>,
    up_id: String,
    id: String,
    values: Vec<Value>,
}

impl Attribute {
    /// Create an empty attribute named by the type's preferred name.
    pub fn new(attribute_type: &Arc<AttributeType>) -> Self {
        let up_id = attribute_type.name().to_string();
        Self {
            id: up_id.to_ascii_lowercase(),
            up_id,
            attribute_type: Arc::clone(attribute_type),
            values: Vec::new(),
        }
    }

    /// Create an empty attribute with a caller-supplied identifier.
    ///
    /// Fails with `InvalidArgument` when `up_id` names another type.
    pub fn with_up_id(up_id: &str, attribute_type: &Arc<AttributeType>) -> DirectoryResult<Self> {
        let mut attribute = Self::new(attribute_type);
        attribute.set_up_id(up_id)?;
        Ok(attribute)
    }

    /// Create an attribute pre-populated with `values`.
    ///
    /// Values are added with the same soft rules as [`Attribute::add`].
    pub fn with_values<I>(attribute_type: &Arc<AttributeType>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        let mut attribute = Self::new(attribute_type);
        attribute.add(values);
        attribute
    }

    pub fn attribute_type(&self) -> &Arc<AttributeType> {
        &self.attribute_type
    }

    /// The identifier as the caller wrote it, trimmed.
    pub fn up_id(&self) -> &str {
        &self.up_id
    }

    /// The lowercased identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_human_readable(&self) -> bool {
        self.attribute_type.is_human_readable()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in insertion order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// The first value in iteration order.
    pub fn get(&self) -> Option<&Value> {
        self.values.first()
    }

    /// The first value's raw text, for textual attributes.
    pub fn get_str(&self) -> Option<&str> {
        self.get().and_then(Value::as_str)
    }

    /// The first value's raw bytes.
    pub fn get_bytes(&self) -> Option<&[u8]> {
        self.get().and_then(Value::as_bytes)
    }

    /// Add values, returning how many were actually stored.
    ///
    /// Values of the wrong kind, duplicates and values beyond the first for a
    /// single-valued type are skipped without error.
    pub fn add<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        let mut added = 0;
        for value in values {
            if self.add_one(value.into()) {
                added += 1;
            }
        }
        added
    }

    fn add_one(&mut self, input: ValueInput) -> bool {
        if input.is_human_readable() != self.is_human_readable() {
            debug!(
                "Rejecting {} value for {} attribute '{}'",
                kind(input.is_human_readable()),
                kind(self.is_human_readable()),
                self.up_id
            );
            return false;
        }

        let value = input.into_value(&self.attribute_type);
        if self.values.contains(&value) {
            return false;
        }
        if self.attribute_type.is_single_valued() && !self.values.is_empty() {
            debug!(
                "Rejecting extra value for single-valued attribute '{}'",
                self.up_id
            );
            return false;
        }

        self.values.push(value);
        true
    }

    /// True iff every given value is present under the type's equality rule.
    pub fn contains<I>(&self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        values.into_iter().all(|value| self.contains_one(value.into()))
    }

    fn contains_one(&self, input: ValueInput) -> bool {
        if input.is_human_readable() != self.is_human_readable() {
            return false;
        }
        let value = input.into_value(&self.attribute_type);
        self.values.contains(&value)
    }

    /// Remove values, returning true only if every one of them was present.
    ///
    /// Each present value is removed even when others in the same call are
    /// missing; the result then reports `false`.
    pub fn remove<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<ValueInput>,
    {
        values
            .into_iter()
            .fold(true, |all_removed, value| self.remove_one(value.into()) && all_removed)
    }

    fn remove_one(&mut self, input: ValueInput) -> bool {
        if input.is_human_readable() != self.is_human_readable() {
            return false;
        }
        let value = input.into_value(&self.attribute_type);
        match self.values.iter().position(|v| *v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every value. The type and up id are kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Change the up id.
    ///
    /// Surrounding whitespace is dropped; a blank identifier falls back to the
    /// type's preferred name. Fails with `InvalidArgument` when the identifier
    /// names a different type.
    pub fn set_up_id(&mut self, up_id: &str) -> DirectoryResult<()> {
        let trimmed = up_id.trim();
        if trimmed.is_empty() {
            self.up_id = self.attribute_type.name().to_string();
        } else if self.attribute_type.is_named(trimmed) {
            self.up_id = trimmed.to_string();
        } else {
            return Err(DirectoryError::invalid_argument(format!(
                "'{}' does not name attribute type {}",
                trimmed, self.attribute_type
            )));
        }
        self.id = self.up_id.to_ascii_lowercase();
        Ok(())
    }

    /// Change the up id and rebind to `attribute_type` in one step.
    ///
    /// Nothing changes when `up_id` does not name `attribute_type`.
    pub fn set_up_id_with_type(
        &mut self,
        up_id: &str,
        attribute_type: &Arc<AttributeType>,
    ) -> DirectoryResult<()> {
        let trimmed = up_id.trim();
        if !trimmed.is_empty() && !attribute_type.is_named(trimmed) {
            return Err(DirectoryError::invalid_argument(format!(
                "'{}' does not name attribute type {}",
                trimmed, attribute_type
            )));
        }
        self.apply(attribute_type);
        self.set_up_id(trimmed)
    }

    /// Rebind the attribute to another type.
    ///
    /// Values are renormalized against the new type. Values of the wrong kind
    /// are dropped, values that become duplicates are merged, and a
    /// single-valued type keeps only the first value. An up id that does not
    /// name the new type is replaced by the type's preferred name.
    pub fn apply(&mut self, attribute_type: &Arc<AttributeType>) {
        let previous = std::mem::take(&mut self.values);
        self.attribute_type = Arc::clone(attribute_type);
        if !attribute_type.is_named(&self.up_id) {
            self.up_id = attribute_type.name().to_string();
            self.id = self.up_id.to_ascii_lowercase();
        }

        let before = previous.len();
        let kept = self.add(previous);
        if kept < before {
            debug!(
                "Dropped {} value(s) while applying {} to '{}'",
                before - kept,
                attribute_type,
                self.up_id
            );
        }
    }

    /// Whether the attribute satisfies its type's constraints.
    pub fn is_valid(&self) -> bool {
        let kinds_match = self
            .values
            .iter()
            .all(|v| v.is_valid_for(&self.attribute_type));
        kinds_match && (!self.attribute_type.is_single_valued() || self.values.len() <= 1)
    }
}

fn kind(human_readable: bool) -> &'static str {
    if human_readable { "text" } else { "binary" }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.attribute_type.oid() == other.attribute_type.oid()
            && self.values.len() == other.values.len()
            && self.values.iter().all(|v| other.values.contains(v))
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attribute_type.oid().hash(state);
        let combined = self.values.iter().fold(0u64, |acc, value| {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        combined.hash(state);
    }
}

impl<'a> IntoIterator for &'a Attribute {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.values.is_empty() {
            return writeln!(f, "{}: (null)", self.up_id);
        }
        for value in &self.values {
            writeln!(f, "{}: {}", self.up_id, value)?;
        }
        Ok(())
    }
}
