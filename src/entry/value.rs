//! Attribute values.
//!
//! A [`Value`] is either textual or binary. Each variant keeps the raw datum
//! exactly as supplied and, when bound to an [`AttributeType`], the normalized
//! form produced by that type's equality matching rule. Values are immutable:
//! rebinding to another type produces a new value.
//!
//! Normalization is eager. The normalized form is computed once when the value
//! is bound and stored next to the raw datum, so there is no lazy cache to
//! invalidate. A value is only reused as is when it is already bound to the
//! very same type instance; a type with the same OID from another registry
//! may carry a different equality rule and triggers a rebind.
//!
//! ## Null values
//!
//! A raw datum of `None` is the null marker: a value that is present but
//! empty. It is distinct from "no value" and compares equal only to another
//! null value of the same kind and type.

use crate::schema::{AttributeType, MatchingRule};
use log::debug;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A textual value.
#[derive(Debug, Clone)]
pub struct TextValue {
    raw: Option<String>,
    normalized: Option<String>,
    attribute_type: Option<Arc<AttributeType>>,
}

impl TextValue {
    /// Create an unbound text value.
    pub fn new(raw: Option<String>) -> Self {
        Self {
            raw,
            normalized: None,
            attribute_type: None,
        }
    }

    /// Create a text value bound to `attribute_type`, normalizing it through
    /// the type's equality rule.
    pub fn with_type(attribute_type: &Arc<AttributeType>, raw: Option<String>) -> Self {
        let normalized = raw
            .as_deref()
            .map(|raw| normalize_text(attribute_type, raw));
        Self {
            raw,
            normalized,
            attribute_type: Some(Arc::clone(attribute_type)),
        }
    }

    /// The raw string, `None` for the null marker.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// The normalized string; `None` when unbound or null.
    pub fn normalized(&self) -> Option<&str> {
        self.normalized.as_deref()
    }

    fn comparable(&self) -> Option<&str> {
        match self.attribute_type {
            Some(_) => self.normalized(),
            None => self.raw(),
        }
    }
}

/// A binary value.
#[derive(Debug, Clone)]
pub struct BinaryValue {
    raw: Option<Vec<u8>>,
    normalized: Option<Vec<u8>>,
    attribute_type: Option<Arc<AttributeType>>,
}

impl BinaryValue {
    /// Create an unbound binary value.
    pub fn new(raw: Option<Vec<u8>>) -> Self {
        Self {
            raw,
            normalized: None,
            attribute_type: None,
        }
    }

    /// Create a binary value bound to `attribute_type`.
    pub fn with_type(attribute_type: &Arc<AttributeType>, raw: Option<Vec<u8>>) -> Self {
        let normalized = raw.as_deref().map(|raw| {
            equality_rule(attribute_type)
                .map(|rule| rule.normalize_bytes(raw))
                .unwrap_or_else(|| raw.to_vec())
        });
        Self {
            raw,
            normalized,
            attribute_type: Some(Arc::clone(attribute_type)),
        }
    }

    /// The raw bytes, `None` for the null marker.
    pub fn raw(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }

    /// The normalized bytes; `None` when unbound or null.
    pub fn normalized(&self) -> Option<&[u8]> {
        self.normalized.as_deref()
    }

    fn comparable(&self) -> Option<&[u8]> {
        match self.attribute_type {
            Some(_) => self.normalized(),
            None => self.raw(),
        }
    }
}

/// An attribute value, textual or binary.
///
/// Equality and hashing use the bound attribute type and the normalized form,
/// never the raw form alone. Unbound values compare by raw form.
///
/// # Examples
///
/// ```rust
/// use directory_core::entry::Value;
/// use directory_core::schema::SchemaRegistry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = SchemaRegistry::new()?;
/// let cn = registry.lookup("cn")?;
///
/// let a = Value::bound_text(&cn, "John  DOE");
/// let b = Value::bound_text(&cn, "john doe");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), Some("John  DOE"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Text(TextValue),
    Binary(BinaryValue),
}

impl Value {
    /// Create an unbound text value.
    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text(TextValue::new(Some(raw.into())))
    }

    /// Create an unbound binary value.
    pub fn binary(raw: impl Into<Vec<u8>>) -> Self {
        Self::Binary(BinaryValue::new(Some(raw.into())))
    }

    /// The textual null marker.
    pub fn null_text() -> Self {
        Self::Text(TextValue::new(None))
    }

    /// The binary null marker.
    pub fn null_binary() -> Self {
        Self::Binary(BinaryValue::new(None))
    }

    /// Create a text value bound to an attribute type.
    pub fn bound_text(attribute_type: &Arc<AttributeType>, raw: impl Into<String>) -> Self {
        Self::Text(TextValue::with_type(attribute_type, Some(raw.into())))
    }

    /// Create a binary value bound to an attribute type.
    pub fn bound_binary(attribute_type: &Arc<AttributeType>, raw: impl Into<Vec<u8>>) -> Self {
        Self::Binary(BinaryValue::with_type(attribute_type, Some(raw.into())))
    }

    /// Produce the same raw datum bound to `attribute_type`.
    ///
    /// The kind of the value is preserved even when it disagrees with the
    /// type; callers check [`Value::is_valid_for`] before storing.
    pub fn bind(&self, attribute_type: &Arc<AttributeType>) -> Self {
        match self {
            Self::Text(v) => Self::Text(TextValue::with_type(attribute_type, v.raw.clone())),
            Self::Binary(v) => Self::Binary(BinaryValue::with_type(attribute_type, v.raw.clone())),
        }
    }

    pub fn is_human_readable(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Whether this is the null marker.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Text(v) => v.raw.is_none(),
            Self::Binary(v) => v.raw.is_none(),
        }
    }

    /// Whether the value's kind matches the type's human-readable flag.
    pub fn is_valid_for(&self, attribute_type: &AttributeType) -> bool {
        self.is_human_readable() == attribute_type.is_human_readable()
    }

    pub fn attribute_type(&self) -> Option<&Arc<AttributeType>> {
        match self {
            Self::Text(v) => v.attribute_type.as_ref(),
            Self::Binary(v) => v.attribute_type.as_ref(),
        }
    }

    /// Raw text of a textual value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => v.raw(),
            Self::Binary(_) => None,
        }
    }

    /// Raw bytes of the value; textual values yield their UTF-8 encoding.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Text(v) => v.raw().map(str::as_bytes),
            Self::Binary(v) => v.raw(),
        }
    }

    /// Normalized text of a bound textual value.
    pub fn normalized_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => v.normalized(),
            Self::Binary(_) => None,
        }
    }

    /// Normalized bytes of a bound value.
    pub fn normalized_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Text(v) => v.normalized().map(str::as_bytes),
            Self::Binary(v) => v.normalized(),
        }
    }

    fn type_oid(&self) -> Option<&str> {
        self.attribute_type().map(|at| at.oid())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.type_oid() != other.type_oid() {
            return false;
        }
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.comparable() == b.comparable(),
            (Self::Binary(a), Self::Binary(b)) => a.comparable() == b.comparable(),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_oid().hash(state);
        match self {
            Self::Text(v) => {
                0u8.hash(state);
                v.comparable().hash(state);
            }
            Self::Binary(v) => {
                1u8.hash(state);
                v.comparable().hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => f.write_str(v.raw().unwrap_or("")),
            Self::Binary(v) => {
                let bytes = v.raw().unwrap_or(&[]);
                let hex = bytes
                    .iter()
                    .map(|b| format!("0x{:02X}", b))
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "'{}'", hex)
            }
        }
    }
}

/// Input accepted wherever values are added, removed or tested.
///
/// Plain strings and byte vectors convert into this through `From`, so most
/// call sites can pass literals directly.
#[derive(Debug, Clone)]
pub enum ValueInput {
    /// Text, `None` being the textual null marker
    Text(Option<String>),
    /// Bytes, `None` being the binary null marker
    Binary(Option<Vec<u8>>),
    /// An existing value; it is rebound to the receiving attribute's type
    Typed(Value),
}

impl ValueInput {
    pub fn is_human_readable(&self) -> bool {
        match self {
            Self::Text(_) => true,
            Self::Binary(_) => false,
            Self::Typed(v) => v.is_human_readable(),
        }
    }

    /// Turn the input into a value bound to `attribute_type`.
    pub fn into_value(self, attribute_type: &Arc<AttributeType>) -> Value {
        match self {
            Self::Text(raw) => Value::Text(TextValue::with_type(attribute_type, raw)),
            Self::Binary(raw) => Value::Binary(BinaryValue::with_type(attribute_type, raw)),
            Self::Typed(value) => match value.attribute_type() {
                Some(bound) if Arc::ptr_eq(bound, attribute_type) => value,
                _ => value.bind(attribute_type),
            },
        }
    }
}

impl From<&str> for ValueInput {
    fn from(value: &str) -> Self {
        Self::Text(Some(value.to_string()))
    }
}

impl From<String> for ValueInput {
    fn from(value: String) -> Self {
        Self::Text(Some(value))
    }
}

impl From<&String> for ValueInput {
    fn from(value: &String) -> Self {
        Self::Text(Some(value.clone()))
    }
}

impl From<Option<&str>> for ValueInput {
    fn from(value: Option<&str>) -> Self {
        Self::Text(value.map(str::to_string))
    }
}

impl From<Vec<u8>> for ValueInput {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(Some(value))
    }
}

impl From<&[u8]> for ValueInput {
    fn from(value: &[u8]) -> Self {
        Self::Binary(Some(value.to_vec()))
    }
}

impl<const N: usize> From<&[u8; N]> for ValueInput {
    fn from(value: &[u8; N]) -> Self {
        Self::Binary(Some(value.to_vec()))
    }
}

impl From<Option<Vec<u8>>> for ValueInput {
    fn from(value: Option<Vec<u8>>) -> Self {
        Self::Binary(value)
    }
}

impl From<Value> for ValueInput {
    fn from(value: Value) -> Self {
        Self::Typed(value)
    }
}

impl From<&Value> for ValueInput {
    fn from(value: &Value) -> Self {
        Self::Typed(value.clone())
    }
}

fn equality_rule(attribute_type: &AttributeType) -> Option<MatchingRule> {
    attribute_type.equality().and_then(MatchingRule::from_id)
}

fn normalize_text(attribute_type: &AttributeType, raw: &str) -> String {
    match equality_rule(attribute_type) {
        Some(rule) => rule.normalize_text(raw).unwrap_or_else(|e| {
            debug!("Keeping raw form for {}: {}", attribute_type.name(), e);
            raw.to_string()
        }),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaRegistry;
    use std::collections::HashSet;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new().expect("Failed to create registry")
    }

    #[test]
    fn test_bound_values_compare_normalized() {
        let registry = registry();
        let cn = registry.lookup("cn").unwrap();
        let a = Value::bound_text(&cn, "Test  1");
        let b = Value::bound_text(&cn, "test 1");

        assert_eq!(a, b);
        assert_eq!(a.as_str(), Some("Test  1"));
        assert_eq!(a.normalized_str(), Some("test 1"));
    }

    #[test]
    fn test_equal_values_hash_identically() {
        let registry = registry();
        let cn = registry.lookup("cn").unwrap();
        let mut set = HashSet::new();
        set.insert(Value::bound_text(&cn, "ABC"));
        assert!(set.contains(&Value::bound_text(&cn, "  abc ")));
        set.insert(Value::bound_text(&cn, "abc"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_unbound_values_compare_raw() {
        assert_eq!(Value::text("abc"), Value::text("abc"));
        assert_ne!(Value::text("abc"), Value::text("ABC"));
        assert!(Value::text("abc").normalized_str().is_none());
    }

    #[test]
    fn test_bound_and_unbound_differ() {
        let registry = registry();
        let cn = registry.lookup("cn").unwrap();
        assert_ne!(Value::bound_text(&cn, "abc"), Value::text("abc"));
        assert_eq!(Value::text("abc").bind(&cn), Value::bound_text(&cn, "ABC"));
    }

    #[test]
    fn test_different_types_differ() {
        let registry = registry();
        let cn = registry.lookup("cn").unwrap();
        let sn = registry.lookup("sn").unwrap();
        assert_ne!(Value::bound_text(&cn, "abc"), Value::bound_text(&sn, "abc"));
    }

    #[test]
    fn test_text_and_binary_differ() {
        assert_ne!(Value::text("ab"), Value::binary(b"ab".to_vec()));
    }

    #[test]
    fn test_null_marker() {
        let registry = registry();
        let cn = registry.lookup("cn").unwrap();
        let null = Value::null_text().bind(&cn);

        assert!(null.is_null());
        assert_eq!(null, Value::null_text().bind(&cn));
        assert_ne!(null, Value::bound_text(&cn, ""));
        assert_ne!(Value::null_text(), Value::null_binary());
        assert_eq!(null.to_string(), "");
    }

    #[test]
    fn test_binary_values() {
        let registry = registry();
        let password = registry.lookup("userPassword").unwrap();
        let value = Value::bound_binary(&password, vec![0x61, 0x62]);

        assert!(!value.is_human_readable());
        assert!(value.is_valid_for(&password));
        assert_eq!(value.as_bytes(), Some(&b"ab"[..]));
        assert_eq!(value.normalized_bytes(), Some(&b"ab"[..]));
        assert_eq!(value.to_string(), "'0x61 0x62'");
    }

    #[test]
    fn test_invalid_for_rule_keeps_raw_form() {
        let registry = registry();
        let uid_number = registry.lookup("uidNumber").unwrap();
        let value = Value::bound_text(&uid_number, "not-a-number");
        assert_eq!(value.normalized_str(), Some("not-a-number"));
        assert_eq!(
            Value::bound_text(&uid_number, "007"),
            Value::bound_text(&uid_number, "7")
        );
    }

    #[test]
    fn test_value_input_conversions() {
        let registry = registry();
        let cn = registry.lookup("cn").unwrap();

        assert!(ValueInput::from("a").is_human_readable());
        assert!(!ValueInput::from(vec![1u8]).is_human_readable());
        assert!(!ValueInput::from(b"xy").is_human_readable());

        let typed = ValueInput::from(Value::text("Hello")).into_value(&cn);
        assert_eq!(typed, Value::bound_text(&cn, "hello"));
        assert_eq!(typed.attribute_type().unwrap().oid(), "2.5.4.3");

        let null = ValueInput::from(None::<&str>).into_value(&cn);
        assert!(null.is_null());
    }
}
