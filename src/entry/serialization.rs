//! Serialized form of attributes.
//!
//! [`SerializedAttribute`] is the record external persistence and transport
//! layers exchange. It carries the up id, the attribute type's OID, the
//! human-readable flag, an explicit value count and the values themselves.
//! Binary payloads travel as base64 text so the record maps cleanly onto JSON.
//!
//! ```json
//! {
//!   "upId": "CommonName",
//!   "attributeType": "2.5.4.3",
//!   "isHumanReadable": true,
//!   "valueCount": 2,
//!   "values": [
//!     { "isNull": false, "text": "test 1" },
//!     { "isNull": true }
//!   ]
//! }
//! ```

use super::attribute::Attribute;
use super::value::{Value, ValueInput};
use crate::error::{DirectoryError, DirectoryResult};
use crate::schema::SchemaRegistry;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

/// An attribute in transport form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedAttribute {
    pub up_id: String,
    /// OID of the attribute type
    pub attribute_type: String,
    pub is_human_readable: bool,
    pub value_count: usize,
    pub values: Vec<SerializedValue>,
}

/// A single value in transport form.
///
/// Exactly one of `text` and `bytes` is set for a non-null value, matching
/// the owning attribute's human-readable flag; neither is set for the null
/// marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedValue {
    pub is_null: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64 encoded payload of a binary value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,
}

impl SerializedValue {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Text(v) => Self {
                is_null: v.raw().is_none(),
                text: v.raw().map(str::to_string),
                bytes: None,
            },
            Value::Binary(v) => Self {
                is_null: v.raw().is_none(),
                text: None,
                bytes: v.raw().map(|raw| BASE64.encode(raw)),
            },
        }
    }

    fn into_input(self, human_readable: bool) -> DirectoryResult<ValueInput> {
        match (self.is_null, human_readable, self.text, self.bytes) {
            (true, true, None, None) => Ok(ValueInput::Text(None)),
            (true, false, None, None) => Ok(ValueInput::Binary(None)),
            (true, _, _, _) => Err(DirectoryError::serialization(
                "null value must not carry a payload",
            )),
            (false, true, Some(text), None) => Ok(ValueInput::Text(Some(text))),
            (false, false, None, Some(encoded)) => {
                let raw = BASE64.decode(encoded.as_bytes()).map_err(|e| {
                    DirectoryError::serialization(format!("invalid base64 payload: {}", e))
                })?;
                Ok(ValueInput::Binary(Some(raw)))
            }
            (false, human_readable, _, _) => Err(DirectoryError::serialization(format!(
                "value payload does not match a {} attribute",
                if human_readable { "human-readable" } else { "binary" }
            ))),
        }
    }
}

impl Attribute {
    /// Produce the transport form of this attribute.
    pub fn to_serialized(&self) -> SerializedAttribute {
        SerializedAttribute {
            up_id: self.up_id().to_string(),
            attribute_type: self.attribute_type().oid().to_string(),
            is_human_readable: self.is_human_readable(),
            value_count: self.len(),
            values: self.iter().map(SerializedValue::from_value).collect(),
        }
    }

    /// Rebuild an attribute from its transport form.
    ///
    /// The attribute type is resolved through `registry`; an unknown OID
    /// fails with `NoSuchAttribute`. A record whose count, flag or values
    /// disagree with each other or with the type fails with `Serialization`.
    pub fn from_serialized(
        record: SerializedAttribute,
        registry: &SchemaRegistry,
    ) -> DirectoryResult<Self> {
        let attribute_type = registry.lookup(&record.attribute_type)?;

        if record.is_human_readable != attribute_type.is_human_readable() {
            return Err(DirectoryError::serialization(format!(
                "attribute '{}' is flagged human-readable={} but type {} says {}",
                record.up_id,
                record.is_human_readable,
                attribute_type,
                attribute_type.is_human_readable()
            )));
        }
        if record.value_count != record.values.len() {
            return Err(DirectoryError::serialization(format!(
                "attribute '{}' declares {} value(s) but carries {}",
                record.up_id,
                record.value_count,
                record.values.len()
            )));
        }

        let mut attribute = Attribute::with_up_id(&record.up_id, &attribute_type)?;
        let inputs = record
            .values
            .into_iter()
            .map(|value| value.into_input(record.is_human_readable))
            .collect::<DirectoryResult<Vec<_>>>()?;

        let stored = attribute.add(inputs);
        if stored != record.value_count {
            return Err(DirectoryError::serialization(format!(
                "attribute '{}' holds {} value(s) after loading, expected {}",
                attribute.up_id(),
                stored,
                record.value_count
            )));
        }
        Ok(attribute)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> DirectoryResult<String> {
        Ok(serde_json::to_string(&self.to_serialized())?)
    }

    /// Deserialize from a JSON string produced by [`Attribute::to_json`].
    pub fn from_json(json: &str, registry: &SchemaRegistry) -> DirectoryResult<Self> {
        let record: SerializedAttribute = serde_json::from_str(json)?;
        Self::from_serialized(record, registry)
    }
}
