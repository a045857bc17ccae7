//! Error types for directory entry operations.
//!
//! This module provides the error handling for the entry/attribute/value model
//! and for the schema registry it is governed by.
//!
//! Rejected values (a binary value offered to a textual attribute, a second value
//! offered to a single-valued attribute) are not errors: those
//! operations succeed and report how many values were actually stored.

/// Main error type for entry, attribute and value operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The identifier could not be resolved to an attribute type
    #[error("No such attribute: {identifier}")]
    NoSuchAttribute { identifier: String },

    /// An argument was blank, or named a different attribute type than the one in scope
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Distinguished name syntax errors
    #[error("Invalid DN '{dn}': {reason}")]
    InvalidDn { dn: String, reason: String },

    /// Serialized attribute records that are inconsistent with themselves or the schema
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema loading errors
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Errors raised while building a schema registry.
///
/// These are configuration errors and normally surface at startup.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Two attribute type definitions share an OID or a name
    #[error("Duplicate schema identifier '{identifier}'")]
    DuplicateIdentifier { identifier: String },

    /// An attribute type names a superior that is not registered
    #[error("Attribute type '{attribute}' has unknown superior '{superior}'")]
    UnknownSuperior { attribute: String, superior: String },

    /// Structurally invalid attribute type definition
    #[error("Invalid attribute type definition: {message}")]
    InvalidDefinition { message: String },

    /// Schema file could not be read
    #[error("Failed to read schema: {0}")]
    Io(#[from] std::io::Error),

    /// Schema file is not valid JSON
    #[error("Failed to parse schema: {0}")]
    Json(#[from] serde_json::Error),
}

/// A matching rule refused to normalize a value.
///
/// Never escapes the value layer: values that fail normalization keep their raw
/// form as their comparison form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Matching rule '{rule}' cannot normalize '{value}': {reason}")]
pub struct NormalizationError {
    pub rule: String,
    pub value: String,
    pub reason: String,
}

impl DirectoryError {
    /// Create a no such attribute error
    pub fn no_such_attribute(identifier: impl Into<String>) -> Self {
        Self::NoSuchAttribute {
            identifier: identifier.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid DN error
    pub fn invalid_dn(dn: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDn {
            dn: dn.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Create an invalid definition error
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }
}

impl NormalizationError {
    pub(crate) fn new(
        rule: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

// Result type aliases for convenience
pub type DirectoryResult<T> = Result<T, DirectoryError>;
pub type SchemaResult<T> = Result<T, SchemaError>;
