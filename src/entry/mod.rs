//! Entries, attributes and values.
//!
//! This module holds the data model of the directory: [`Value`]s grouped into
//! schema-bound [`Attribute`]s, grouped into [`Entry`]s named by a DN.
//!
//! # Key Types
//!
//! - [`Entry`] - A DN plus at most one attribute per attribute type
//! - [`Attribute`] - Values of a single attribute type, free of duplicates
//! - [`Value`] - A text or binary datum, normalized once bound to a type
//! - [`FilteredEntry`] - Read-only projection of an entry
//! - [`Modification`] - One change of a modify request
//! - [`SerializedAttribute`] - Transport form of an attribute

pub mod attribute;
pub mod builder;
#[allow(clippy::module_inception)]
pub mod entry;
pub mod modification;
pub mod projection;
pub mod serialization;
pub mod value;

pub use attribute::Attribute;
pub use builder::EntryBuilder;
pub use entry::{AttributeId, Entry};
pub use modification::{Modification, ModificationOperation};
pub use projection::{
    ALL_OPERATIONAL_ATTRIBUTES, ALL_USER_ATTRIBUTES, FilteredEntry, NO_ATTRIBUTES, UsageFilter,
};
pub use serialization::{SerializedAttribute, SerializedValue};
pub use value::{BinaryValue, TextValue, Value, ValueInput};
