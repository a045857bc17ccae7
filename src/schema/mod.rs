//! Schema definitions for directory attributes.
//!
//! This module provides the schema registry that resolves attribute identifiers
//! to [`AttributeType`] descriptors, and the equality matching rules that
//! govern how values of those types are normalized and compared.
//!
//! # Key Types
//!
//! - [`SchemaRegistry`] - Registry resolving OIDs and aliases to attribute types
//! - [`AttributeType`] - Resolved, immutable attribute type descriptor
//! - [`AttributeTypeDefinition`] - Attribute type as written in a schema file
//! - [`MatchingRule`] - Equality normalization for values
//!
//! # Examples
//!
//! ```rust
//! use directory_core::schema::SchemaRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let cn = registry.lookup("commonName")?;
//! assert_eq!(cn.oid(), "2.5.4.3");
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod matching;
pub mod registry;
pub mod types;


// Re-export the main types for convenience
pub use matching::MatchingRule;
pub use registry::SchemaRegistry;
pub use types::{AttributeType, AttributeTypeDefinition, Schema, UsageCategory, syntax};
