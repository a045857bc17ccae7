//! Integration tests through the public API.
//!
//! Each module drives one component end to end against the embedded schemas,
//! or against schemas written to a temporary directory.

pub mod entry_lifecycle;
pub mod filtered_entry;
pub mod modifications;
pub mod schema_loading;
pub mod serialization;
