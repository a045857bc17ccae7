//! Modify-operation support for entries.
//!
//! A [`Modification`] pairs an operation with an attribute, the way a modify
//! request lists its changes. [`Entry::apply_modification`] applies one change
//! and [`Entry::apply_modifications`] a whole list in order.
//!
//! # Semantics
//!
//! - `Add` merges the attribute's values into the entry, creating the
//!   attribute if it is absent.
//! - `Remove` without values removes the whole attribute; with values it
//!   removes those values and drops the attribute once it is empty.
//! - `Replace` without values removes the attribute; with values it replaces
//!   the attribute outright.

use super::attribute::Attribute;
use super::entry::Entry;
use crate::error::{DirectoryError, DirectoryResult};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The kind of change a [`Modification`] makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModificationOperation {
    Add,
    #[serde(alias = "delete")]
    Remove,
    Replace,
}

impl fmt::Display for ModificationOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
        };
        write!(f, "{}", name)
    }
}

/// Parses `add`, `remove` (or LDIF's `delete`) and `replace`, ignoring case.
impl FromStr for ModificationOperation {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "remove" | "delete" => Ok(Self::Remove),
            "replace" => Ok(Self::Replace),
            other => Err(DirectoryError::invalid_argument(format!(
                "Unsupported modification operation: {}",
                other
            ))),
        }
    }
}

/// A single change to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification {
    operation: ModificationOperation,
    attribute: Attribute,
}

impl Modification {
    pub fn new(operation: ModificationOperation, attribute: Attribute) -> Self {
        Self {
            operation,
            attribute,
        }
    }

    pub fn add(attribute: Attribute) -> Self {
        Self::new(ModificationOperation::Add, attribute)
    }

    pub fn remove(attribute: Attribute) -> Self {
        Self::new(ModificationOperation::Remove, attribute)
    }

    pub fn replace(attribute: Attribute) -> Self {
        Self::new(ModificationOperation::Replace, attribute)
    }

    pub fn operation(&self) -> ModificationOperation {
        self.operation
    }

    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.attribute.up_id())
    }
}

impl Entry {
    /// Apply one modification.
    ///
    /// The attribute's type must be known to the entry's registry, otherwise
    /// this fails with `NoSuchAttribute` and the entry is unchanged. Removing
    /// values or attributes that are not present is not an error.
    pub fn apply_modification(&mut self, modification: &Modification) -> DirectoryResult<()> {
        let attribute = self.rebind(modification.attribute())?;
        trace!("Applying {} to {}", modification, self.dn());

        match modification.operation() {
            ModificationOperation::Add => {
                self.add_attributes([attribute]);
            }
            ModificationOperation::Remove if attribute.is_empty() => {
                if self.remove(&[attribute]).is_empty() {
                    debug!("No attribute to remove for {}", modification);
                }
            }
            ModificationOperation::Remove => {
                let attribute_type = Arc::clone(attribute.attribute_type());
                if !self.remove_values(&attribute_type, attribute.values()) {
                    debug!("Not every value was present for {}", modification);
                }
            }
            ModificationOperation::Replace if attribute.is_empty() => {
                self.remove(&[attribute]);
            }
            ModificationOperation::Replace => {
                self.put_attribute(attribute);
            }
        }
        Ok(())
    }

    /// Apply modifications in order, stopping at the first failure.
    ///
    /// Changes made before the failing modification are kept.
    pub fn apply_modifications(&mut self, modifications: &[Modification]) -> DirectoryResult<()> {
        modifications
            .iter()
            .try_for_each(|modification| self.apply_modification(modification))
    }

    /// Bind `attribute` to this entry's registry.
    fn rebind(&self, attribute: &Attribute) -> DirectoryResult<Attribute> {
        let attribute_type = self.registry().lookup(attribute.attribute_type().oid())?;
        let mut attribute = attribute.clone();
        if !Arc::ptr_eq(attribute.attribute_type(), &attribute_type) {
            attribute.apply(&attribute_type);
        }
        Ok(attribute)
    }
}
