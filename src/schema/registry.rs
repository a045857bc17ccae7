//! Schema registry for loading, managing, and resolving attribute types.
//!
//! The registry is the schema context threaded through values, attributes and
//! entries. It is built once (from the embedded schemas, from files, or by
//! hand) and is immutable afterwards, so it can be shared between concurrently
//! running operations behind an `Arc`.

use super::embedded;
use super::types::{AttributeType, AttributeTypeDefinition, Schema, syntax};
use crate::error::{DirectoryError, DirectoryResult, SchemaError, SchemaResult};

use log::{debug, info, trace};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Registry of attribute types, addressable by OID or any alias.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
    by_oid: HashMap<String, Arc<AttributeType>>,
    /// Lowercased names and OIDs mapped to the owning OID
    index: HashMap<String, String>,
}

impl SchemaRegistry {
    /// Create a new schema registry with the embedded core schemas.
    ///
    /// This method uses the schemas embedded in the library and doesn't require
    /// external schema files. For loading schemas from files, use `from_schema_dir()`.
    pub fn new() -> SchemaResult<Self> {
        Self::with_embedded_schemas()
    }

    /// Create a registry without any attribute types.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a new schema registry with the embedded core and operational schemas.
    pub fn with_embedded_schemas() -> SchemaResult<Self> {
        let mut registry = Self::empty();
        registry.add_schema(Self::load_schema_from_str(embedded::core_schema())?)?;
        registry.add_schema(Self::load_schema_from_str(embedded::operational_schema())?)?;
        info!(
            "Loaded embedded schemas with {} attribute types",
            registry.len()
        );
        Ok(registry)
    }

    /// Create a schema registry by loading every `*.json` schema in a directory.
    ///
    /// Files are loaded in file name order so that superiors declared in an
    /// earlier file are available to later ones.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> SchemaResult<Self> {
        let mut paths = fs::read_dir(schema_dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect::<Vec<_>>();
        paths.sort();

        let mut registry = Self::empty();
        for path in paths {
            debug!("Loading schema file {}", path.display());
            registry.add_schema(Self::load_schema_from_file(&path)?)?;
        }
        info!(
            "Loaded {} schemas from {}",
            registry.schemas.len(),
            schema_dir.as_ref().display()
        );
        Ok(registry)
    }

    /// Create a schema registry from a single schema file.
    pub fn from_schema_file<P: AsRef<Path>>(path: P) -> SchemaResult<Self> {
        let mut registry = Self::empty();
        registry.add_schema(Self::load_schema_from_file(path)?)?;
        Ok(registry)
    }

    /// Load a schema from a JSON file.
    pub fn load_schema_from_file<P: AsRef<Path>>(path: P) -> SchemaResult<Schema> {
        let content = fs::read_to_string(&path)?;
        Self::load_schema_from_str(&content)
    }

    /// Load a schema from a JSON string.
    pub fn load_schema_from_str(content: &str) -> SchemaResult<Schema> {
        Ok(serde_json::from_str(content)?)
    }

    /// Register every attribute type of a schema.
    ///
    /// Definitions are registered in order; on failure the registry keeps the
    /// types registered before the failing one.
    pub fn add_schema(&mut self, schema: Schema) -> SchemaResult<()> {
        for definition in &schema.attribute_types {
            self.add_attribute_type(definition.clone())?;
        }
        debug!(
            "Registered schema '{}' ({} attribute types)",
            schema.id,
            schema.attribute_types.len()
        );
        self.schemas.insert(schema.id.clone(), schema);
        Ok(())
    }

    /// Resolve a definition against already registered types and register it.
    pub fn add_attribute_type(
        &mut self,
        definition: AttributeTypeDefinition,
    ) -> SchemaResult<Arc<AttributeType>> {
        let attribute_type = self.resolve_definition(definition)?;
        self.register(attribute_type)
    }

    /// Register an already resolved attribute type.
    pub fn register(&mut self, attribute_type: AttributeType) -> SchemaResult<Arc<AttributeType>> {
        let oid = attribute_type.oid().to_string();
        let keys = std::iter::once(oid.to_ascii_lowercase())
            .chain(attribute_type.names().iter().map(|n| n.to_ascii_lowercase()))
            .collect::<Vec<_>>();

        if let Some(taken) = keys.iter().find(|key| self.index.contains_key(*key)) {
            return Err(SchemaError::DuplicateIdentifier {
                identifier: taken.clone(),
            });
        }

        trace!("Registering attribute type {}", attribute_type);
        for key in keys {
            self.index.insert(key, oid.clone());
        }
        let attribute_type = Arc::new(attribute_type);
        self.by_oid.insert(oid, Arc::clone(&attribute_type));
        Ok(attribute_type)
    }

    /// Turn a definition into an attribute type, inheriting syntax and matching
    /// rules from its superior.
    fn resolve_definition(&self, definition: AttributeTypeDefinition) -> SchemaResult<AttributeType> {
        let oid = definition.oid.trim().to_string();
        if oid.is_empty() {
            return Err(SchemaError::invalid_definition(format!(
                "attribute type {:?} has no OID",
                definition.names
            )));
        }
        if definition.names.iter().any(|n| n.trim().is_empty()) {
            return Err(SchemaError::invalid_definition(format!(
                "attribute type {} has a blank name",
                oid
            )));
        }

        let superior = match &definition.sup {
            Some(sup) => Some(self.get(sup).ok_or_else(|| SchemaError::UnknownSuperior {
                attribute: oid.clone(),
                superior: sup.clone(),
            })?),
            None => None,
        };

        let inherited = |own: Option<String>, pick: fn(&AttributeType) -> Option<&str>| {
            own.or_else(|| {
                superior
                    .as_deref()
                    .and_then(pick)
                    .map(str::to_string)
            })
        };

        let syntax = definition
            .syntax
            .clone()
            .or_else(|| superior.as_ref().map(|s| s.syntax().to_string()))
            .ok_or_else(|| {
                SchemaError::invalid_definition(format!(
                    "attribute type {} declares neither a syntax nor a superior",
                    oid
                ))
            })?;

        let human_readable = definition.human_readable.unwrap_or_else(|| {
            if definition.syntax.is_some() {
                syntax::is_human_readable(&syntax)
            } else {
                superior
                    .as_ref()
                    .map(|s| s.is_human_readable())
                    .unwrap_or_else(|| syntax::is_human_readable(&syntax))
            }
        });

        Ok(AttributeType {
            names: definition.names.iter().map(|n| n.trim().to_string()).collect(),
            description: definition.description,
            superior: superior.as_ref().map(|s| s.oid().to_string()),
            syntax,
            human_readable,
            single_valued: definition.single_valued,
            equality: inherited(definition.equality, AttributeType::equality),
            ordering: inherited(definition.ordering, AttributeType::ordering),
            substring: inherited(definition.substring, AttributeType::substring),
            usage: definition.usage,
            oid,
        })
    }

    /// Resolve an identifier (OID or alias, any case) to its attribute type.
    pub fn lookup(&self, id: &str) -> DirectoryResult<Arc<AttributeType>> {
        self.get(id)
            .ok_or_else(|| DirectoryError::no_such_attribute(id.trim()))
    }

    /// Like [`lookup`](Self::lookup) but returning `None` for unknown identifiers.
    pub fn get(&self, id: &str) -> Option<Arc<AttributeType>> {
        self.index
            .get(&id.trim().to_ascii_lowercase())
            .and_then(|oid| self.by_oid.get(oid))
            .cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(&id.trim().to_ascii_lowercase())
    }

    /// Get all registered attribute types.
    pub fn attribute_types(&self) -> impl Iterator<Item = &Arc<AttributeType>> {
        self.by_oid.values()
    }

    /// Get all loaded schemas.
    pub fn schemas(&self) -> Vec<&Schema> {
        self.schemas.values().collect()
    }

    /// Get a specific schema by ID.
    pub fn get_schema(&self, id: &str) -> Option<&Schema> {
        self.schemas.get(id)
    }

    /// Number of registered attribute types.
    pub fn len(&self) -> usize {
        self.by_oid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_oid.is_empty()
    }
}
