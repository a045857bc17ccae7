//! # Directory Schema Validator
//!
//! A command-line utility for validating directory schema files to ensure they
//! conform to the expected format and can be loaded into a schema registry.
//!
//! ## Overview
//!
//! This utility checks:
//! - JSON syntax
//! - Presence of the `id`, `name` and `attributeTypes` fields
//! - Attribute type OIDs are dotted numeric identifiers
//! - Names are valid descriptors (a letter followed by letters, digits or hyphens)
//! - Every definition has a syntax or a superior
//! - Matching rules are ones the library can normalize with
//! - Loading the schemas into a registry on top of the embedded schemas
//!
//! ## Usage
//!
//! ### Validate a Single Schema File
//!
//! ```bash
//! cargo run --bin schema-validator schemas/custom.json
//! ```
//!
//! ### Validate All Schemas in a Directory
//!
//! ```bash
//! cargo run --bin schema-validator ./schemas/
//! ```
//!
//! ## Output Examples
//!
//! ```text
//! Validating schema file: schemas/custom.json
//! ✓ Schema is valid!
//!
//! Schema Summary:
//!   ID: custom
//!   Name: Custom
//!   Attribute types: 2
//!   Single-valued: 1
//!   Operational: 1
//!   Binary: 0
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: All schemas are valid
//! - `1`: One or more schemas are invalid or validation error occurred

use directory_core::schema::{
    AttributeTypeDefinition, MatchingRule, Schema, SchemaRegistry, syntax,
};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <schema-file-or-directory>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schemas/custom.json", args[0]);
        eprintln!("  {} ./schemas/", args[0]);
        process::exit(1);
    }

    let path = Path::new(&args[1]);

    if path.is_file() {
        validate_single_file(path);
    } else if path.is_dir() {
        validate_directory(path);
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn validate_single_file(file_path: &Path) {
    println!("Validating schema file: {}", file_path.display());

    match load_and_validate_schema(file_path) {
        Ok(schema) => {
            println!("✓ Schema is valid!");
            print_schema_summary(&schema);
            test_registry_loading(vec![schema]);
        }
        Err(e) => {
            eprintln!("❌ Schema validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn validate_directory(dir_path: &Path) {
    println!("Validating schemas in directory: {}", dir_path.display());

    let mut paths: Vec<_> = match fs::read_dir(dir_path) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect(),
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };
    paths.sort();

    let mut schemas = Vec::new();
    let mut error_count = 0;

    for path in &paths {
        println!("\nValidating: {}", path.display());
        match load_and_validate_schema(path) {
            Ok(schema) => {
                println!("  ✓ Valid - {} ({})", schema.name, schema.id);
                schemas.push(schema);
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid schemas: {}", schemas.len());
    println!("  Invalid schemas: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }

    test_registry_loading(schemas);
}

/// Load the schemas on top of the embedded ones, as a server would.
fn test_registry_loading(schemas: Vec<Schema>) {
    println!("\nTesting schema registry loading...");

    let mut registry = match SchemaRegistry::new() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("❌ Failed to load embedded schemas: {}", e);
            process::exit(1);
        }
    };

    for schema in schemas {
        let id = schema.id.clone();
        if let Err(e) = registry.add_schema(schema) {
            eprintln!("❌ Failed to load schema '{}': {}", id, e);
            process::exit(1);
        }
    }

    println!("✓ Schema registry loaded successfully");
    println!("  Total attribute types: {}", registry.len());
    for schema in registry.schemas() {
        println!(
            "    - {} ({}): {} attribute type(s)",
            schema.name,
            schema.id,
            schema.attribute_types.len()
        );
    }
}

fn load_and_validate_schema(file_path: &Path) -> Result<Schema, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;

    // Parse as JSON first for friendlier field errors
    let json_value: serde_json::Value = serde_json::from_str(&content)?;
    let obj = json_value
        .as_object()
        .ok_or("Schema must be a JSON object")?;

    for field in ["id", "name", "attributeTypes"] {
        if !obj.contains_key(field) {
            return Err(format!("Schema missing required '{}' field", field).into());
        }
    }

    let schema = SchemaRegistry::load_schema_from_str(&content)?;
    validate_schema_structure(&schema)?;
    Ok(schema)
}

fn validate_schema_structure(schema: &Schema) -> Result<(), Box<dyn std::error::Error>> {
    if schema.id.trim().is_empty() {
        return Err("Schema ID cannot be empty".into());
    }
    if schema.name.trim().is_empty() {
        return Err("Schema name cannot be empty".into());
    }
    if schema.attribute_types.is_empty() {
        return Err("Schema must have at least one attribute type".into());
    }

    for (i, definition) in schema.attribute_types.iter().enumerate() {
        validate_definition(definition, &format!("attributeTypes[{}]", i))?;
    }
    Ok(())
}

fn validate_definition(
    definition: &AttributeTypeDefinition,
    context: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if !is_numeric_oid(&definition.oid) {
        return Err(format!("{}: '{}' is not a numeric OID", context, definition.oid).into());
    }

    for name in &definition.names {
        if !is_descriptor(name) {
            return Err(format!("{}: '{}' is not a valid attribute name", context, name).into());
        }
    }

    if definition.syntax.is_none() && definition.sup.is_none() {
        return Err(format!("{}: needs a syntax or a superior", context).into());
    }

    if let Some(syntax_oid) = &definition.syntax {
        if !is_numeric_oid(syntax_oid) {
            return Err(format!("{}: syntax '{}' is not a numeric OID", context, syntax_oid).into());
        }
        if definition.human_readable.is_none() && !syntax::is_human_readable(syntax_oid) {
            println!("  note: {} is binary (syntax {})", context, syntax_oid);
        }
    }

    if let Some(rule) = &definition.equality {
        if MatchingRule::from_id(rule).is_none() {
            println!(
                "  warning: {}: equality rule '{}' is unknown, values compare as written",
                context, rule
            );
        }
    }

    Ok(())
}

fn is_numeric_oid(oid: &str) -> bool {
    oid.contains('.')
        && oid
            .split('.')
            .all(|arc| !arc.is_empty() && arc.chars().all(|c| c.is_ascii_digit()))
}

fn is_descriptor(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn print_schema_summary(schema: &Schema) {
    println!();
    println!("Schema Summary:");
    println!("  ID: {}", schema.id);
    println!("  Name: {}", schema.name);
    if !schema.description.is_empty() {
        println!("  Description: {}", schema.description);
    }
    println!("  Attribute types: {}", schema.attribute_types.len());

    let single_valued = schema
        .attribute_types
        .iter()
        .filter(|d| d.single_valued)
        .count();
    let operational = schema
        .attribute_types
        .iter()
        .filter(|d| d.usage.is_operational())
        .count();
    let binary = schema
        .attribute_types
        .iter()
        .filter(|d| {
            d.human_readable == Some(false)
                || d.syntax.as_deref().is_some_and(|s| !syntax::is_human_readable(s))
        })
        .count();

    println!("  Single-valued: {}", single_valued);
    println!("  Operational: {}", operational);
    println!("  Binary: {}", binary);
}
