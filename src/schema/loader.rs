//! Schema loading from YAML declarations
//!
//! A declaration maps field names to either a type tag string or a nested
//! record block:
//!
//! ```yaml
//! fields:
//!   _id: STRING
//!   time_stamp: INTEGER
//!   cart_products:
//!     repeated: true
//!     fields:
//!       amount: INTEGER
//!       price: STRING
//! ```
//!
//! Declaration order is the output column order, so the mapping is walked
//! as parsed rather than deserialized into a sorted map.

use crate::error::{Error, Result};
use crate::schema::types::{FieldType, Schema, SchemaField, SchemaNode};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Load a schema declaration from a YAML file
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    parse_schema(&content)
}

/// Parse a schema declaration from a YAML string
pub fn parse_schema(content: &str) -> Result<Schema> {
    let doc: Value = serde_yaml::from_str(content)?;

    let root = doc
        .as_mapping()
        .ok_or_else(|| Error::schema("schema declaration must be a mapping"))?;

    // Accept either a top-level `fields:` block or a bare field mapping
    let fields_value = root.get("fields").unwrap_or(&doc);
    let mapping = fields_value
        .as_mapping()
        .ok_or_else(|| Error::schema("'fields' must be a mapping"))?;

    Ok(Schema::new(parse_fields(mapping, "")?))
}

fn parse_fields(mapping: &Mapping, parent: &str) -> Result<Vec<SchemaField>> {
    let mut fields = Vec::with_capacity(mapping.len());

    for (key, value) in mapping {
        let name = key
            .as_str()
            .ok_or_else(|| Error::schema(format!("non-string field name under '{parent}'")))?;
        let path = join_path(parent, name);
        fields.push(SchemaField {
            name: name.to_string(),
            node: parse_node(value, &path)?,
        });
    }

    Ok(fields)
}

fn parse_node(value: &Value, path: &str) -> Result<SchemaNode> {
    match value {
        // Scalar leaf: a bare type tag
        Value::String(tag) => Ok(SchemaNode::Scalar(FieldType::from_tag(tag))),

        // Record block: `repeated` flag + `fields` mapping
        Value::Mapping(block) => {
            let repeated = block
                .get("repeated")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            let fields_value = block.get("fields").ok_or_else(|| {
                Error::schema(format!("record field '{path}' is missing 'fields'"))
            })?;
            let mapping = fields_value.as_mapping().ok_or_else(|| {
                Error::schema(format!("'fields' of record '{path}' must be a mapping"))
            })?;

            Ok(SchemaNode::Record {
                fields: parse_fields(mapping, path)?,
                repeated,
            })
        }

        other => Err(Error::schema(format!(
            "field '{path}' must be a type tag or a record block, got: {other:?}"
        ))),
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}
