//! Document normalization
//!
//! Projects an arbitrarily nested source document onto the target schema:
//! scalars are coerced to their declared type, repeated records always
//! materialize as arrays, non-repeated records collapse to null when the
//! source shape does not match, and fields absent from the schema are
//! dropped. A corrupt document degrades field-by-field; it never aborts
//! the batch.

mod coerce;

pub use coerce::{coerce, object_id_as_string};

use crate::schema::{Schema, SchemaField, SchemaNode};
use crate::types::{JsonObject, JsonValue, UnknownElementPolicy};
use serde_json::Value;

/// Per-field coercion overrides, consulted before the generic rule
///
/// The warehouse schema pins some columns to STRING regardless of what
/// upstream currently emits; forcing them here guards against type drift.
#[derive(Debug, Clone)]
pub struct FieldOverrides {
    forced_string: Vec<String>,
}

impl Default for FieldOverrides {
    fn default() -> Self {
        Self {
            forced_string: vec!["api_version".to_string()],
        }
    }
}

impl FieldOverrides {
    /// No overrides at all
    pub fn none() -> Self {
        Self {
            forced_string: Vec::new(),
        }
    }

    /// Force an additional field to STRING
    #[must_use]
    pub fn force_string(mut self, field: impl Into<String>) -> Self {
        self.forced_string.push(field.into());
        self
    }

    /// Check whether a field is pinned to STRING
    pub fn is_forced_string(&self, field: &str) -> bool {
        self.forced_string.iter().any(|f| f == field)
    }
}

/// Schema-driven document normalizer
///
/// Construct once per schema and reuse across the whole stream; all
/// dispatch decisions were resolved when the schema was loaded.
#[derive(Debug, Clone)]
pub struct Normalizer {
    schema: Schema,
    overrides: FieldOverrides,
    policy: UnknownElementPolicy,
}

impl Normalizer {
    /// Create a normalizer with the default override table
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            overrides: FieldOverrides::default(),
            policy: UnknownElementPolicy::default(),
        }
    }

    /// Replace the override table
    #[must_use]
    pub fn with_overrides(mut self, overrides: FieldOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the policy for non-object elements inside repeated fields
    #[must_use]
    pub fn with_unknown_element_policy(mut self, policy: UnknownElementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The schema this normalizer projects onto
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Normalize one source document
    ///
    /// Always returns an object with every schema field present. A
    /// non-object input yields the schema shape with all scalars and
    /// records null and all repeated fields empty.
    pub fn normalize(&self, doc: &JsonValue) -> JsonValue {
        static EMPTY: once_cell::sync::Lazy<JsonObject> =
            once_cell::sync::Lazy::new(JsonObject::new);

        let source = doc.as_object().unwrap_or(&EMPTY);
        Value::Object(self.normalize_fields(source, self.schema.fields(), ""))
    }

    fn normalize_fields(
        &self,
        source: &JsonObject,
        fields: &[SchemaField],
        parent: &str,
    ) -> JsonObject {
        let mut out = JsonObject::new();

        for field in fields {
            let value = source.get(&field.name);
            out.insert(
                field.name.clone(),
                self.normalize_node(value, field, parent),
            );
        }

        out
    }

    fn normalize_node(
        &self,
        value: Option<&JsonValue>,
        field: &SchemaField,
        parent: &str,
    ) -> JsonValue {
        match &field.node {
            SchemaNode::Scalar(field_type) => {
                let value = value.unwrap_or(&Value::Null);
                // Database-generated identifiers become plain strings before
                // any type coercion sees them.
                let value = match object_id_as_string(value) {
                    Some(id) => Value::String(id),
                    None => value.clone(),
                };

                let target = if self.overrides.is_forced_string(&field.name) {
                    crate::schema::FieldType::String
                } else {
                    *field_type
                };

                let coerced = coerce(&value, target);
                if coerced.is_null() && !value.is_null() {
                    tracing::debug!(
                        field = %join_path(parent, &field.name),
                        %target,
                        "value did not coerce, set to null"
                    );
                }
                coerced
            }

            SchemaNode::Record { fields, repeated: true } => {
                let elements: Vec<JsonValue> = match value {
                    // Absent or null reads as empty, never null
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => items.clone(),
                    // A single bare value wraps as a one-element sequence
                    Some(other) => vec![other.clone()],
                };

                let path = join_path(parent, &field.name);
                let mut out = Vec::with_capacity(elements.len());
                for element in &elements {
                    match element.as_object() {
                        Some(obj) => {
                            out.push(Value::Object(self.normalize_fields(obj, fields, &path)));
                        }
                        None => self.report_unknown_element(&path, element),
                    }
                }
                Value::Array(out)
            }

            SchemaNode::Record { fields, repeated: false } => match value.and_then(Value::as_object)
            {
                // The whole sub-record collapses to null rather than a
                // sub-document of nulls.
                None => Value::Null,
                Some(obj) => {
                    let path = join_path(parent, &field.name);
                    Value::Object(self.normalize_fields(obj, fields, &path))
                }
            },
        }
    }

    fn report_unknown_element(&self, path: &str, element: &JsonValue) {
        match self.policy {
            UnknownElementPolicy::Skip => {
                tracing::debug!(field = path, "dropped non-object element in repeated field");
            }
            UnknownElementPolicy::Warn => {
                tracing::warn!(
                    field = path,
                    element = %element,
                    "dropped non-object element in repeated field"
                );
            }
        }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

#[cfg(test)]
mod tests;
