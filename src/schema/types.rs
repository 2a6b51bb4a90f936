//! Schema tree types
//!
//! The schema is resolved into an explicit tagged tree once at load time;
//! nothing re-inspects the declaration shape per document.

use serde::{Deserialize, Serialize};

/// Primitive type tag for a scalar leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Float,
    /// Value passes through unchanged
    Passthrough,
}

impl FieldType {
    /// Resolve a declaration tag into a type
    ///
    /// Unrecognized tags resolve to `Passthrough`: the value is carried to
    /// the warehouse unchanged, which is the tolerant contract the loader
    /// side depends on.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "STRING" => FieldType::String,
            "INTEGER" => FieldType::Integer,
            "BOOLEAN" => FieldType::Boolean,
            "FLOAT" => FieldType::Float,
            _ => FieldType::Passthrough,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "STRING"),
            FieldType::Integer => write!(f, "INTEGER"),
            FieldType::Boolean => write!(f, "BOOLEAN"),
            FieldType::Float => write!(f, "FLOAT"),
            FieldType::Passthrough => write!(f, "PASSTHROUGH"),
        }
    }
}

/// One node of the schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Scalar leaf with a target type tag
    Scalar(FieldType),
    /// Nested record, optionally repeated
    Record {
        /// Child fields in declaration order
        fields: Vec<SchemaField>,
        /// Whether the field materializes as an array of records
        repeated: bool,
    },
}

impl SchemaNode {
    /// Check if this node is a scalar leaf
    pub fn is_scalar(&self) -> bool {
        matches!(self, SchemaNode::Scalar(_))
    }

    /// Check if this node is a repeated record
    pub fn is_repeated(&self) -> bool {
        matches!(self, SchemaNode::Record { repeated: true, .. })
    }

    /// Depth of the subtree rooted at this node (scalar = 1)
    pub fn depth(&self) -> usize {
        match self {
            SchemaNode::Scalar(_) => 1,
            SchemaNode::Record { fields, .. } => {
                1 + fields.iter().map(|f| f.node.depth()).max().unwrap_or(0)
            }
        }
    }
}

/// A named field and its node
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    /// Output column name
    pub name: String,
    /// Target shape/type
    pub node: SchemaNode,
}

impl SchemaField {
    /// Create a scalar field
    pub fn scalar(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            node: SchemaNode::Scalar(field_type),
        }
    }

    /// Create a record field
    pub fn record(name: impl Into<String>, fields: Vec<SchemaField>, repeated: bool) -> Self {
        Self {
            name: name.into(),
            node: SchemaNode::Record { fields, repeated },
        }
    }
}

/// The root schema: an ordered list of top-level fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    fields: Vec<SchemaField>,
}

impl Schema {
    /// Create a schema from fields (declaration order preserved)
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a top-level field by name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Maximum depth of the schema tree
    pub fn depth(&self) -> usize {
        self.fields.iter().map(|f| f.node.depth()).max().unwrap_or(0)
    }
}
