//! Target schema module
//!
//! Declarative description of the warehouse-shaped output: a finite,
//! acyclic tree of scalar fields and (possibly repeated) records.
//!
//! # Overview
//!
//! This module provides:
//! - `FieldType` - primitive type tags for scalar leaves
//! - `SchemaNode` / `SchemaField` / `Schema` - the resolved schema tree
//! - YAML loading with declaration order preserved
//! - The built-in event summary schema

mod loader;
mod types;

pub use loader::{load_schema, parse_schema};
pub use types::{FieldType, Schema, SchemaField, SchemaNode};

/// Built-in schema for the event summary collection
///
/// Shipped with the binary so the export can run without an external
/// schema file.
pub fn summary_schema() -> Schema {
    parse_schema(include_str!("summary.yaml"))
        .expect("built-in summary schema must parse")
}

#[cfg(test)]
mod tests;
