//! Load invocation types

use crate::error::Result;
use crate::types::{JsonValue, WriteMode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One bulk load invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Target table identifier
    pub table: String,

    /// Staged file URIs; wildcards allowed where the warehouse supports
    /// them (e.g. `gs://bucket/summary_*.jsonl`)
    pub source_uris: Vec<String>,

    /// Explicit column schema; None inherits the existing table schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonValue>,

    /// Write disposition
    pub write_mode: WriteMode,
}

impl LoadRequest {
    /// Create a request for a single staged file
    pub fn single(table: impl Into<String>, uri: impl Into<String>, write_mode: WriteMode) -> Self {
        Self {
            table: table.into(),
            source_uris: vec![uri.into()],
            schema: None,
            write_mode,
        }
    }

    /// Attach an explicit schema
    #[must_use]
    pub fn with_schema(mut self, schema: JsonValue) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Result of a completed load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOutcome {
    /// Target table
    pub table: String,
    /// Rows in the table after the load
    pub rows_loaded: u64,
}

/// Ingests staged files into a warehouse table
///
/// Implementations must tolerate unknown fields in the staged records;
/// the export schema may trail the table schema and extra fields must
/// never fail a load.
#[async_trait]
pub trait BulkLoader: Send + Sync {
    /// Run one load to completion
    async fn load(&self, request: &LoadRequest) -> Result<LoadOutcome>;
}
