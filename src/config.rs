//! Run configuration
//!
//! Everything the export driver and trigger server need is passed in
//! explicitly at construction; nothing reads process-wide singletons, so
//! concurrent and test-isolated runs stay independent.

use crate::error::Result;
use crate::types::{UnknownElementPolicy, WriteMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete run configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Document source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Staging sink settings
    #[serde(default)]
    pub staging: StagingConfig,

    /// Chunking and upload settings
    #[serde(default)]
    pub export: ExportOptions,

    /// Bulk load settings
    #[serde(default)]
    pub load: LoadConfig,
}

impl ExportConfig {
    /// Load configuration from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a YAML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

// ============================================================================
// Source
// ============================================================================

/// Document source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to a JSONL document file (when exporting from a local stream)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Cursor fetch batch size
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            batch_size: default_batch_size(),
        }
    }
}

fn default_batch_size() -> usize {
    10_000
}

// ============================================================================
// Staging
// ============================================================================

/// Staging sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Staging destination URL (gs://, s3://, az://, or a local path)
    #[serde(default = "default_staging_url")]
    pub url: String,

    /// Prefix for staged chunk files; the loader routes tables by it
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Local spool directory for open chunks
    #[serde(default = "default_spool_dir")]
    pub spool_dir: PathBuf,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            url: default_staging_url(),
            file_prefix: default_file_prefix(),
            spool_dir: default_spool_dir(),
        }
    }
}

fn default_staging_url() -> String {
    "./staging".to_string()
}

fn default_file_prefix() -> String {
    "summary".to_string()
}

fn default_spool_dir() -> PathBuf {
    std::env::temp_dir().join("lakeport")
}

// ============================================================================
// Export Options
// ============================================================================

/// Chunking and upload settings
///
/// The chunk limit bounds staged-file size for the bulk loader, not
/// memory; open chunks stream to disk as they grow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Maximum documents per chunk
    #[serde(default = "default_max_docs_per_chunk")]
    pub max_docs_per_chunk: usize,

    /// In-flight upload concurrency
    #[serde(default = "default_upload_concurrency")]
    pub upload_concurrency: usize,

    /// Per-transfer timeout in seconds; generous, sized for large files
    #[serde(default = "default_transfer_timeout_secs")]
    pub transfer_timeout_secs: u64,

    /// What to do with non-object elements inside repeated fields
    #[serde(default)]
    pub unknown_elements: UnknownElementPolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_docs_per_chunk: default_max_docs_per_chunk(),
            upload_concurrency: default_upload_concurrency(),
            transfer_timeout_secs: default_transfer_timeout_secs(),
            unknown_elements: UnknownElementPolicy::default(),
        }
    }
}

impl ExportOptions {
    /// Create options with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk document limit
    #[must_use]
    pub fn with_max_docs_per_chunk(mut self, max: usize) -> Self {
        self.max_docs_per_chunk = max;
        self
    }

    /// Set upload concurrency
    #[must_use]
    pub fn with_upload_concurrency(mut self, concurrency: usize) -> Self {
        self.upload_concurrency = concurrency;
        self
    }

    /// Set the per-transfer timeout
    #[must_use]
    pub fn with_transfer_timeout_secs(mut self, secs: u64) -> Self {
        self.transfer_timeout_secs = secs;
        self
    }

    /// Set the unknown-element policy
    #[must_use]
    pub fn with_unknown_elements(mut self, policy: UnknownElementPolicy) -> Self {
        self.unknown_elements = policy;
        self
    }
}

fn default_max_docs_per_chunk() -> usize {
    1_000_000
}

fn default_upload_concurrency() -> usize {
    8
}

fn default_transfer_timeout_secs() -> u64 {
    1800
}

// ============================================================================
// Load
// ============================================================================

/// Bulk load settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Warehouse load-job endpoint
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Target dataset name
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Scheme used to build staged-file URIs in the trigger surface
    #[serde(default = "default_bucket_scheme")]
    pub bucket_scheme: String,

    /// Filename prefix to table routes; empty means the built-in table map
    #[serde(default)]
    pub tables: Vec<TableRoute>,

    /// Load jobs run by the `load` command
    #[serde(default)]
    pub jobs: Vec<LoadJob>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            dataset: default_dataset(),
            bucket_scheme: default_bucket_scheme(),
            tables: Vec::new(),
            jobs: Vec::new(),
        }
    }
}

fn default_dataset() -> String {
    "analytics".to_string()
}

fn default_bucket_scheme() -> String {
    "gs".to_string()
}

/// One filename-prefix to table route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRoute {
    /// Staged filename prefix
    pub prefix: String,
    /// Target table
    pub table: String,
}

/// One configured load job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadJob {
    /// Target table
    pub table: String,
    /// Staged file URI, wildcards allowed (e.g. `gs://b/summary_*.jsonl`)
    pub uri: String,
    /// Explicit schema file; None inherits the table's schema
    #[serde(default)]
    pub schema_file: Option<PathBuf>,
    /// Write disposition
    #[serde(default)]
    pub write_mode: WriteMode,
}
