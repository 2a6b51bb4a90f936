//! Error types for Lakeport
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for Lakeport
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Unknown type tag '{tag}' for field '{field}'")]
    UnknownTypeTag { field: String, tag: String },

    // ============================================================================
    // Source Errors
    // ============================================================================
    #[error("Source error: {message}")]
    Source { message: String },

    #[error("Cursor already closed")]
    CursorClosed,

    // ============================================================================
    // Staging / Upload Errors
    // ============================================================================
    #[error("Staging sink error: {message}")]
    Sink { message: String },

    #[error("Upload of chunk {index} failed: {message}")]
    Upload { index: usize, message: String },

    #[error("Upload of chunk {index} timed out after {timeout_secs}s")]
    UploadTimeout { index: usize, timeout_secs: u64 },

    // ============================================================================
    // Bulk Load Errors
    // ============================================================================
    #[error("Load into table '{table}' failed: {message}")]
    Load { table: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a source error
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    /// Create a staging sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Create an upload error for a specific chunk
    pub fn upload(index: usize, message: impl Into<String>) -> Self {
        Self::Upload {
            index,
            message: message.into(),
        }
    }

    /// Create a load error with the target table attached
    pub fn load(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Check if this error aborts a whole export run
    ///
    /// Coercion and malformed-structure problems never become errors at all;
    /// everything that does reach this type is fatal to the run except
    /// config-shaped problems surfaced before the run starts.
    pub fn is_fatal_to_run(&self) -> bool {
        !matches!(
            self,
            Error::Config { .. } | Error::MissingConfigField { .. } | Error::UnknownTypeTag { .. }
        )
    }
}

/// Result type alias for Lakeport
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
