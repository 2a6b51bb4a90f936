// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Lakeport
//!
//! Moves semi-structured event documents from an operational document
//! store into a columnar warehouse via an object-storage staging layer.
//!
//! ## Features
//!
//! - **Schema-Driven Normalization**: Walk nested documents against a
//!   declarative schema, coerce scalars, flatten records
//! - **Size-Bounded Chunking**: Stream normalized documents into
//!   sequentially named JSONL spool files
//! - **Concurrent Staging**: Upload sealed chunks to GCS/S3/Azure on a
//!   bounded worker pool
//! - **Bulk Load Trigger**: Route staged files to warehouse tables by
//!   filename prefix, over HTTP or the CLI
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lakeport::config::ExportConfig;
//! use lakeport::export::ExportDriver;
//! use lakeport::normalize::Normalizer;
//! use lakeport::schema::summary_schema;
//! use lakeport::source::JsonlFileSource;
//! use lakeport::storage::StagingSink;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> lakeport::Result<()> {
//!     let config = ExportConfig::from_path("lakeport.yaml")?;
//!
//!     let driver = ExportDriver::new(
//!         Arc::new(JsonlFileSource::new("events.jsonl")),
//!         Normalizer::new(summary_schema()),
//!         Arc::new(StagingSink::parse(&config.staging.url)?),
//!         config.source.clone(),
//!         config.staging.clone(),
//!         config.export.clone(),
//!     );
//!
//!     let outcome = driver.run().await?;
//!     println!("exported {} documents", outcome.docs_processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Export Driver                            │
//! │  cursor → normalize → chunk → upload     run() → ExportOutcome  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Source  │ Normalize │  Chunk Writer │  Uploads  │    Load     │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Cursor   │ Coercion  │ JSONL spool   │ Bounded   │ Prefix map  │
//! │ Batched  │ Overrides │ Seal/rollover │ pool      │ REST jobs   │
//! │ Release  │ Records   │ Lazy open     │ Timeout   │ HTTP trigger│
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Run configuration
pub mod config;

/// Target schema declarations
pub mod schema;

/// Schema-driven document normalization
pub mod normalize;

/// Document source abstraction
pub mod source;

/// Export engine (chunking, upload, driver)
pub mod export;

/// Staging sink over object storage
pub mod storage;

/// CSV-to-record conversion
pub mod convert;

/// Bulk load invocation and routing
pub mod load;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use export::{ExportDriver, ExportOutcome};
pub use normalize::Normalizer;
pub use schema::{load_schema, Schema};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
