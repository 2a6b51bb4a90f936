//! Export engine
//!
//! Main export loop and chunk orchestration.
//!
//! # Overview
//!
//! The export module provides:
//! - `ChunkWriter` - accumulates normalized documents into size-bounded
//!   JSONL spool files
//! - `UploadDispatcher` - ships sealed chunks to the staging sink on a
//!   bounded worker pool
//! - `ExportDriver` - drives cursor → normalize → chunk → upload and
//!   reports one aggregate outcome

mod chunk;
mod driver;
mod uploader;

pub use chunk::{chunk_file_name, ChunkWriter, ChunkWriterConfig, SealedChunk};
pub use driver::{ExportDriver, ExportOutcome, ExportStats};
pub use uploader::{UploadDispatcher, UploadReport, UploadedChunk};
