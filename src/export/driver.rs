//! Export driver
//!
//! Owns the document cursor and drives normalize → chunk → upload,
//! reporting a single aggregate outcome. The cursor is released exactly
//! once on every exit path. Staged chunks are never rolled back on
//! failure; the idempotent, overwrite-based load step carries that
//! correctness burden.

use super::chunk::{ChunkWriter, ChunkWriterConfig};
use super::uploader::UploadDispatcher;
use crate::config::{ExportOptions, SourceConfig, StagingConfig};
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::source::{DocumentCursor, DocumentSource};
use crate::storage::StagingSink;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

const PROGRESS_EVERY: u64 = 100_000;

/// Counters advanced while a run is in flight
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportStats {
    /// Documents normalized and written
    pub docs_processed: u64,
    /// Chunks sealed (submitted for upload)
    pub chunks_sealed: u64,
}

/// Aggregate result of a completed export run
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Documents normalized and written
    pub docs_processed: u64,
    /// Chunks sealed and submitted
    pub chunks_sealed: u64,
    /// Chunks confirmed staged
    pub chunks_uploaded: u64,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// Drives one export run end to end
pub struct ExportDriver {
    source: Arc<dyn DocumentSource>,
    normalizer: Normalizer,
    sink: Arc<StagingSink>,
    source_config: SourceConfig,
    staging: StagingConfig,
    options: ExportOptions,
}

impl ExportDriver {
    /// Create a driver; all configuration is explicit
    pub fn new(
        source: Arc<dyn DocumentSource>,
        normalizer: Normalizer,
        sink: Arc<StagingSink>,
        source_config: SourceConfig,
        staging: StagingConfig,
        options: ExportOptions,
    ) -> Self {
        Self {
            source,
            normalizer,
            sink,
            source_config,
            staging,
            options,
        }
    }

    /// Run the export to completion
    ///
    /// State machine: INIT → STREAMING → SEALING_FINAL → UPLOADING → DONE,
    /// with FAILED reachable from any non-DONE state. A failure aborts the
    /// remaining stream; counters still reflect documents normalized
    /// before the failure was observed.
    pub async fn run(&self) -> Result<ExportOutcome> {
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(
            staging = %self.staging.url,
            prefix = %self.staging.file_prefix,
            "starting export"
        );

        // INIT: acquire the cursor
        let mut cursor = self.source.open(self.source_config.batch_size).await?;

        let run_result = self.run_with_cursor(cursor.as_mut()).await;

        // Release on every exit path; close errors only surface when the
        // run itself succeeded.
        let close_result = cursor.close().await;
        let (stats, uploaded) = run_result?;
        close_result?;

        let outcome = ExportOutcome {
            docs_processed: stats.docs_processed,
            chunks_sealed: stats.chunks_sealed,
            chunks_uploaded: uploaded,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            docs = outcome.docs_processed,
            chunks = outcome.chunks_uploaded,
            duration_ms = outcome.duration_ms,
            "export complete"
        );

        Ok(outcome)
    }

    async fn run_with_cursor(
        &self,
        cursor: &mut dyn DocumentCursor,
    ) -> Result<(ExportStats, u64)> {
        let mut stats = ExportStats::default();

        let mut writer = ChunkWriter::new(ChunkWriterConfig::new(
            &self.staging.spool_dir,
            &self.staging.file_prefix,
            self.options.max_docs_per_chunk,
        ))?;

        let mut dispatcher = UploadDispatcher::new(
            Arc::clone(&self.sink),
            self.options.upload_concurrency,
            Duration::from_secs(self.options.transfer_timeout_secs),
        );

        // STREAMING
        while let Some(doc) = cursor.next().await? {
            let normalized = self.normalizer.normalize(&doc);

            if let Some(sealed) = writer.append(&normalized)? {
                stats.chunks_sealed += 1;
                dispatcher.submit(sealed);
            }

            stats.docs_processed += 1;
            if stats.docs_processed % PROGRESS_EVERY == 0 {
                tracing::info!(docs = stats.docs_processed, "export progress");
            }
        }

        // SEALING_FINAL: the last chunk ships even when partial
        if let Some(sealed) = writer.seal()? {
            stats.chunks_sealed += 1;
            dispatcher.submit(sealed);
        }

        // UPLOADING: unordered completion, all must land
        let report = match dispatcher.finish().await {
            Ok(report) => report,
            Err(e) => {
                // Counters reflect documents normalized before the
                // failure was observed.
                tracing::error!(
                    docs = stats.docs_processed,
                    chunks_sealed = stats.chunks_sealed,
                    "export failed during upload: {e}"
                );
                return Err(e);
            }
        };

        Ok((stats, report.len() as u64))
    }
}
