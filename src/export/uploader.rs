//! Bounded-concurrency chunk upload
//!
//! Sealed chunks transfer to the staging sink on background tasks gated
//! by a semaphore; submission never blocks the export loop. Completion
//! order is unordered, and a single failed transfer fails the whole run:
//! the loader cannot distinguish a missing chunk from an empty one.

use super::chunk::SealedChunk;
use crate::error::{Error, Result};
use crate::storage::StagingSink;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// One successfully staged chunk
#[derive(Debug, Clone)]
pub struct UploadedChunk {
    /// Sequential chunk index
    pub index: usize,
    /// Staged URI
    pub uri: String,
    /// Documents in the chunk
    pub docs: usize,
}

/// Aggregate result of all uploads in a run
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Every staged chunk, in completion order
    pub uploaded: Vec<UploadedChunk>,
}

impl UploadReport {
    /// Number of chunks staged
    pub fn len(&self) -> usize {
        self.uploaded.len()
    }

    /// Check if nothing was staged
    pub fn is_empty(&self) -> bool {
        self.uploaded.is_empty()
    }
}

/// Ships sealed chunks to the staging sink with bounded concurrency
pub struct UploadDispatcher {
    sink: Arc<StagingSink>,
    semaphore: Arc<Semaphore>,
    transfer_timeout: Duration,
    tasks: Vec<JoinHandle<Result<UploadedChunk>>>,
}

impl UploadDispatcher {
    /// Create a dispatcher over the given sink
    pub fn new(sink: Arc<StagingSink>, concurrency: usize, transfer_timeout: Duration) -> Self {
        Self {
            sink,
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            transfer_timeout,
            tasks: Vec::new(),
        }
    }

    /// Chunks submitted so far
    pub fn submitted(&self) -> usize {
        self.tasks.len()
    }

    /// Submit a sealed chunk for background transfer
    ///
    /// Returns immediately; the concurrency bound is enforced inside the
    /// spawned task so the export loop keeps producing while prior chunks
    /// are in flight. Each chunk is owned by exactly one task from here on.
    pub fn submit(&mut self, chunk: SealedChunk) {
        let sink = Arc::clone(&self.sink);
        let semaphore = Arc::clone(&self.semaphore);
        let timeout = self.transfer_timeout;

        self.tasks.push(tokio::spawn(async move {
            // Closed only if the dispatcher is dropped mid-run
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|e| Error::upload(chunk.index, format!("worker pool closed: {e}")))?;

            let data = tokio::fs::read(&chunk.path)
                .await
                .map_err(|e| Error::upload(chunk.index, format!("failed to read spool file: {e}")))?;

            let uri = tokio::time::timeout(timeout, sink.put(&chunk.file_name, Bytes::from(data)))
                .await
                .map_err(|_| Error::UploadTimeout {
                    index: chunk.index,
                    timeout_secs: timeout.as_secs(),
                })?
                .map_err(|e| Error::upload(chunk.index, e.to_string()))?;

            tracing::info!(index = chunk.index, docs = chunk.docs, %uri, "staged chunk");

            Ok(UploadedChunk {
                index: chunk.index,
                uri,
                docs: chunk.docs,
            })
        }));
    }

    /// Await every submitted transfer
    ///
    /// All tasks are joined before the first error is surfaced, so no
    /// transfer is left dangling; any failure fails the run even if every
    /// other chunk landed.
    pub async fn finish(self) -> Result<UploadReport> {
        let results = futures::future::join_all(self.tasks).await;

        let mut report = UploadReport::default();
        let mut first_error = None;

        for joined in results {
            match joined {
                Ok(Ok(uploaded)) => report.uploaded.push(uploaded),
                Ok(Err(e)) => {
                    tracing::error!("chunk upload failed: {e}");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    first_error.get_or_insert(Error::Other(format!("upload task panicked: {e}")));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}
