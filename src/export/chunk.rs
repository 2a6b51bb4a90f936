//! Size-bounded chunk spool files
//!
//! A chunk is an append-only log of line-delimited serialized documents,
//! streamed to disk as it grows and sealed by closing the stream. Every
//! document is a self-contained record; a partial chunk never corrupts
//! sibling records.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Render the staged file name for a chunk index
///
/// Zero-padded sequential naming is the contract the loader's
/// prefix-to-table routing depends on.
pub fn chunk_file_name(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index:05}.jsonl")
}

/// Configuration for the chunk writer
#[derive(Debug, Clone)]
pub struct ChunkWriterConfig {
    /// Maximum documents per chunk
    pub max_docs: usize,
    /// Directory for open spool files
    pub spool_dir: PathBuf,
    /// Staged file name prefix
    pub file_prefix: String,
}

impl ChunkWriterConfig {
    /// Create a config spooling under the given directory
    pub fn new(spool_dir: impl AsRef<Path>, file_prefix: impl Into<String>, max_docs: usize) -> Self {
        Self {
            max_docs: max_docs.max(1),
            spool_dir: spool_dir.as_ref().to_path_buf(),
            file_prefix: file_prefix.into(),
        }
    }
}

/// A sealed, immutable chunk ready for upload
#[derive(Debug)]
pub struct SealedChunk {
    /// Sequential chunk index
    pub index: usize,
    /// Local spool file path
    pub path: PathBuf,
    /// Staged object name
    pub file_name: String,
    /// Documents in the chunk
    pub docs: usize,
}

struct OpenChunk {
    index: usize,
    path: PathBuf,
    file_name: String,
    writer: BufWriter<File>,
    docs: usize,
}

/// Accumulates normalized documents into size-bounded spool files
pub struct ChunkWriter {
    config: ChunkWriterConfig,
    current: Option<OpenChunk>,
    next_index: usize,
}

impl ChunkWriter {
    /// Create a writer; the spool directory is created if missing
    pub fn new(config: ChunkWriterConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.spool_dir).map_err(|e| {
            Error::sink(format!(
                "failed to create spool dir {}: {e}",
                config.spool_dir.display()
            ))
        })?;

        Ok(Self {
            config,
            current: None,
            next_index: 0,
        })
    }

    /// Append one document
    ///
    /// The first append opens chunk 0 lazily; when the current chunk is
    /// already full, it is sealed and the next chunk opened before the
    /// write. Lazy open and rollover share this one seal-then-open path,
    /// so no empty leading chunk is ever produced. Returns the sealed
    /// chunk when a rollover happened.
    pub fn append(&mut self, doc: &JsonValue) -> Result<Option<SealedChunk>> {
        let sealed = if self.is_full() { self.seal()? } else { None };

        if self.current.is_none() {
            self.open_next()?;
        }

        // current is always Some here
        let Some(chunk) = self.current.as_mut() else {
            return Err(Error::sink("chunk writer lost its open chunk"));
        };

        let line = serde_json::to_string(doc)?;
        chunk.writer.write_all(line.as_bytes())?;
        chunk.writer.write_all(b"\n")?;
        chunk.docs += 1;

        Ok(sealed)
    }

    /// Seal the current chunk, if any
    ///
    /// Called once unconditionally at end-of-stream; a partial chunk is
    /// sealed as-is, and None means nothing was ever appended.
    pub fn seal(&mut self) -> Result<Option<SealedChunk>> {
        let Some(chunk) = self.current.take() else {
            return Ok(None);
        };

        let OpenChunk {
            index,
            path,
            file_name,
            mut writer,
            docs,
        } = chunk;

        writer.flush()?;
        // Dropping the writer closes the backing file
        drop(writer);

        tracing::debug!(index, docs, path = %path.display(), "sealed chunk");

        Ok(Some(SealedChunk {
            index,
            path,
            file_name,
            docs,
        }))
    }

    /// Check whether the next append would roll over to a new chunk
    pub fn is_full(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|c| c.docs >= self.config.max_docs)
    }

    /// Documents in the currently open chunk
    pub fn open_docs(&self) -> usize {
        self.current.as_ref().map_or(0, |c| c.docs)
    }

    /// Chunks opened so far
    pub fn chunks_opened(&self) -> usize {
        self.next_index
    }

    fn open_next(&mut self) -> Result<()> {
        let index = self.next_index;
        let file_name = chunk_file_name(&self.config.file_prefix, index);
        let path = self.config.spool_dir.join(&file_name);

        let file = File::create(&path)
            .map_err(|e| Error::sink(format!("failed to create {}: {e}", path.display())))?;

        self.current = Some(OpenChunk {
            index,
            path,
            file_name,
            writer: BufWriter::new(file),
            docs: 0,
        });
        self.next_index += 1;

        Ok(())
    }
}
