//! JSONL file document source
//!
//! Streams documents from a newline-delimited JSON file. Lines are read
//! in `batch_size` groups so that the cursor's suspension points mirror a
//! remote source's fetch cadence.

use super::{DocumentCursor, DocumentSource};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Document source over a local JSONL file
#[derive(Debug, Clone)]
pub struct JsonlFileSource {
    path: PathBuf,
}

impl JsonlFileSource {
    /// Create a source reading from the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSource for JsonlFileSource {
    async fn open(&self, batch_size: usize) -> Result<Box<dyn DocumentCursor>> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                Error::source(format!("failed to open {}: {e}", self.path.display()))
            }
        })?;

        Ok(Box::new(JsonlCursor {
            reader: Some(BufReader::new(file)),
            buffer: VecDeque::new(),
            batch_size: batch_size.max(1),
            line_number: 0,
        }))
    }
}

struct JsonlCursor {
    // None once closed; close is idempotent and drop releases the handle
    reader: Option<BufReader<std::fs::File>>,
    buffer: VecDeque<JsonValue>,
    batch_size: usize,
    line_number: usize,
}

impl JsonlCursor {
    fn fill_buffer(&mut self) -> Result<()> {
        let Some(reader) = self.reader.as_mut() else {
            return Err(Error::CursorClosed);
        };

        while self.buffer.len() < self.batch_size {
            let mut line = String::new();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| Error::source(format!("read failed at line {}: {e}", self.line_number + 1)))?;
            if read == 0 {
                break;
            }
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let doc: JsonValue = serde_json::from_str(line).map_err(|e| {
                Error::source(format!("malformed JSON at line {}: {e}", self.line_number))
            })?;
            self.buffer.push_back(doc);
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentCursor for JsonlCursor {
    async fn next(&mut self) -> Result<Option<JsonValue>> {
        if self.buffer.is_empty() {
            self.fill_buffer()?;
        }
        Ok(self.buffer.pop_front())
    }

    async fn close(&mut self) -> Result<()> {
        self.reader = None;
        self.buffer.clear();
        Ok(())
    }
}
