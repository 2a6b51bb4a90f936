//! In-memory document source
//!
//! Backs tests and demos; also the reference implementation of the cursor
//! contract (batch fetches, idempotent close).

use super::{DocumentCursor, DocumentSource};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::VecDeque;

/// Document source over a fixed in-memory list
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<JsonValue>,
}

impl MemorySource {
    /// Create a source over the given documents
    pub fn new(documents: Vec<JsonValue>) -> Self {
        Self { documents }
    }

    /// Number of documents the source holds
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the source is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn open(&self, batch_size: usize) -> Result<Box<dyn DocumentCursor>> {
        Ok(Box::new(MemoryCursor {
            remaining: self.documents.clone().into(),
            buffer: VecDeque::new(),
            batch_size: batch_size.max(1),
            closed: false,
        }))
    }
}

struct MemoryCursor {
    remaining: VecDeque<JsonValue>,
    buffer: VecDeque<JsonValue>,
    batch_size: usize,
    closed: bool,
}

#[async_trait]
impl DocumentCursor for MemoryCursor {
    async fn next(&mut self) -> Result<Option<JsonValue>> {
        if self.closed {
            return Err(Error::CursorClosed);
        }

        if self.buffer.is_empty() {
            // Fetch the next batch
            for _ in 0..self.batch_size {
                match self.remaining.pop_front() {
                    Some(doc) => self.buffer.push_back(doc),
                    None => break,
                }
            }
        }

        Ok(self.buffer.pop_front())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.remaining.clear();
        self.buffer.clear();
        Ok(())
    }
}
