//! Document source abstraction
//!
//! The export core reads from an unbounded, ordered stream of
//! semi-structured documents through a cursor. Implementations fetch in
//! configurable batches and must release any server-side iteration state
//! exactly once, regardless of how the run exits.

mod jsonl;
mod memory;

pub use jsonl::JsonlFileSource;
pub use memory::MemorySource;

use crate::error::Result;
use crate::types::JsonValue;
use async_trait::async_trait;

/// A source of semi-structured documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Open a cursor over the full stream
    ///
    /// `batch_size` is the fetch granularity hint; it never changes the
    /// documents yielded or their order.
    async fn open(&self, batch_size: usize) -> Result<Box<dyn DocumentCursor>>;
}

/// A stateful cursor over a document stream
///
/// `close` is idempotent; dropping an unclosed cursor must also release
/// its resources.
#[async_trait]
pub trait DocumentCursor: Send {
    /// Yield the next document, or None at end of stream
    async fn next(&mut self) -> Result<Option<JsonValue>>;

    /// Release server-side iteration state
    async fn close(&mut self) -> Result<()>;
}
