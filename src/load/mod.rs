//! Bulk load into the warehouse
//!
//! The export core hands staged file URIs to a bulk loader; everything
//! warehouse-side (job execution, schema enforcement) lives behind the
//! `BulkLoader` trait.
//!
//! # Overview
//!
//! This module provides:
//! - `LoadRequest` / `LoadOutcome` / `BulkLoader` - the load invocation
//!   contract
//! - `TableMap` - static filename-prefix to table routing
//! - `RestBulkLoader` - load-job client for a warehouse REST endpoint

mod rest;
mod table_map;
mod types;

pub use rest::RestBulkLoader;
pub use table_map::{chunk_index, TableMap};
pub use types::{BulkLoader, LoadOutcome, LoadRequest};

#[cfg(test)]
mod tests;
