//! Filename-prefix to table routing
//!
//! The staging layer's naming convention is the contract here: any file
//! whose basename starts with a mapped prefix belongs to that prefix's
//! table, so `summary_00000.jsonl` through `summary_04711.jsonl` are all
//! one logical table.

use crate::config::TableRoute;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches sequentially numbered staged chunk files
static CHUNK_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<prefix>.+)_(?P<index>\d{5,})\.jsonl$").expect("static pattern"));

/// Extract the sequential index from a staged chunk basename
pub fn chunk_index(file_name: &str) -> Option<usize> {
    CHUNK_FILE_RE
        .captures(file_name)?
        .name("index")?
        .as_str()
        .parse()
        .ok()
}

/// Static prefix → table routing table
#[derive(Debug, Clone)]
pub struct TableMap {
    // Longest prefix first so overlapping prefixes route specifically
    entries: Vec<(String, String)>,
}

impl Default for TableMap {
    fn default() -> Self {
        Self::new(vec![
            ("ip_location_results".to_string(), "ip_locations".to_string()),
            ("product_ids_to_crawl".to_string(), "product_ids_to_crawl".to_string()),
            ("valid_product_ids".to_string(), "crawl_product_id".to_string()),
            ("summary".to_string(), "events_raw".to_string()),
        ])
    }
}

impl TableMap {
    /// Create a map from (prefix, table) pairs
    pub fn new(mut entries: Vec<(String, String)>) -> Self {
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries }
    }

    /// Create a map from configured routes; empty routes mean the built-in map
    pub fn from_routes(routes: &[TableRoute]) -> Self {
        if routes.is_empty() {
            Self::default()
        } else {
            Self::new(
                routes
                    .iter()
                    .map(|r| (r.prefix.clone(), r.table.clone()))
                    .collect(),
            )
        }
    }

    /// Resolve a staged file name (or full object path) to its table
    ///
    /// Matching runs on the lowercased basename; unmapped files resolve
    /// to None and are ignored by the trigger surface.
    pub fn resolve(&self, file_name: &str) -> Option<&str> {
        let base = file_name.rsplit('/').next().unwrap_or(file_name).to_lowercase();

        self.entries
            .iter()
            .find(|(prefix, _)| base.starts_with(prefix.as_str()))
            .map(|(_, table)| table.as_str())
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no routes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
