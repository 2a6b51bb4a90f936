//! Common types used throughout Lakeport
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Write Mode
// ============================================================================

/// How a bulk load writes into the target table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Replace the table contents entirely (full reload)
    #[default]
    Truncate,
    /// Append to existing rows
    Append,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Truncate => write!(f, "truncate"),
            WriteMode::Append => write!(f, "append"),
        }
    }
}

// ============================================================================
// Unknown Element Policy
// ============================================================================

/// What to do with non-object elements found inside a repeated record field
///
/// The normalizer always drops such elements from the output; this only
/// controls whether the drop is surfaced as a data-quality signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownElementPolicy {
    /// Drop silently
    #[default]
    Skip,
    /// Drop and log at WARN with the field path
    Warn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_mode_serde() {
        let mode: WriteMode = serde_json::from_str("\"append\"").unwrap();
        assert_eq!(mode, WriteMode::Append);
        assert_eq!(serde_json::to_string(&WriteMode::Truncate).unwrap(), "\"truncate\"");
    }

    #[test]
    fn test_write_mode_default_is_truncate() {
        assert_eq!(WriteMode::default(), WriteMode::Truncate);
    }

    #[test]
    fn test_unknown_element_policy_default() {
        assert_eq!(UnknownElementPolicy::default(), UnknownElementPolicy::Skip);
    }
}
