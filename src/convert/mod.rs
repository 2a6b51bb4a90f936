//! CSV-to-record conversion
//!
//! The small reference tables (IP locations, crawl product lists) arrive
//! as CSV files and ride along with the event export as single staged
//! JSONL files. Every cell stays a string; the warehouse loads these
//! tables with explicit schemas, so nothing here guesses types.

use crate::error::{Error, Result};
use crate::storage::StagingSink;
use crate::types::{JsonObject, JsonValue};
use bytes::Bytes;
use serde_json::Value;
use std::path::Path;

/// Convert a CSV file (header row required) into documents
pub fn csv_file_to_documents(path: impl AsRef<Path>) -> Result<Vec<JsonValue>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    csv_to_documents(&content)
}

/// Convert CSV content (header row required) into documents
pub fn csv_to_documents(content: &str) -> Result<Vec<JsonValue>> {
    let mut lines = content.lines();

    let headers: Vec<String> = match lines.next() {
        Some(header_line) => parse_csv_line(header_line, ','),
        None => return Ok(Vec::new()),
    };

    let mut documents = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_csv_line(line, ',');
        let mut obj = JsonObject::new();
        for (i, header) in headers.iter().enumerate() {
            let value = fields.get(i).cloned().unwrap_or_default();
            obj.insert(header.clone(), Value::String(value));
        }
        documents.push(Value::Object(obj));
    }

    Ok(documents)
}

/// Convert a CSV file and stage it as `{basename}.jsonl`
///
/// Returns the staged URI. The whole file stages as one object; these
/// tables are small enough that chunking would only complicate the
/// loader's full-reload jobs.
pub async fn stage_csv_file(sink: &StagingSink, path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let documents = csv_file_to_documents(path)?;

    let base = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::config(format!("invalid CSV file name: {}", path.display())))?;

    let mut body = String::new();
    for doc in &documents {
        body.push_str(&serde_json::to_string(doc)?);
        body.push('\n');
    }

    let uri = sink.put(&format!("{base}.jsonl"), Bytes::from(body)).await?;
    tracing::info!(rows = documents.len(), %uri, "staged CSV file");
    Ok(uri)
}

/// Parse a CSV line into fields
fn parse_csv_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes {
                // Escaped quote inside a quoted field
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                in_quotes = true;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(c);
        }
    }

    fields.push(current.trim().to_string());
    fields
}
