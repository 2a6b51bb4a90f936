//! REST load-job client
//!
//! Invokes a warehouse load-job endpoint: one POST per load, blocking
//! until the job finishes server-side. Loads are not retried here; a
//! failed load surfaces with the table name and root cause, and rerunning
//! the job is the operator's call.

use super::types::{BulkLoader, LoadOutcome, LoadRequest};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(600);

/// Load-job client for a warehouse REST endpoint
#[derive(Debug, Clone)]
pub struct RestBulkLoader {
    client: reqwest::Client,
    endpoint: Url,
    dataset: String,
}

#[derive(Debug, Deserialize)]
struct JobResponse {
    rows_loaded: u64,
}

#[derive(Debug, Deserialize)]
struct JobError {
    error: String,
}

impl RestBulkLoader {
    /// Create a client for the given endpoint and dataset
    pub fn new(endpoint: &str, dataset: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_JOB_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Ok(Self {
            client,
            endpoint,
            dataset: dataset.into(),
        })
    }

    /// The configured dataset
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    fn jobs_url(&self) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("endpoint cannot be a base: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(["load-jobs"]);
        Ok(url)
    }
}

#[async_trait]
impl BulkLoader for RestBulkLoader {
    async fn load(&self, request: &LoadRequest) -> Result<LoadOutcome> {
        let url = self.jobs_url()?;

        tracing::info!(
            table = %request.table,
            uris = request.source_uris.len(),
            mode = %request.write_mode,
            "starting load job"
        );

        let body = json!({
            "dataset": self.dataset,
            "table": request.table,
            "source_uris": request.source_uris,
            "source_format": "NEWLINE_DELIMITED_JSON",
            "schema": request.schema,
            "write_mode": request.write_mode,
            // Extra fields in staged records must never fail a load
            "ignore_unknown_values": true,
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::load(&request.table, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<JobError>().await {
                Ok(err) => err.error,
                Err(_) => format!("HTTP {status}"),
            };
            return Err(Error::load(&request.table, detail));
        }

        let job: JobResponse = response
            .json()
            .await
            .map_err(|e| Error::load(&request.table, format!("malformed job response: {e}")))?;

        tracing::info!(
            table = %request.table,
            rows = job.rows_loaded,
            "load job complete"
        );

        Ok(LoadOutcome {
            table: request.table.clone(),
            rows_loaded: job.rows_loaded,
        })
    }
}
