//! Staging sink over object storage
//!
//! Chunks land as flat, sequentially named objects under a fixed prefix;
//! the downstream loader's prefix-to-table routing depends on that naming,
//! so nothing here partitions or timestamps paths.

use crate::error::{Error, Result};
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

/// Staging destination parsed from a URL
#[derive(Debug, Clone)]
pub struct StagingSink {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// Original URL scheme for URI rendering
    scheme: String,
}

impl StagingSink {
    /// Parse a staging URL and create the appropriate object store
    ///
    /// Supported formats:
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `s3://bucket/path/` - AWS S3
    /// - `az://container/path/` - Azure Blob Storage
    /// - `/local/path/` or `file://path` - Local filesystem
    ///
    /// Credentials come from the environment (service-account key path,
    /// access keys), never from the URL.
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("s3://") {
            Self::parse_s3(url)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else {
            Self::parse_local(url)
        }
    }

    fn parse_gcs(url: &str) -> Result<Self> {
        let (bucket, prefix) = split_bucket(url, "gs")?;

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::sink(format!("failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "gs".to_string(),
        })
    }

    fn parse_s3(url: &str) -> Result<Self> {
        let (bucket, prefix) = split_bucket(url, "s3")?;

        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::sink(format!("failed to create S3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
        })
    }

    fn parse_azure(url: &str) -> Result<Self> {
        let (container, prefix) = split_bucket(url, "az")?;

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::sink(format!("failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "az".to_string(),
        })
    }

    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::sink(format!("failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::sink(format!("failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud destination (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (gs, s3, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Durably persist a named byte stream, returning its staged URI
    pub async fn put(&self, filename: &str, data: Bytes) -> Result<String> {
        let path = self.object_path(filename);

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::sink(format!("failed to write {path}: {e}")))?;

        Ok(format!("{}://{path}", self.scheme))
    }

    /// The URI a given filename will stage to
    pub fn staged_uri(&self, filename: &str) -> String {
        format!("{}://{}", self.scheme, self.object_path(filename))
    }

    fn object_path(&self, filename: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(filename)
        } else {
            ObjectPath::from(format!("{}/{filename}", self.prefix.trim_end_matches('/')))
        }
    }
}

fn split_bucket(url: &str, scheme: &str) -> Result<(String, String)> {
    let without_scheme = url
        .strip_prefix(&format!("{scheme}://"))
        .ok_or_else(|| Error::sink(format!("invalid {scheme} URL: {url}")))?;

    match without_scheme.find('/') {
        Some(idx) => Ok((
            without_scheme[..idx].to_string(),
            without_scheme[idx + 1..].trim_end_matches('/').to_string(),
        )),
        None => Ok((without_scheme.to_string(), String::new())),
    }
}
