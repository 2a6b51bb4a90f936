//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ExportConfig;
use crate::convert::stage_csv_file;
use crate::error::{Error, Result};
use crate::export::ExportDriver;
use crate::load::{BulkLoader, LoadRequest, RestBulkLoader, TableMap};
use crate::normalize::Normalizer;
use crate::schema::{load_schema, summary_schema, Schema};
use crate::source::{DocumentSource, JsonlFileSource};
use crate::storage::StagingSink;
use crate::types::UnknownElementPolicy;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Export {
                source,
                schema,
                output,
                max_docs_per_chunk,
                warn_dropped,
            } => {
                self.export(
                    source.as_deref(),
                    schema.as_deref(),
                    output.as_deref(),
                    *max_docs_per_chunk,
                    *warn_dropped,
                )
                .await
            }
            Commands::ConvertCsv { files, output } => {
                self.convert_csv(files, output.as_deref()).await
            }
            Commands::Load => self.load().await,
            Commands::Validate { schema } => self.validate(schema.as_deref()),
            Commands::Serve { port } => self.serve(*port).await,
        }
    }

    /// Load run configuration, defaulted when no file is given
    fn load_config(&self) -> Result<ExportConfig> {
        match &self.cli.config {
            Some(path) => ExportConfig::from_path(path),
            None => Ok(ExportConfig::default()),
        }
    }

    /// Load the target schema, falling back to the built-in summary schema
    fn load_target_schema(&self, schema: Option<&Path>) -> Result<Schema> {
        match schema {
            Some(path) => load_schema(path),
            None => Ok(summary_schema()),
        }
    }

    async fn export(
        &self,
        source: Option<&Path>,
        schema: Option<&Path>,
        output: Option<&str>,
        max_docs_per_chunk: Option<usize>,
        warn_dropped: bool,
    ) -> Result<()> {
        let mut config = self.load_config()?;

        if let Some(url) = output {
            config.staging.url = url.to_string();
        }
        if let Some(max) = max_docs_per_chunk {
            config.export.max_docs_per_chunk = max;
        }
        if warn_dropped {
            config.export.unknown_elements = UnknownElementPolicy::Warn;
        }

        let source_path: PathBuf = source
            .map(Path::to_path_buf)
            .or_else(|| config.source.path.clone())
            .ok_or_else(|| Error::missing_field("source.path"))?;

        let schema = self.load_target_schema(schema)?;
        let normalizer =
            Normalizer::new(schema).with_unknown_element_policy(config.export.unknown_elements);

        let source: Arc<dyn DocumentSource> = Arc::new(JsonlFileSource::new(&source_path));
        let sink = Arc::new(StagingSink::parse(&config.staging.url)?);

        let driver = ExportDriver::new(
            source,
            normalizer,
            sink,
            config.source.clone(),
            config.staging.clone(),
            config.export.clone(),
        );

        let outcome = driver.run().await?;
        println!(
            "Export complete: {} documents in {} chunks ({} ms)",
            outcome.docs_processed, outcome.chunks_uploaded, outcome.duration_ms
        );
        Ok(())
    }

    async fn convert_csv(&self, files: &[PathBuf], output: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let url = output.unwrap_or(&config.staging.url);
        let sink = StagingSink::parse(url)?;

        for file in files {
            let uri = stage_csv_file(&sink, file).await?;
            println!("Staged {} -> {uri}", file.display());
        }
        Ok(())
    }

    async fn load(&self) -> Result<()> {
        let config = self.load_config()?;

        let endpoint = config
            .load
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::missing_field("load.endpoint"))?;
        let loader = RestBulkLoader::new(endpoint, config.load.dataset.clone())?;

        if config.load.jobs.is_empty() {
            return Err(Error::config("no load jobs configured"));
        }

        for job in &config.load.jobs {
            let mut request =
                LoadRequest::single(job.table.clone(), job.uri.clone(), job.write_mode);
            if let Some(schema_file) = &job.schema_file {
                let content = std::fs::read_to_string(schema_file)?;
                request = request.with_schema(serde_yaml::from_str(&content)?);
            }

            let outcome = loader.load(&request).await?;
            println!(
                "Loaded {} rows into {}",
                outcome.rows_loaded, outcome.table
            );
        }
        Ok(())
    }

    fn validate(&self, schema: Option<&Path>) -> Result<()> {
        let config = self.load_config()?;
        let schema = self.load_target_schema(schema)?;

        StagingSink::parse(&config.staging.url)?;

        println!(
            "Configuration valid: {} schema fields (depth {}), staging to {}",
            schema.len(),
            schema.depth(),
            config.staging.url
        );
        Ok(())
    }

    async fn serve(&self, port: u16) -> Result<()> {
        let config = self.load_config()?;

        let endpoint = config
            .load
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::missing_field("load.endpoint"))?;
        let loader: Arc<dyn BulkLoader> =
            Arc::new(RestBulkLoader::new(endpoint, config.load.dataset.clone())?);

        let state = crate::cli::ServerState {
            table_map: TableMap::from_routes(&config.load.tables),
            loader,
            bucket_scheme: config.load.bucket_scheme.clone(),
        };

        crate::cli::serve(state, port).await
    }
}
