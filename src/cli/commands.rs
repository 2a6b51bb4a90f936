//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lakeport document export CLI
#[derive(Parser, Debug)]
#[command(name = "lakeport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize the document stream and stage it as JSONL chunks
    Export {
        /// Source JSONL file (overrides config `source.path`)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Target schema YAML file (default: built-in summary schema)
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Staging destination (local path or gs://, s3://, az:// URL)
        #[arg(short, long)]
        output: Option<String>,

        /// Maximum documents per chunk
        #[arg(long)]
        max_docs_per_chunk: Option<usize>,

        /// Warn about non-object elements dropped from repeated fields
        #[arg(long)]
        warn_dropped: bool,
    },

    /// Convert CSV reference tables to JSONL and stage them
    ConvertCsv {
        /// CSV files to stage
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Staging destination (overrides config `staging.url`)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the configured warehouse load jobs
    Load,

    /// Validate configuration and schema
    Validate {
        /// Target schema YAML file to check
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Start the HTTP trigger surface
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}
