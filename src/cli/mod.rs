//! CLI module
//!
//! Command-line interface for running exports and loads.
//!
//! # Commands
//!
//! - `export` - Normalize and stage the document stream
//! - `convert-csv` - Stage CSV reference tables as JSONL
//! - `load` - Run the configured warehouse load jobs
//! - `validate` - Check the configuration and schema
//! - `serve` - Start the HTTP trigger surface

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{serve, trigger_router, ServerState};
