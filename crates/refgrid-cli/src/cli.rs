//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Refgrid: reference-table reconciliation for reviewed extraction records
#[derive(Parser)]
#[command(name = "refgrid")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tables extracted from each record
    Tables {
        /// Path to a JSON array of records
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show distinct value counts per column
    Stats {
        /// Path to a JSON array of records
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only tables with this schema name (case-insensitive)
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Resolve reference fields to their reference rows
    Refs {
        /// Path to a JSON array of records
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Reference field to resolve (e.g. "site_ref"); repeatable
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,

        /// Position of the record whose tables take precedence (0-based, counting every record)
        #[arg(long)]
        authoritative: Option<usize>,
    },

    /// Enumerate every combination of reference rows
    Combinations {
        /// Path to a JSON array of records
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Reference field to combine (e.g. "site_ref"); repeatable
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,

        /// Position of the record whose tables take precedence (0-based, counting every record)
        #[arg(long)]
        authoritative: Option<usize>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the reference following the given one (e.g. A007 -> A008)
    NextRef {
        #[arg(value_name = "REFERENCE")]
        reference: String,
    },

    /// Fetch an extraction schema file
    Schema {
        /// Workspace name
        #[arg(value_name = "WORKSPACE")]
        workspace: String,

        /// Schema name
        #[arg(value_name = "NAME")]
        name: String,

        /// Schema version to fetch
        #[arg(long)]
        version_id: Option<String>,

        /// File API base URL (default: $REFGRID_API_URL or http://localhost:6900)
        #[arg(long)]
        api_url: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}
