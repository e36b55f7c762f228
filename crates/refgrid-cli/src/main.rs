//! Refgrid CLI - reference-table reconciliation for reviewed records.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Tables { file, json } => commands::tables::run(file, json, cli.verbose),

        Commands::Stats { file, table } => commands::stats::run(file, table, cli.verbose),

        Commands::Refs {
            file,
            fields,
            authoritative,
        } => commands::refs::run(file, fields, authoritative, cli.verbose),

        Commands::Combinations {
            file,
            fields,
            authoritative,
            format,
        } => commands::combinations::run(file, fields, authoritative, format, cli.verbose),

        Commands::NextRef { reference } => commands::next_ref::run(reference),

        Commands::Schema {
            workspace,
            name,
            version_id,
            api_url,
        } => commands::schema::run(workspace, name, version_id, api_url, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
