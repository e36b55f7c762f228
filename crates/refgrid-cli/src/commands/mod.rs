//! CLI command implementations.

pub mod combinations;
pub mod next_ref;
pub mod refs;
pub mod schema;
pub mod stats;
pub mod tables;

use std::path::Path;

use refgrid::{load_records, Record, ResolveOrder};

/// Load records, failing with a readable message when the file is missing.
pub(crate) fn read_records(file: &Path) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(load_records(file)?)
}

pub(crate) fn resolve_order(authoritative: Option<usize>) -> ResolveOrder {
    authoritative.map_or(ResolveOrder::FirstWins, ResolveOrder::Authoritative)
}
