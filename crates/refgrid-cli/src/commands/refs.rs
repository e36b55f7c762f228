//! Refs command - resolve reference fields to their reference rows.

use std::path::PathBuf;

use colored::Colorize;
use refgrid::Refgrid;

use super::{read_records, resolve_order};

pub fn run(
    file: PathBuf,
    fields: Vec<String>,
    authoritative: Option<usize>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = read_records(&file)?;
    let mut refgrid = Refgrid::new().with_order(resolve_order(authoritative));

    let ref_values = refgrid.ref_values(fields.as_slice(), &records);

    for field in fields.iter().filter(|f| !ref_values.contains_key(f.as_str())) {
        eprintln!(
            "{} no table named '{}' for {}",
            "warning:".yellow().bold(),
            refgrid.config().reference_base(field),
            field
        );
    }

    if verbose {
        eprintln!(
            "Resolved {} of {} fields from {} table collections",
            ref_values.len(),
            fields.len(),
            refgrid.tables(&records).len()
        );
    }

    println!("{}", serde_json::to_string_pretty(&ref_values)?);
    Ok(())
}
