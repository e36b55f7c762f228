//! Combinations command - enumerate every combination of reference rows.

use std::io;
use std::path::PathBuf;

use colored::Colorize;
use refgrid::{Combination, Refgrid};

use super::{read_records, resolve_order};
use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    fields: Vec<String>,
    authoritative: Option<usize>,
    format: OutputFormat,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = read_records(&file)?;
    let mut refgrid = Refgrid::new().with_order(resolve_order(authoritative));
    let result = refgrid.reconcile(&records, fields.as_slice());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result.combinations)?);
        }
        OutputFormat::Csv => {
            let resolved: Vec<&str> = result.ref_values.keys().map(String::as_str).collect();
            write_csv(&resolved, &result.combinations, io::stdout())?;
        }
        OutputFormat::Text => {
            println!(
                "{} {} across {} fields",
                "Combinations:".cyan().bold(),
                result.combinations.len().to_string().white().bold(),
                result.ref_values.len()
            );
            for (i, combination) in result.combinations.iter().enumerate() {
                let parts: Vec<String> = combination
                    .iter()
                    .map(|(field, key)| format!("{}={}", field, key.green()))
                    .collect();
                println!("  {:>4}. {}", i + 1, parts.join(", "));
            }
        }
    }

    Ok(())
}

/// Write combinations as CSV with one column per field.
fn write_csv<W: io::Write>(
    fields: &[&str],
    combinations: &[Combination],
    writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(fields)?;
    for combination in combinations {
        csv.write_record(fields.iter().map(|f| combination.get(*f).map_or("", String::as_str)))?;
    }
    csv.flush()?;
    Ok(())
}
