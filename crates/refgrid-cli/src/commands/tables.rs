//! Tables command - list the tables extracted from each record.

use std::path::PathBuf;

use colored::Colorize;
use refgrid::TableExtractor;

use super::read_records;

pub fn run(file: PathBuf, json_output: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let records = read_records(&file)?;
    let extractor = TableExtractor::new();

    let extracted: Vec<_> = records
        .iter()
        .map(|record| (record, extractor.extract_one(record)))
        .filter(|(_, tables)| !tables.is_empty())
        .collect();

    if json_output {
        let output: Vec<_> = extracted
            .iter()
            .map(|(record, tables)| serde_json::json!({"record": record.id, "tables": tables}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} of {} records carry tables",
        "Tables:".cyan().bold(),
        extracted.len().to_string().white().bold(),
        records.len()
    );
    println!();

    for (record, tables) in &extracted {
        println!("{} {}", "Record".yellow().bold(), record.id.white());
        for (key, table) in tables {
            println!(
                "  {:20} {:20} {} rows",
                key,
                table.name().green(),
                table.row_count()
            );
            if verbose {
                println!("  {:20} columns: {}", "", table.columns().join(", "));
            }
        }
    }

    Ok(())
}
