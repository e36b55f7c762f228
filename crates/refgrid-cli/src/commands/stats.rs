//! Stats command - distinct value counts per column.

use std::path::PathBuf;

use colored::Colorize;
use refgrid::{RefgridConfig, StatsCache, TableExtractor};

use super::read_records;

pub fn run(file: PathBuf, table_filter: Option<String>, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let records = read_records(&file)?;
    let config = RefgridConfig::default();
    let mut cache = StatsCache::with_sentinels(config.null_sentinels.clone());
    let filter = table_filter.map(|t| t.to_lowercase());

    let collections = TableExtractor::new().extract_tables(&records, |_| true);

    for tables in &collections {
        for (key, table) in tables {
            if filter.as_deref().is_some_and(|f| table.name().to_lowercase() != f) {
                continue;
            }

            println!("{} {} ({})", "Table".cyan().bold(), table.name().white(), key);
            match cache.get_or_compute(table) {
                Ok(counts) => {
                    for (column, count) in counts {
                        let count_str = if *count <= 1 {
                            count.to_string().dimmed()
                        } else {
                            count.to_string().green()
                        };
                        println!("  {:24} {}", column, count_str);
                    }
                }
                Err(e) => println!("  {}", e.to_string().red()),
            }
            println!();
        }
    }

    Ok(())
}
