//! Refgrid: reference-table reconciliation for reviewed extraction records.
//!
//! Records under review carry tables produced by schema-driven extraction.
//! Refgrid normalizes those payloads, resolves `<name>_ref` fields against the
//! table named `<name>`, drops columns that never vary, and enumerates every
//! combination of reference rows a reviewer may need to step through.
//!
//! # Example
//!
//! ```no_run
//! use refgrid::{load_records, Refgrid};
//!
//! let records = load_records("records.json").unwrap();
//! let mut refgrid = Refgrid::new();
//! let result = refgrid.reconcile(&records, &["site_ref", "lab_ref"]);
//!
//! println!("Combinations: {}", result.combinations.len());
//! ```

pub mod combine;
pub mod config;
pub mod error;
pub mod extract;
pub mod input;
pub mod reference;
pub mod resolve;
pub mod review;
pub mod schema;
pub mod table;

mod refgrid;

pub use crate::refgrid::{Reconciliation, Refgrid};
pub use combine::{cartesian_product, generate_combinations, CartesianProduct, Combination, CombinationCursor};
pub use config::RefgridConfig;
pub use error::{RefgridError, Result};
pub use extract::TableExtractor;
pub use input::{load_records, Field, Record};
pub use reference::{increment_reference_str, max_string_value, next_reference};
pub use resolve::{MatchingRefValues, ReferenceResolver, ResolveOrder};
pub use schema::{SchemaClient, SchemaMetadata};
pub use table::{column_unique_counts, ColumnUniqueCounts, RecordTables, Row, StatsCache, Table};
