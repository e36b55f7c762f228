//! Per-column cardinality statistics.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{RefgridError, Result};

use super::model::{Table, TableFingerprint};

/// Distinct non-missing value count per column, in first-row column order.
pub type ColumnUniqueCounts = IndexMap<String, usize>;

/// Sentinel string treated as a missing value.
const NA: &str = "NA";

/// Count distinct values per column, ignoring `null` and `"NA"`.
///
/// The column set is the first row's keys. Fails with
/// [`RefgridError::InvalidTable`] when the table has no rows.
pub fn column_unique_counts(table: &Table) -> Result<ColumnUniqueCounts> {
    column_unique_counts_with(table, &[NA.to_string()])
}

/// Like [`column_unique_counts`], with an explicit list of null sentinels.
pub fn column_unique_counts_with(table: &Table, sentinels: &[String]) -> Result<ColumnUniqueCounts> {
    let first = table.data.first().ok_or_else(|| RefgridError::InvalidTable {
        table: table.name().to_string(),
        message: "cannot compute column statistics on a table without rows".to_string(),
    })?;

    let mut counts = ColumnUniqueCounts::with_capacity(first.len());
    for column in first.keys() {
        // Canonical JSON text keeps `1` and `"1"` distinct.
        let distinct: HashSet<String> = table
            .column_values(column)
            .flatten()
            .filter(|value| !is_missing(value, sentinels))
            .map(Value::to_string)
            .collect();
        counts.insert(column.clone(), distinct.len());
    }

    Ok(counts)
}

fn is_missing(value: &Value, sentinels: &[String]) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => sentinels.iter().any(|sentinel| sentinel == s),
        _ => false,
    }
}

/// Memoized column statistics keyed by table content.
///
/// Passed alongside tables instead of being stored on them.
#[derive(Debug, Clone)]
pub struct StatsCache {
    sentinels: Vec<String>,
    entries: HashMap<TableFingerprint, ColumnUniqueCounts>,
    hits: usize,
}

impl StatsCache {
    /// Create an empty cache using the default `"NA"` sentinel.
    pub fn new() -> Self {
        Self::with_sentinels(vec![NA.to_string()])
    }

    /// Create an empty cache with explicit null sentinels.
    pub fn with_sentinels(sentinels: Vec<String>) -> Self {
        Self {
            sentinels,
            entries: HashMap::new(),
            hits: 0,
        }
    }

    /// Return the cached counts for `table`, computing them on first use.
    pub fn get_or_compute(&mut self, table: &Table) -> Result<&ColumnUniqueCounts> {
        let fingerprint = table.fingerprint()?;
        self.get_or_compute_keyed(fingerprint, table)
    }

    /// Like [`get_or_compute`](Self::get_or_compute), with a fingerprint the caller already holds.
    pub fn get_or_compute_keyed(
        &mut self,
        fingerprint: TableFingerprint,
        table: &Table,
    ) -> Result<&ColumnUniqueCounts> {
        match self.entries.entry(fingerprint) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let counts = column_unique_counts_with(table, &self.sentinels)?;
                Ok(entry.insert(counts))
            }
        }
    }

    /// Number of tables with cached statistics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Strings this cache treats as missing values.
    pub fn sentinels(&self) -> &[String] {
        &self.sentinels
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new()
    }
}
