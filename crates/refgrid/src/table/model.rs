//! Table payloads produced by schema-driven extraction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// One table row: column name to scalar value, in payload column order.
pub type Row = IndexMap<String, Value>;

/// Tables attached to one reviewed record, keyed by field name.
pub type RecordTables = IndexMap<String, Table>;

/// Schema metadata carried by every extraction table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    /// Schema name; matched against reference field names.
    pub name: String,
    /// Any other schema metadata, minus `columns`.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// An extraction table: ordered rows plus the schema that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table rows.
    #[serde(default)]
    pub data: Vec<Row>,
    /// Schema metadata. Required on ingestion.
    pub validation: Validation,
    /// Remaining top-level payload keys.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Content hash identifying a table for memoization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableFingerprint(String);

impl TableFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Table {
    /// Create a table from rows and a schema name.
    pub fn new(name: impl Into<String>, data: Vec<Row>) -> Self {
        Self {
            data,
            validation: Validation {
                name: name.into(),
                extra: IndexMap::new(),
            },
            extra: IndexMap::new(),
        }
    }

    /// Parse a JSON table payload.
    ///
    /// The payload must carry `validation.name`. The `validation.columns`
    /// schema block is discarded.
    pub fn parse(payload: &str) -> serde_json::Result<Self> {
        let mut table: Table = serde_json::from_str(payload)?;
        table.validation.extra.shift_remove("columns");
        Ok(table)
    }

    /// Schema name of the table.
    pub fn name(&self) -> &str {
        &self.validation.name
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column names, taken from the first row.
    pub fn columns(&self) -> Vec<&str> {
        self.data
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Iterate the values of one column. Rows lacking the column yield `None`.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.data.iter().map(move |row| row.get(column))
    }

    /// SHA-256 over the canonical JSON of the schema name and rows.
    pub fn fingerprint(&self) -> Result<TableFingerprint> {
        let canonical = serde_json::to_vec(&(&self.validation.name, &self.data))?;
        Ok(TableFingerprint(format!("sha256:{:x}", Sha256::digest(&canonical))))
    }
}
